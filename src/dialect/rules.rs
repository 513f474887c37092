//! The dialect syntax-rule resource (§4.10): how a canonical field code maps
//! onto a target database's surface syntax, loadable from an embedded
//! default or a caller-supplied TOML document.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::constants::compile_time::dialect as defaults;

/// The sentinel a `field_code_map` entry uses to say "drop the field
/// restriction entirely, keep only the quoted content".
pub const STRIP: &str = "STRIP";
/// The sentinel a `field_code_map` entry uses to say "keep the canonical
/// code name unchanged".
pub const PASS: &str = "PASS";

/// One of the three bibliographic databases this crate targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    PubMed,
    EuropePmc,
    Cochrane,
}

/// A dialect's syntax-rule resource: the field-code mapping, the date-range
/// rewrite template, and the non-fatal bound warnings it enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialectRules {
    /// Canonical field code (e.g. `"MeSH"`) to dialect surface form, or one
    /// of the [`STRIP`]/[`PASS`] sentinels.
    #[serde(default)]
    pub field_code_map: HashMap<String, String>,

    /// Template for rewriting a `pdat` date-range field term. `{lower}` and
    /// `{upper}` are substituted with the four-digit year bounds.
    #[serde(default = "default_date_range_template")]
    pub date_range_template: String,

    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    #[serde(default = "default_max_operators")]
    pub max_operators: usize,
}

fn default_date_range_template() -> String {
    "{lower}:{upper}[pdat]".to_string()
}
fn default_max_query_length() -> usize {
    defaults::DEFAULT_MAX_QUERY_LENGTH
}
fn default_max_nesting_depth() -> usize {
    defaults::DEFAULT_MAX_NESTING_DEPTH
}
fn default_max_operators() -> usize {
    defaults::DEFAULT_MAX_OPERATORS
}

impl DialectRules {
    /// Parse a caller-supplied syntax-rule document.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The built-in syntax-rule resource for a dialect.
    pub fn default_for(dialect: Dialect) -> Self {
        let text = match dialect {
            Dialect::PubMed => PUBMED_DEFAULTS,
            Dialect::EuropePmc => EUROPE_PMC_DEFAULTS,
            Dialect::Cochrane => COCHRANE_DEFAULTS,
        };
        toml::from_str(text).expect("embedded dialect default TOML is well-formed")
    }
}

const PUBMED_DEFAULTS: &str = r#"
date_range_template = "{lower}:{upper}[pdat]"
max_query_length = 8192
max_nesting_depth = 16
max_operators = 256

[field_code_map]
MeSH = "PASS"
Title = "PASS"
Author = "PASS"
"#;

const EUROPE_PMC_DEFAULTS: &str = r#"
date_range_template = "PUB_YEAR:({lower} TO {upper})"
max_query_length = 8192
max_nesting_depth = 16
max_operators = 256

[field_code_map]
MeSH = "MESH"
Title = "TITLE"
Author = "AUTH"
"#;

const COCHRANE_DEFAULTS: &str = r#"
date_range_template = "{lower}-{upper}"
max_query_length = 8192
max_nesting_depth = 16
max_operators = 256

[field_code_map]
"#;

//! Closed registry of log codes and their metadata. Every code the parser,
//! the format detector, and the dialect compiler emit is named here once;
//! [`LogEvent`](super::events::LogEvent) looks up severity/category/
//! description through these functions instead of carrying the metadata
//! inline, so the registry stays the single source of truth.

use std::collections::HashMap;
use std::sync::OnceLock;

/// A stable code string, e.g. `"E001"` or `"I010"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone)]
struct Metadata {
    category: &'static str,
    severity: Severity,
    recoverable: bool,
    description: &'static str,
    action: &'static str,
}

fn registry() -> &'static HashMap<&'static str, Metadata> {
    static REGISTRY: OnceLock<HashMap<&'static str, Metadata>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut m = HashMap::new();
        m.insert(
            "E001",
            Metadata {
                category: "Parse",
                severity: Severity::Medium,
                recoverable: false,
                description: "unterminated quote",
                action: "close the opened quote",
            },
        );
        m.insert(
            "E002",
            Metadata {
                category: "Parse",
                severity: Severity::Medium,
                recoverable: false,
                description: "unbalanced parentheses",
                action: "match every '(' with a ')'",
            },
        );
        m.insert(
            "E003",
            Metadata {
                category: "Parse",
                severity: Severity::Medium,
                recoverable: false,
                description: "unquoted multi-word term",
                action: "quote the multi-word search term",
            },
        );
        m.insert(
            "E004",
            Metadata {
                category: "Parse",
                severity: Severity::Medium,
                recoverable: false,
                description: "mixed operators without grouping",
                action: "add parentheses to disambiguate precedence",
            },
        );
        m.insert(
            "E005",
            Metadata {
                category: "Parse",
                severity: Severity::Medium,
                recoverable: false,
                description: "mixed operators across multi-line operator lines",
                action: "use the same operator on every operator line",
            },
        );
        m.insert(
            "E006",
            Metadata {
                category: "Lexical",
                severity: Severity::Medium,
                recoverable: false,
                description: "unrecognized operator",
                action: "use one of the recognized operator spellings",
            },
        );
        m.insert(
            "E007",
            Metadata {
                category: "Parse",
                severity: Severity::Medium,
                recoverable: false,
                description: "adjacent operators with no atom between them",
                action: "insert an atom between the two operators",
            },
        );
        m.insert(
            "E008",
            Metadata {
                category: "Parse",
                severity: Severity::Medium,
                recoverable: false,
                description: "query begins or ends with an operator",
                action: "remove the leading or trailing operator",
            },
        );
        m.insert(
            "E009",
            Metadata {
                category: "Parse",
                severity: Severity::Medium,
                recoverable: false,
                description: "empty atom",
                action: "give the atom content or remove it",
            },
        );
        m.insert(
            "E010",
            Metadata {
                category: "MultiLine",
                severity: Severity::Medium,
                recoverable: false,
                description: "content line has unbalanced parentheses",
                action: "close all parentheses on the same line",
            },
        );
        m.insert(
            "E011",
            Metadata {
                category: "MultiLine",
                severity: Severity::Medium,
                recoverable: false,
                description: "malformed multi-line structure",
                action: "alternate content and single-operator lines",
            },
        );
        m.insert(
            "E012",
            Metadata {
                category: "Lexical",
                severity: Severity::Medium,
                recoverable: false,
                description: "invalid field term",
                action: "match the quoted-content-plus-bracketed-code form",
            },
        );
        m.insert(
            "W001",
            Metadata {
                category: "Dialect",
                severity: Severity::Low,
                recoverable: true,
                description: "unknown field code in dialect compilation",
                action: "add the code to the dialect's field_code_map, or ignore",
            },
        );
        m.insert(
            "W002",
            Metadata {
                category: "Dialect",
                severity: Severity::Low,
                recoverable: true,
                description: "a dialect bound was exceeded",
                action: "simplify the query or raise the dialect's limit",
            },
        );
        m
    })
}

fn lookup(code: &str) -> Option<&'static Metadata> {
    registry().get(code)
}

pub fn get_category(code: &str) -> &'static str {
    lookup(code).map(|m| m.category).unwrap_or("Unknown")
}

pub fn get_severity(code: &str) -> Severity {
    lookup(code).map(|m| m.severity).unwrap_or(Severity::Low)
}

pub fn is_recoverable(code: &str) -> bool {
    lookup(code).map(|m| m.recoverable).unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    lookup(code)
        .map(|m| !m.recoverable && m.severity <= Severity::High)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    lookup(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    lookup(code)
        .map(|m| m.action)
        .unwrap_or("No specific action available")
}

/// Codes for the closed diagnostic set in spec §7, keyed by
/// [`crate::error::ParseError::kind`].
pub mod parse {
    use super::Code;

    pub const UNTERMINATED_QUOTE: Code = Code::new("E001");
    pub const UNBALANCED_PARENS: Code = Code::new("E002");
    pub const UNQUOTED_MULTIWORD_TERM: Code = Code::new("E003");
    pub const MIXED_OPERATORS_NO_GROUP: Code = Code::new("E004");
    pub const MIXED_OPERATORS_MULTI_LINE: Code = Code::new("E005");
    pub const UNRECOGNIZED_OPERATOR: Code = Code::new("E006");
    pub const ADJACENT_OPERATORS: Code = Code::new("E007");
    pub const LEADING_OR_TRAILING_OPERATOR: Code = Code::new("E008");
    pub const EMPTY_ATOM: Code = Code::new("E009");
    pub const CROSS_LINE_PARENS: Code = Code::new("E010");
    pub const BAD_MULTI_LINE_STRUCTURE: Code = Code::new("E011");
    pub const INVALID_FIELD_TERM: Code = Code::new("E012");

    /// Look up the code for a [`crate::error::ParseError::kind`] string.
    pub fn code_for_kind(kind: &str) -> Code {
        match kind {
            "UnterminatedQuote" => UNTERMINATED_QUOTE,
            "UnbalancedParens" => UNBALANCED_PARENS,
            "UnquotedMultiwordTerm" => UNQUOTED_MULTIWORD_TERM,
            "MixedOperatorsNoGroup" => MIXED_OPERATORS_NO_GROUP,
            "MixedOperatorsMultiLine" => MIXED_OPERATORS_MULTI_LINE,
            "UnrecognizedOperator" => UNRECOGNIZED_OPERATOR,
            "AdjacentOperators" => ADJACENT_OPERATORS,
            "LeadingOrTrailingOperator" => LEADING_OR_TRAILING_OPERATOR,
            "EmptyAtom" => EMPTY_ATOM,
            "CrossLineParens" => CROSS_LINE_PARENS,
            "BadMultiLineStructure" => BAD_MULTI_LINE_STRUCTURE,
            _ => INVALID_FIELD_TERM,
        }
    }
}

pub mod dialect {
    use super::Code;

    pub const UNKNOWN_FIELD_CODE: Code = Code::new("W001");
    pub const BOUND_EXCEEDED: Code = Code::new("W002");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_resolves_metadata() {
        assert_eq!(get_category("E001"), "Parse");
        assert_eq!(get_severity("E001"), Severity::Medium);
        assert!(!is_recoverable("E001"));
    }

    #[test]
    fn warning_codes_are_recoverable() {
        assert!(is_recoverable("W001"));
        assert!(!requires_halt("W001"));
    }

    #[test]
    fn unknown_code_has_safe_defaults() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
    }
}

//! Output types returned by the pipeline's public entry points.

use crate::format::FormatTag;

/// The result of running a query through the full pipeline: which format
/// it was detected as, and its fully parenthesized canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub format: FormatTag,
    pub canonical: String,
}

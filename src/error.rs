//! The closed set of diagnostics the core returns. One variant per surface
//! condition in the grammar; every variant carries enough structured data to
//! name the offending construct in its message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated quote: no closing {quote:?} found for the quote opened at byte offset {position}")]
    UnterminatedQuote { quote: char, position: usize },

    #[error("unbalanced parentheses in query")]
    UnbalancedParens,

    #[error("unquoted multi-word term near {token:?}: quote multi-word search terms, e.g. \"{token}\"")]
    UnquotedMultiwordTerm { token: String },

    #[error(
        "{first} and {second} both appear at the same nesting level without grouping; \
         add parentheses to disambiguate, e.g. (A {first} B) {second} C"
    )]
    MixedOperatorsNoGroup {
        first: &'static str,
        second: &'static str,
    },

    #[error(
        "multi-line query mixes {first} and {second} across its operator lines; \
         every operator line must use the same operator"
    )]
    MixedOperatorsMultiLine {
        first: &'static str,
        second: &'static str,
    },

    #[error("unrecognized operator {word:?} on line {line}")]
    UnrecognizedOperator { word: String, line: usize },

    #[error("two operators in sequence with no term between them: {first:?} {second:?}")]
    AdjacentOperators { first: String, second: String },

    #[error("query begins or ends with an operator: {operator:?}")]
    LeadingOrTrailingOperator { operator: String },

    #[error("empty atom: {token:?} has no content")]
    EmptyAtom { token: String },

    #[error("line {line}: content line has unbalanced parentheses; parentheses cannot span multiple lines")]
    CrossLineParens { line: usize },

    #[error("malformed multi-line query on line {line}: {reason}")]
    BadMultiLineStructure { line: usize, reason: String },

    #[error("invalid field term {token:?}: {reason}")]
    InvalidFieldTerm { token: String, reason: String },
}

impl ParseError {
    /// The closed error-kind name, stable across message wording changes —
    /// used by callers that want to branch on kind without string-matching
    /// the display message.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::UnterminatedQuote { .. } => "UnterminatedQuote",
            ParseError::UnbalancedParens => "UnbalancedParens",
            ParseError::UnquotedMultiwordTerm { .. } => "UnquotedMultiwordTerm",
            ParseError::MixedOperatorsNoGroup { .. } => "MixedOperatorsNoGroup",
            ParseError::MixedOperatorsMultiLine { .. } => "MixedOperatorsMultiLine",
            ParseError::UnrecognizedOperator { .. } => "UnrecognizedOperator",
            ParseError::AdjacentOperators { .. } => "AdjacentOperators",
            ParseError::LeadingOrTrailingOperator { .. } => "LeadingOrTrailingOperator",
            ParseError::EmptyAtom { .. } => "EmptyAtom",
            ParseError::CrossLineParens { .. } => "CrossLineParens",
            ParseError::BadMultiLineStructure { .. } => "BadMultiLineStructure",
            ParseError::InvalidFieldTerm { .. } => "InvalidFieldTerm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn kind_matches_variant() {
        let err = ParseError::MixedOperatorsNoGroup {
            first: "AND",
            second: "OR",
        };
        assert_matches!(err, ParseError::MixedOperatorsNoGroup { first: "AND", second: "OR" });
        assert_eq!(err.kind(), "MixedOperatorsNoGroup");
    }

    #[test]
    fn leading_trailing_message_names_the_operator() {
        let err = ParseError::LeadingOrTrailingOperator {
            operator: "AND".to_string(),
        };
        assert_matches!(err, ParseError::LeadingOrTrailingOperator { .. });
        assert!(err.to_string().contains("AND"));
    }

    #[test]
    fn mixed_operators_no_group_message_suggests_grouping() {
        let err = ParseError::MixedOperatorsNoGroup {
            first: "AND",
            second: "OR",
        };
        let message = err.to_string();
        assert!(message.contains("AND"));
        assert!(message.contains("OR"));
        assert!(message.contains('('));
    }
}

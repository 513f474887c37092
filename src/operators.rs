//! The operator lexicon: the closed mapping from surface spellings in two
//! natural languages onto the three canonical boolean operators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical boolean operator. Binary NOT semantics, as surfaced by the
/// target databases — this is never treated as a unary prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    /// The canonical uppercase English spelling used in canonical output.
    pub fn canonical(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// Recognize a surface operator spelling, case-insensitively. Absence is not
/// an error at this layer — it is information the token classifier and the
/// validators consume to decide what kind of error (if any) applies.
pub fn normalize_op(word: &str) -> Option<Operator> {
    match word.to_ascii_lowercase().as_str() {
        "and" | "und" => Some(Operator::And),
        "or" | "oder" => Some(Operator::Or),
        "not" | "nicht" | "kein" | "keine" | "ohne" => Some(Operator::Not),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_english_spellings() {
        assert_eq!(normalize_op("and"), Some(Operator::And));
        assert_eq!(normalize_op("AND"), Some(Operator::And));
        assert_eq!(normalize_op("Or"), Some(Operator::Or));
        assert_eq!(normalize_op("NOT"), Some(Operator::Not));
    }

    #[test]
    fn recognizes_german_spellings() {
        assert_eq!(normalize_op("und"), Some(Operator::And));
        assert_eq!(normalize_op("oder"), Some(Operator::Or));
        assert_eq!(normalize_op("nicht"), Some(Operator::Not));
        assert_eq!(normalize_op("kein"), Some(Operator::Not));
        assert_eq!(normalize_op("keine"), Some(Operator::Not));
        assert_eq!(normalize_op("ohne"), Some(Operator::Not));
    }

    #[test]
    fn rejects_unknown_words() {
        assert_eq!(normalize_op("xor"), None);
        assert_eq!(normalize_op("cancer"), None);
        assert_eq!(normalize_op(""), None);
    }
}

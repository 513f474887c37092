//! The multi-line validator and parser (§4.8): alternating content/operator
//! lines, folded left-associatively into the same canonical form the
//! single-line parser produces for each content line.

use crate::error::ParseError;
use crate::operators::{normalize_op, Operator};
use crate::scanner::is_balanced;
use crate::single_line::parse_single_line;

/// Validate and parse a multi-line query (content/operator/content/…,
/// content lines at even indices, operator lines at odd indices) into its
/// canonical form.
pub fn parse_multi_line(lines: &[String]) -> Result<String, ParseError> {
    let n = lines.len();
    if n < 3 || n % 2 == 0 {
        return Err(ParseError::BadMultiLineStructure {
            line: n,
            reason: "a multi-line query needs an odd number of lines, at least 3".to_string(),
        });
    }

    let mut shared_operator: Option<Operator> = None;
    for i in (1..n).step_by(2) {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ParseError::BadMultiLineStructure {
                line: i + 1,
                reason: format!("operator line must be exactly one token, found {:?}", lines[i]),
            });
        }
        let op = match normalize_op(trimmed) {
            Some(op) => op,
            None => {
                return Err(ParseError::UnrecognizedOperator {
                    word: trimmed.to_string(),
                    line: i + 1,
                })
            }
        };
        match shared_operator {
            None => shared_operator = Some(op),
            Some(prev) if prev == op => {}
            Some(prev) => {
                return Err(ParseError::MixedOperatorsMultiLine {
                    first: prev.canonical(),
                    second: op.canonical(),
                })
            }
        }
    }
    let operator = shared_operator.expect("odd n >= 3 guarantees at least one operator line");

    let mut parsed_content = Vec::with_capacity(n / 2 + 1);
    for i in (0..n).step_by(2) {
        let content = &lines[i];
        if !is_balanced(content) {
            return Err(ParseError::CrossLineParens { line: i + 1 });
        }
        parsed_content.push(parse_single_line(content)?);
    }

    let mut iter = parsed_content.into_iter();
    let mut current = iter.next().expect("at least one content line");
    for next in iter {
        current = format!("{current} {} {next}", operator.canonical());
    }
    Ok(format!("({current})"))
}

pub fn validate_multi_line(lines: &[String]) -> Result<(), ParseError> {
    parse_multi_line(lines).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn three_line_disjunction_conjunction() {
        let out = parse_multi_line(&lines(&[
            "\"cancer\" OR \"tumor\"",
            "AND",
            "\"treatment\" OR \"therapy\"",
        ]))
        .unwrap();
        assert_eq!(
            out,
            "(((\"cancer\") OR (\"tumor\")) AND ((\"treatment\") OR (\"therapy\")))"
        );
    }

    #[test]
    fn five_lines_same_operator_left_folds() {
        let out = parse_multi_line(&lines(&["a", "AND", "b", "AND", "c"])).unwrap();
        assert_eq!(out, "((a) AND (b) AND (c))");
    }

    #[test]
    fn mixed_operators_across_lines_is_rejected() {
        let err = parse_multi_line(&lines(&["a", "OR", "b", "AND", "c"])).unwrap_err();
        assert_eq!(err.kind(), "MixedOperatorsMultiLine");
    }

    #[test]
    fn unrecognized_operator_line_is_rejected() {
        let err = parse_multi_line(&lines(&["a", "XOR", "b"])).unwrap_err();
        assert_eq!(err.kind(), "UnrecognizedOperator");
    }

    #[test]
    fn even_line_count_is_bad_structure() {
        let err = parse_multi_line(&lines(&["a", "AND", "b", "AND"])).unwrap_err();
        assert_eq!(err.kind(), "BadMultiLineStructure");
    }

    #[test]
    fn unbalanced_content_line_is_cross_line_parens() {
        let err = parse_multi_line(&lines(&["(a", "AND", "b)"])).unwrap_err();
        assert_eq!(err.kind(), "CrossLineParens");
    }

    #[test]
    fn content_line_errors_propagate() {
        let err = parse_multi_line(&lines(&["a b", "AND", "c"])).unwrap_err();
        assert_eq!(err.kind(), "UnquotedMultiwordTerm");
    }
}

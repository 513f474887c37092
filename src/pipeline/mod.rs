//! Pipeline orchestration (§6): wires `preprocess -> detect_format ->
//! (single_line | multi_line) -> normalize -> dialect::compile` into the
//! four public entry points the core exposes.

pub mod output;

pub use output::ParseOutcome;

use crate::dialect::{compile_for_dialect as dialect_compile, CompileResult, Dialect, DialectRules};
use crate::error::ParseError;
use crate::format::{detect_format, FormatTag};
use crate::lexer::tokenize_line as tokenize_line_impl;
use crate::multi_line::parse_multi_line;
use crate::normalize::normalize_operators;
use crate::preprocess::preprocess;
use crate::single_line::parse_single_line;
use crate::tokens::Token;
use crate::utils::Spanned;
use crate::{log_debug, log_error, log_success};
use crate::logging::codes;

/// Parse raw query text into its canonical form. Runs preprocessing,
/// format detection, the matching validator/parser, and the operator
/// normalizer.
pub fn parse(input: &str) -> Result<ParseOutcome, ParseError> {
    let lines = preprocess(input);
    if lines.is_empty() {
        let err = ParseError::EmptyAtom {
            token: String::new(),
        };
        log_error!(codes::parse::EMPTY_ATOM, "query has no content after preprocessing");
        return Err(err);
    }

    let format = detect_format(&lines);
    log_debug!("detected format", "format" => format_label(format), "lines" => lines.len());

    let raw_canonical = match format {
        FormatTag::SingleLine => {
            let joined = lines.join(" ");
            parse_single_line(&joined)
        }
        FormatTag::MultiLine => parse_multi_line(&lines),
    };

    let raw_canonical = match raw_canonical {
        Ok(canonical) => canonical,
        Err(err) => {
            log_error!(code_for_kind(err.kind()), err.to_string().as_str());
            return Err(err);
        }
    };

    let canonical = normalize_operators(&raw_canonical);
    log_success!(codes::Code::new("I000"), "query parsed", "format" => format_label(format));

    Ok(ParseOutcome { format, canonical })
}

/// Validate raw query text without keeping the canonical output.
pub fn validate(input: &str) -> Result<(), ParseError> {
    parse(input).map(|_| ())
}

/// Compile an already-canonical expression for one dialect.
pub fn compile_for_dialect(
    canonical: &str,
    dialect: Dialect,
    rules: &DialectRules,
) -> Result<CompileResult, ParseError> {
    dialect_compile(canonical, dialect, rules)
}

/// Tokenize a single logical line, bypassing format detection and the
/// validators. Exposed for callers that want raw token-level access.
pub fn tokenize_line(line: &str) -> Result<Vec<Spanned<Token>>, ParseError> {
    tokenize_line_impl(line)
}

fn format_label(format: FormatTag) -> &'static str {
    match format {
        FormatTag::SingleLine => "single-line",
        FormatTag::MultiLine => "multi-line",
    }
}

fn code_for_kind(kind: &str) -> codes::Code {
    match kind {
        "UnterminatedQuote" => codes::parse::UNTERMINATED_QUOTE,
        "UnbalancedParens" => codes::parse::UNBALANCED_PARENS,
        "UnquotedMultiwordTerm" => codes::parse::UNQUOTED_MULTIWORD_TERM,
        "MixedOperatorsNoGroup" => codes::parse::MIXED_OPERATORS_NO_GROUP,
        "MixedOperatorsMultiLine" => codes::parse::MIXED_OPERATORS_MULTI_LINE,
        "UnrecognizedOperator" => codes::parse::UNRECOGNIZED_OPERATOR,
        "AdjacentOperators" => codes::parse::ADJACENT_OPERATORS,
        "LeadingOrTrailingOperator" => codes::parse::LEADING_OR_TRAILING_OPERATOR,
        "EmptyAtom" => codes::parse::EMPTY_ATOM,
        "CrossLineParens" => codes::parse::CROSS_LINE_PARENS,
        "BadMultiLineStructure" => codes::parse::BAD_MULTI_LINE_STRUCTURE,
        _ => codes::parse::INVALID_FIELD_TERM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_line_end_to_end() {
        let outcome = parse("\"cancer\" AND \"treatment\"").unwrap();
        assert_eq!(outcome.format, FormatTag::SingleLine);
        assert_eq!(outcome.canonical, "((\"cancer\") AND (\"treatment\"))");
    }

    #[test]
    fn parses_multi_line_end_to_end() {
        let outcome = parse("\"cancer\" OR \"tumor\"\nAND\n\"treatment\" OR \"therapy\"").unwrap();
        assert_eq!(outcome.format, FormatTag::MultiLine);
    }

    #[test]
    fn normalizes_non_canonical_operators() {
        let outcome = parse("a und b").unwrap();
        assert_eq!(outcome.canonical, "((a) AND (b))");
    }

    #[test]
    fn strips_comments_before_parsing() {
        let outcome = parse("# a note\n\"cancer\" AND \"treatment\" # inline note").unwrap();
        assert_eq!(outcome.canonical, "((\"cancer\") AND (\"treatment\"))");
    }

    #[test]
    fn validate_discards_canonical_output() {
        assert!(validate("\"cancer\" AND \"treatment\"").is_ok());
        assert!(validate("a AND").is_err());
    }

    #[test]
    fn compile_for_dialect_round_trips_through_parse() {
        let outcome = parse("\"cancer\"[MeSH] AND treatment").unwrap();
        let rules = DialectRules::default_for(Dialect::EuropePmc);
        let compiled = compile_for_dialect(&outcome.canonical, Dialect::EuropePmc, &rules).unwrap();
        assert_eq!(compiled.compiled, "((MESH:\"cancer\") AND (treatment))");
    }
}

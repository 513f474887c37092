//! The dialect compiler (§4.10): rewrites a canonical expression's field
//! terms into a target database's surface syntax, using only the token
//! spans already produced by [`crate::lexer::tokenize_line`] — every other
//! byte of the canonical string (operators, parens, quoted phrases, bare
//! words, and the spacing between them) passes through untouched.

pub mod rules;

pub use rules::{Dialect, DialectRules};

use crate::error::ParseError;
use crate::lexer::tokenize_line;
use crate::log_warning;
use crate::logging::codes;
use crate::tokens::{FieldTerm, Token};

/// A non-fatal condition surfaced by compilation — an unknown field code or
/// an exceeded bound. Never blocks producing `compiled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectWarning {
    pub code: &'static str,
    pub message: String,
}

/// The result of compiling a canonical expression for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub compiled: String,
    pub warnings: Vec<DialectWarning>,
}

/// Compile a canonical expression (the output of `parse`) for one dialect.
pub fn compile_for_dialect(
    canonical: &str,
    dialect: Dialect,
    rules: &DialectRules,
) -> Result<CompileResult, ParseError> {
    let tokens = tokenize_line(canonical)?;
    let mut out = String::with_capacity(canonical.len());
    let mut warnings = Vec::new();
    let mut last_end = 0usize;
    let mut depth: i32 = 0;
    let mut max_depth: i32 = 0;
    let mut operator_count: usize = 0;

    for spanned in &tokens {
        let start = spanned.span.start().offset;
        let end = spanned.span.end().offset;
        out.push_str(&canonical[last_end..start]);

        match &spanned.value {
            Token::LeftParen => {
                depth += 1;
                max_depth = max_depth.max(depth);
                out.push_str(&canonical[start..end]);
            }
            Token::RightParen => {
                depth -= 1;
                out.push_str(&canonical[start..end]);
            }
            Token::Operator(_) => {
                operator_count += 1;
                out.push_str(&canonical[start..end]);
            }
            Token::FieldTerm(field_term) => {
                let (replacement, warning) = rewrite_field_term(field_term, dialect, rules);
                out.push_str(&replacement);
                if let Some(warning) = warning {
                    warnings.push(warning);
                }
            }
            Token::QuotedPhrase(_) | Token::BareWord(_) => {
                out.push_str(&canonical[start..end]);
            }
        }
        last_end = end;
    }
    out.push_str(&canonical[last_end..]);

    if canonical.len() > rules.max_query_length {
        let warning = DialectWarning {
            code: codes::dialect::BOUND_EXCEEDED.as_str(),
            message: format!(
                "query length {} exceeds dialect bound {}",
                canonical.len(),
                rules.max_query_length
            ),
        };
        log_warning!(&warning.message, "code" => warning.code);
        warnings.push(warning);
    }
    if max_depth as usize > rules.max_nesting_depth {
        let warning = DialectWarning {
            code: codes::dialect::BOUND_EXCEEDED.as_str(),
            message: format!(
                "nesting depth {} exceeds dialect bound {}",
                max_depth, rules.max_nesting_depth
            ),
        };
        log_warning!(&warning.message, "code" => warning.code);
        warnings.push(warning);
    }
    if operator_count > rules.max_operators {
        let warning = DialectWarning {
            code: codes::dialect::BOUND_EXCEEDED.as_str(),
            message: format!(
                "operator count {} exceeds dialect bound {}",
                operator_count, rules.max_operators
            ),
        };
        log_warning!(&warning.message, "code" => warning.code);
        warnings.push(warning);
    }

    Ok(CompileResult {
        compiled: out,
        warnings,
    })
}

fn rewrite_field_term(
    field_term: &FieldTerm,
    dialect: Dialect,
    rules: &DialectRules,
) -> (String, Option<DialectWarning>) {
    let quote = field_term.quote.ch();

    if dialect == Dialect::Cochrane {
        // Cochrane ignores field tags entirely: keep the quoted content,
        // drop the code, regardless of what the code names.
        return (format!("{quote}{}{quote}", field_term.content), None);
    }

    let is_date_range = field_term.field_code.eq_ignore_ascii_case("pdat")
        && is_year_range(&field_term.content);

    if is_date_range {
        if dialect == Dialect::PubMed {
            return (field_term.raw.clone(), None);
        }
        let (lower, upper) = field_term.content.split_once(':').expect("checked by is_year_range");
        let rewritten = rules
            .date_range_template
            .replace("{lower}", lower)
            .replace("{upper}", upper);
        return (rewritten, None);
    }

    match dialect {
        Dialect::PubMed => (field_term.raw.clone(), None),
        Dialect::EuropePmc => match rules.field_code_map.get(&field_term.field_code) {
            Some(mapped) if mapped.as_str() == rules::STRIP => {
                (format!("{quote}{}{quote}", field_term.content), None)
            }
            Some(mapped) if mapped.as_str() == rules::PASS => (
                format!("{}:{quote}{}{quote}", field_term.field_code, field_term.content),
                None,
            ),
            Some(mapped) => (format!("{mapped}:{quote}{}{quote}", field_term.content), None),
            None => {
                let warning = DialectWarning {
                    code: codes::dialect::UNKNOWN_FIELD_CODE.as_str(),
                    message: format!(
                        "unknown field code {:?} for this dialect; passed through unchanged",
                        field_term.field_code
                    ),
                };
                (field_term.raw.clone(), Some(warning))
            }
        },
        Dialect::Cochrane => unreachable!("handled above"),
    }
}

fn is_year_range(content: &str) -> bool {
    match content.split_once(':') {
        Some((lower, upper)) => {
            lower.len() == 4
                && upper.len() == 4
                && lower.chars().all(|c| c.is_ascii_digit())
                && upper.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pubmed_passes_field_terms_through() {
        let rules = DialectRules::default_for(Dialect::PubMed);
        let result =
            compile_for_dialect("((\"cancer\"[MeSH]) AND (treatment))", Dialect::PubMed, &rules)
                .unwrap();
        assert_eq!(result.compiled, "((\"cancer\"[MeSH]) AND (treatment))");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn europe_pmc_rewrites_field_code() {
        let rules = DialectRules::default_for(Dialect::EuropePmc);
        let result = compile_for_dialect("(\"cancer\"[MeSH])", Dialect::EuropePmc, &rules).unwrap();
        assert_eq!(result.compiled, "(MESH:\"cancer\")");
    }

    #[test]
    fn europe_pmc_rewrites_date_range() {
        let rules = DialectRules::default_for(Dialect::EuropePmc);
        let result =
            compile_for_dialect("(\"2015:2025\"[pdat])", Dialect::EuropePmc, &rules).unwrap();
        assert_eq!(result.compiled, "(PUB_YEAR:(2015 TO 2025))");
    }

    #[test]
    fn pubmed_passes_date_range_through() {
        let rules = DialectRules::default_for(Dialect::PubMed);
        let result = compile_for_dialect("(\"2015:2025\"[pdat])", Dialect::PubMed, &rules).unwrap();
        assert_eq!(result.compiled, "(\"2015:2025\"[pdat])");
    }

    #[test]
    fn cochrane_strips_all_field_codes() {
        let rules = DialectRules::default_for(Dialect::Cochrane);
        let result =
            compile_for_dialect("((\"cancer\"[MeSH]) AND (\"2015:2025\"[pdat]))", Dialect::Cochrane, &rules)
                .unwrap();
        assert_eq!(result.compiled, "((\"cancer\") AND (\"2015:2025\"))");
    }

    #[test]
    fn unknown_field_code_passes_through_with_warning() {
        let rules = DialectRules::default_for(Dialect::EuropePmc);
        let result =
            compile_for_dialect("(\"cancer\"[Unknown])", Dialect::EuropePmc, &rules).unwrap();
        assert_eq!(result.compiled, "(\"cancer\"[Unknown])");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "W001");
    }

    #[test]
    fn exceeding_nesting_depth_warns_but_still_compiles() {
        let mut rules = DialectRules::default_for(Dialect::PubMed);
        rules.max_nesting_depth = 1;
        let result = compile_for_dialect("(((a) AND (b)) OR (c))", Dialect::PubMed, &rules).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("nesting depth")));
    }
}

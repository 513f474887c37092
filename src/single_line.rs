//! The single-line validator (§4.6) and parser (§4.7).
//!
//! Validation and canonicalization are driven by the same pass: both need to
//! walk the same grammar, and the parser's iterative innermost-parenthesis
//! unfolding already proves the grammar holds at every nesting level it
//! visits. `validate_single_line` runs the full pass and discards the
//! canonical text; `parse_single_line` keeps it.
//!
//! Unfolding uses placeholder markers rather than re-embedding each group's
//! canonical (already-parenthesized) text back into the working string —
//! doing that directly would leave unquoted `(` characters behind for the
//! scanner to rediscover on every subsequent pass, so the same leaf group
//! would be "found" forever instead of the scan making progress. A marker is
//! an ordinary bare word (`_G_<n>_`) that stands in for an already-resolved
//! group until the final assembly pass substitutes its stored text back in.
//!
//! A marker's *text* is not what makes it a marker, though: `_G_0_` is also
//! a perfectly valid bare-word atom under §9's grammar, so a query that
//! happens to contain that literal word must not be mistaken for a group
//! reference. Each substitution is recorded out of band as a byte span in
//! `working` (shifted as later substitutions change the string's length);
//! only a token whose own span exactly matches a recorded substitution is
//! treated as a group. A same-shaped token anywhere else is just a word.

use crate::error::ParseError;
use crate::lexer::tokenize_line;
use crate::operators::Operator;
use crate::scanner::{find_innermost_parens, is_balanced};
use crate::tokens::Token;

/// Validate a single-line query without producing canonical output.
pub fn validate_single_line(text: &str) -> Result<(), ParseError> {
    canonicalize_single_line(text).map(|_| ())
}

/// Parse a single-line query into its fully parenthesized canonical form.
pub fn parse_single_line(text: &str) -> Result<String, ParseError> {
    canonicalize_single_line(text)
}

fn canonicalize_single_line(text: &str) -> Result<String, ParseError> {
    let normalized = normalize_whitespace(text);

    if !is_balanced(&normalized) {
        return Err(ParseError::UnbalancedParens);
    }

    let mut working = normalized;
    let mut groups: Vec<String> = Vec::new();
    // (start, end, group index) byte spans of markers currently in `working`.
    let mut marker_spans: Vec<(usize, usize, usize)> = Vec::new();

    while let Some((start, end)) = find_innermost_parens(&working) {
        let inner_start = start + 1;
        let inner_end = end - 1;
        let inner = &working[inner_start..inner_end];
        if inner.trim().is_empty() {
            return Err(ParseError::EmptyAtom {
                token: "()".to_string(),
            });
        }

        let inner_markers: Vec<(usize, usize, usize)> = marker_spans
            .iter()
            .filter(|(s, e, _)| *s >= inner_start && *e <= inner_end)
            .map(|(s, e, idx)| (s - inner_start, e - inner_start, *idx))
            .collect();
        let canonical = assemble_level(inner, &inner_markers, &groups)?;

        let group_idx = groups.len();
        let marker = group_marker(group_idx);
        groups.push(canonical);

        // Markers wholly inside the group just consumed are already folded
        // into its canonical text; drop them, then shift everything after
        // the replaced span by however much the marker changed its length.
        marker_spans.retain(|(s, e, _)| !(*s >= start && *e <= end));
        let delta = marker.len() as isize - (end - start) as isize;
        if delta != 0 {
            for (s, e, _) in marker_spans.iter_mut() {
                if *s >= end {
                    *s = (*s as isize + delta) as usize;
                    *e = (*e as isize + delta) as usize;
                }
            }
        }
        marker_spans.push((start, start + marker.len(), group_idx));

        working.replace_range(start..end, &marker);
    }

    assemble_level(&working, &marker_spans, &groups)
}

/// Collapse runs of whitespace to a single space outside quoted regions,
/// and trim the ends. Quoted content (including a trailing field-code
/// bracket) is copied verbatim since internal spacing there is meaningful.
fn normalize_whitespace(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut last_was_space = true; // swallow leading whitespace

    while i < n {
        let c = chars[i];
        if c == '"' || c == '\'' {
            let quote = c;
            let start = i;
            i += 1;
            while i < n && chars[i] != quote {
                i += 1;
            }
            if i < n {
                i += 1;
            }
            if i < n && chars[i] == '[' {
                while i < n && chars[i] != ']' {
                    i += 1;
                }
                if i < n {
                    i += 1;
                }
            }
            out.extend(&chars[start..i]);
            last_was_space = false;
            continue;
        }
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
            i += 1;
            continue;
        }
        out.push(c);
        last_was_space = false;
        i += 1;
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}

fn group_marker(idx: usize) -> String {
    format!("_G_{idx}_")
}

#[derive(Debug, Clone)]
enum Entry {
    Atom { text: String, is_group: bool },
    Op(Operator),
}

impl Entry {
    fn display_text(&self) -> &str {
        match self {
            Entry::Atom { text, .. } => text,
            Entry::Op(op) => op.canonical(),
        }
    }
}

/// Tokenize and assemble one nesting level (guaranteed free of unquoted
/// parens — either the whole query when it has none, or the interior of an
/// innermost group) into its canonical binary-composition form.
///
/// `marker_spans` are the (start, end, group index) byte spans, relative to
/// `text`, that this level's text substitution actually inserted — a token
/// is a group reference only if its own span is one of these, never merely
/// because its text happens to look like one (see the module doc comment).
fn assemble_level(
    text: &str,
    marker_spans: &[(usize, usize, usize)],
    groups: &[String],
) -> Result<String, ParseError> {
    let tokens = tokenize_line(text)?;
    let mut entries = Vec::with_capacity(tokens.len());

    for spanned in tokens {
        let (tok_start, tok_end) = (spanned.span.start.offset, spanned.span.end.offset);
        if let Some(&(_, _, idx)) = marker_spans
            .iter()
            .find(|(s, e, _)| *s == tok_start && *e == tok_end)
        {
            entries.push(Entry::Atom {
                text: groups[idx].clone(),
                is_group: true,
            });
            continue;
        }

        match spanned.value {
            Token::Operator(op) => entries.push(Entry::Op(op)),
            Token::LeftParen | Token::RightParen => return Err(ParseError::UnbalancedParens),
            Token::BareWord(word) => entries.push(Entry::Atom {
                text: word,
                is_group: false,
            }),
            other @ (Token::QuotedPhrase(_) | Token::FieldTerm(_)) => entries.push(Entry::Atom {
                text: other.atom_text().to_string(),
                is_group: false,
            }),
        }
    }

    assemble_entries(entries)
}

fn assemble_entries(entries: Vec<Entry>) -> Result<String, ParseError> {
    if entries.is_empty() {
        return Err(ParseError::EmptyAtom {
            token: "()".to_string(),
        });
    }

    if let Some(Entry::Op(op)) = entries.first() {
        return Err(ParseError::LeadingOrTrailingOperator {
            operator: op.canonical().to_string(),
        });
    }
    if let Some(Entry::Op(op)) = entries.last() {
        return Err(ParseError::LeadingOrTrailingOperator {
            operator: op.canonical().to_string(),
        });
    }

    let mut distinct_ops: Vec<Operator> = Vec::new();
    for i in 0..entries.len() {
        match &entries[i] {
            Entry::Atom { .. } => {
                if let Some(next) = entries.get(i + 1) {
                    match next {
                        Entry::Op(op) => {
                            if !distinct_ops.contains(op) {
                                distinct_ops.push(*op);
                            }
                        }
                        Entry::Atom { .. } => {
                            return Err(ParseError::UnquotedMultiwordTerm {
                                token: format!(
                                    "{} {}",
                                    entries[i].display_text(),
                                    next.display_text()
                                ),
                            });
                        }
                    }
                }
            }
            Entry::Op(op1) => {
                if let Some(Entry::Op(op2)) = entries.get(i + 1) {
                    return Err(ParseError::AdjacentOperators {
                        first: op1.canonical().to_string(),
                        second: op2.canonical().to_string(),
                    });
                }
            }
        }
    }

    if distinct_ops.len() > 1 {
        return Err(ParseError::MixedOperatorsNoGroup {
            first: distinct_ops[0].canonical(),
            second: distinct_ops[1].canonical(),
        });
    }

    let mut iter = entries.into_iter();
    let first = iter.next().expect("checked non-empty above");
    let (mut current_text, mut current_is_group) = match first {
        Entry::Atom { text, is_group } => (text, is_group),
        Entry::Op(_) => unreachable!("leading-operator check already ran"),
    };
    let mut composed = false;

    loop {
        let op = match iter.next() {
            None => break,
            Some(Entry::Op(op)) => op,
            Some(Entry::Atom { .. }) => unreachable!("alternation already validated"),
        };
        let (next_text, next_is_group) = match iter.next() {
            Some(Entry::Atom { text, is_group }) => (text, is_group),
            _ => unreachable!("trailing-operator check already ran"),
        };

        let left = if current_is_group {
            current_text
        } else {
            format!("({current_text})")
        };
        let right = if next_is_group {
            next_text
        } else {
            format!("({next_text})")
        };
        current_text = format!("{left} {} {right}", op.canonical());
        current_is_group = false;
        composed = true;
    }

    if composed {
        Ok(format!("({current_text})"))
    } else if current_is_group {
        Ok(current_text)
    } else {
        Ok(format!("({current_text})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_atom_wraps_once() {
        assert_eq!(parse_single_line("cancer").unwrap(), "(cancer)");
    }

    #[test]
    fn simple_conjunction() {
        assert_eq!(
            parse_single_line("\"cancer\" AND \"treatment\"").unwrap(),
            "((\"cancer\") AND (\"treatment\"))"
        );
    }

    #[test]
    fn grouped_disjunction_then_conjunction() {
        let out = parse_single_line("(\"cancer\" OR \"tumor\") AND \"treatment\"").unwrap();
        assert_eq!(
            out,
            "(((\"cancer\") OR (\"tumor\")) AND (\"treatment\"))"
        );
    }

    #[test]
    fn nested_groups_unfold_innermost_first() {
        let out = parse_single_line("((a OR b) AND c)").unwrap();
        assert_eq!(out, "(((a) OR (b)) AND (c))");
    }

    #[test]
    fn same_operator_chain_is_left_associative() {
        let out = parse_single_line("a AND b AND c").unwrap();
        assert_eq!(out, "(((a) AND (b)) AND (c))");
    }

    #[test]
    fn mixed_operators_without_grouping_is_rejected() {
        let err = parse_single_line("a AND b OR c").unwrap_err();
        assert_eq!(err.kind(), "MixedOperatorsNoGroup");
    }

    #[test]
    fn unbalanced_parens_is_rejected() {
        let err = parse_single_line("(a AND b").unwrap_err();
        assert_eq!(err.kind(), "UnbalancedParens");
    }

    #[test]
    fn adjacent_operators_are_rejected() {
        let err = parse_single_line("a AND OR b").unwrap_err();
        assert_eq!(err.kind(), "AdjacentOperators");
    }

    #[test]
    fn leading_operator_is_rejected() {
        let err = parse_single_line("AND a").unwrap_err();
        assert_eq!(err.kind(), "LeadingOrTrailingOperator");
    }

    #[test]
    fn trailing_operator_is_rejected() {
        let err = parse_single_line("a AND").unwrap_err();
        assert_eq!(err.kind(), "LeadingOrTrailingOperator");
    }

    #[test]
    fn unquoted_multiword_term_is_rejected() {
        let err = parse_single_line("Coenzym Q10 AND b").unwrap_err();
        assert_eq!(err.kind(), "UnquotedMultiwordTerm");
    }

    #[test]
    fn empty_group_is_rejected() {
        let err = parse_single_line("a AND ()").unwrap_err();
        assert_eq!(err.kind(), "EmptyAtom");
    }

    #[test]
    fn field_term_is_kept_atomic() {
        let out = parse_single_line("\"cancer\"[MeSH] AND treatment").unwrap();
        assert_eq!(out, "((\"cancer\"[MeSH]) AND (treatment))");
    }

    #[test]
    fn whitespace_runs_are_normalized_outside_quotes() {
        let out = parse_single_line("a    AND\tb").unwrap();
        assert_eq!(out, "((a) AND (b))");
    }

    #[test]
    fn quoted_internal_whitespace_is_preserved() {
        let out = parse_single_line("\"Coenzym  Q10\"").unwrap();
        assert_eq!(out, "(\"Coenzym  Q10\")");
    }

    #[test]
    fn parsing_canonical_output_is_idempotent() {
        let once = parse_single_line("(\"cancer\" OR \"tumor\") AND \"treatment\"").unwrap();
        let twice = parse_single_line(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn bare_atom_wrapped_in_redundant_parens_is_idempotent() {
        let once = parse_single_line("cancer").unwrap();
        let twice = parse_single_line(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn literal_atom_shaped_like_a_group_marker_is_an_ordinary_word() {
        // `_G_0_` is a valid bare word (§9) that happens to collide with the
        // internal group-marker text this module generates. It must parse
        // as itself, not be mistaken for an unresolved group reference.
        assert_eq!(parse_single_line("_G_0_").unwrap(), "(_G_0_)");
    }

    #[test]
    fn literal_marker_shaped_atom_survives_alongside_a_real_group() {
        let out = parse_single_line("(_G_0_ OR a) AND _G_1_").unwrap();
        assert_eq!(out, "(((_G_0_) OR (a)) AND (_G_1_))");
    }
}

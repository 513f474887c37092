//! The tokenizer (§4.3): splits a logical line into tokens while preserving
//! quoted regions and field-term atoms. This is the `tokenize_line` public
//! entry point from §6.
//!
//! The splitter is a small state machine tracking two facts: whether the
//! cursor is inside a quoted region (and which quote char opened it), and
//! whether it is inside a field-code bracket region opened immediately
//! after a matching close-quote. It does not validate grammar — it only
//! fails on unterminated quotes or malformed field-term brackets, both of
//! which prevent it from ever producing a complete token.

use crate::error::ParseError;
use crate::tokens::{classify_token, Token};
use crate::utils::{Position, Span, Spanned};

/// Tokenize one logical line. Whitespace outside quoted/bracketed regions
/// is a token boundary; `(` and `)` are always standalone one-character
/// tokens outside those regions.
pub fn tokenize_line(line: &str) -> Result<Vec<Spanned<Token>>, ParseError> {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut tokens = Vec::new();
    let mut pos = Position::start();
    let mut i = 0;

    while i < n {
        let c = chars[i];

        if c.is_whitespace() {
            pos = pos.advance(c);
            i += 1;
            continue;
        }

        if c == '(' || c == ')' {
            let start = pos;
            let token = if c == '(' { Token::LeftParen } else { Token::RightParen };
            pos = pos.advance(c);
            tokens.push(Spanned::new(token, Span::new(start, pos)));
            i += 1;
            continue;
        }

        if c == '"' || c == '\'' {
            let quote = c;
            let start_pos = pos;
            let start_idx = i;
            let mut j = i + 1;
            while j < n && chars[j] != quote {
                j += 1;
            }
            if j >= n {
                return Err(ParseError::UnterminatedQuote {
                    quote,
                    position: start_idx,
                });
            }
            // `j` is the closing quote. If immediately followed (no
            // whitespace gap) by '[', this is a field-term attempt and the
            // bracket region is absorbed into the same token, stopping at
            // the first ']', or at whitespace/paren/end-of-line if the
            // bracket is malformed (the classifier reports the specifics).
            let mut end = j + 1;
            if end < n && chars[end] == '[' {
                let mut k = end;
                while k < n {
                    let kc = chars[k];
                    if kc.is_whitespace() || kc == '(' || kc == ')' {
                        break;
                    }
                    k += 1;
                    if kc == ']' {
                        break;
                    }
                }
                end = k;
            }

            let text: String = chars[start_idx..end].iter().collect();
            let end_pos = chars[start_idx..end]
                .iter()
                .fold(start_pos, |p, &ch| p.advance(ch));
            let token = classify_token(&text)?;
            tokens.push(Spanned::new(token, Span::new(start_pos, end_pos)));
            pos = end_pos;
            i = end;
            continue;
        }

        // Bare word or operator: consume until whitespace or a paren.
        let start_pos = pos;
        let start_idx = i;
        let mut j = i;
        while j < n {
            let jc = chars[j];
            if jc.is_whitespace() || jc == '(' || jc == ')' {
                break;
            }
            j += 1;
        }
        let text: String = chars[start_idx..j].iter().collect();
        let end_pos = chars[start_idx..j]
            .iter()
            .fold(start_pos, |p, &ch| p.advance(ch));
        let token = classify_token(&text)?;
        tokens.push(Spanned::new(token, Span::new(start_pos, end_pos)));
        pos = end_pos;
        i = j;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Operator;

    fn kinds(line: &str) -> Vec<Token> {
        tokenize_line(line)
            .unwrap()
            .into_iter()
            .map(|s| s.value)
            .collect()
    }

    #[test]
    fn tokenizes_simple_conjunction() {
        let toks = kinds("\"cancer\" AND \"treatment\"");
        assert_eq!(toks.len(), 3);
        assert!(matches!(toks[1], Token::Operator(Operator::And)));
    }

    #[test]
    fn parens_are_standalone_even_without_spaces() {
        let toks = kinds("(cancer)");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0], Token::LeftParen);
        assert_eq!(toks[2], Token::RightParen);
    }

    #[test]
    fn field_term_is_one_token() {
        let toks = kinds("\"cancer\"[MeSH] AND treatment");
        assert_eq!(toks.len(), 3);
        assert!(matches!(toks[0], Token::FieldTerm(_)));
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = tokenize_line("\"cancer AND treatment").unwrap_err();
        assert_eq!(err.kind(), "UnterminatedQuote");
    }

    #[test]
    fn mismatched_quote_style_is_unterminated() {
        // Open question (spec §9) resolved: "…' is UnterminatedQuote.
        let err = tokenize_line("\"cancer'").unwrap_err();
        assert_eq!(err.kind(), "UnterminatedQuote");
    }

    #[test]
    fn malformed_field_term_bracket_reports_invalid_field_term() {
        let err = tokenize_line("\"cancer\"[MeSH").unwrap_err();
        assert_eq!(err.kind(), "InvalidFieldTerm");
    }
}

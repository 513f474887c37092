//! The token model (§3) and the token classifier (§4.2), including the
//! field-term micro-grammar (§4.2.1).
//!
//! Tokens here are already-split substrings (the lexer owns splitting,
//! respecting quote and field-code-bracket atomicity); this module only
//! decides which of the five variants a given substring is.

use crate::error::ParseError;
use crate::operators::{normalize_op, Operator};

/// Which quote character opened a quoted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Double,
    Single,
}

impl QuoteStyle {
    pub fn ch(self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(QuoteStyle::Double),
            '\'' => Some(QuoteStyle::Single),
            _ => None,
        }
    }
}

/// A quoted phrase atom: `"content"` or `'content'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedPhrase {
    /// Exact source text, quotes included.
    pub raw: String,
    pub content: String,
    pub quote: QuoteStyle,
}

/// An atomic field-term token: `"content"[CODE]` or `'content'[CODE]`.
/// Superficially resembles a quoted phrase followed by a bracketed group,
/// but is never decomposed further — see §4.2.1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTerm {
    /// Exact source text, quotes and brackets included.
    pub raw: String,
    pub content: String,
    pub quote: QuoteStyle,
    pub field_code: String,
}

/// One of the five atomic parse units within a single logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Operator(Operator),
    QuotedPhrase(QuotedPhrase),
    FieldTerm(FieldTerm),
    LeftParen,
    RightParen,
    BareWord(String),
}

impl Token {
    /// True for the three atom variants (quoted phrase, field term, bare
    /// word) — everything that is neither an operator nor a delimiter.
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            Token::QuotedPhrase(_) | Token::FieldTerm(_) | Token::BareWord(_)
        )
    }

    /// The exact source text for an atom token, used verbatim in canonical
    /// output. Only ever called after `is_atom` has been checked.
    pub fn atom_text(&self) -> &str {
        match self {
            Token::QuotedPhrase(q) => &q.raw,
            Token::FieldTerm(f) => &f.raw,
            Token::BareWord(w) => w,
            _ => unreachable!("atom_text called on a non-atom token"),
        }
    }
}

/// Classify a single already-split token string. Classification order
/// matters (§4.2): grouping delimiters, then operators, then field terms,
/// then quoted phrases, and finally bare words.
pub fn classify_token(s: &str) -> Result<Token, ParseError> {
    if s == "(" {
        return Ok(Token::LeftParen);
    }
    if s == ")" {
        return Ok(Token::RightParen);
    }
    if let Some(op) = normalize_op(s) {
        return Ok(Token::Operator(op));
    }
    if s == "\"\"" || s == "''" {
        return Err(ParseError::EmptyAtom {
            token: s.to_string(),
        });
    }

    if looks_like_field_term_attempt(s) {
        return parse_field_term(s).map(Token::FieldTerm);
    }

    if let Some(phrase) = try_quoted_phrase(s) {
        return Ok(Token::QuotedPhrase(phrase));
    }

    if is_valid_bare_word(s) {
        return Ok(Token::BareWord(s.to_string()));
    }

    Err(ParseError::UnquotedMultiwordTerm {
        token: s.to_string(),
    })
}

fn try_quoted_phrase(s: &str) -> Option<QuotedPhrase> {
    let quote_char = s.chars().next()?;
    let quote = QuoteStyle::from_char(quote_char)?;
    if s.len() < 2 || !s.ends_with(quote_char) {
        return None;
    }
    let content = &s[quote_char.len_utf8()..s.len() - quote_char.len_utf8()];
    if content.is_empty() {
        return None;
    }
    Some(QuotedPhrase {
        raw: s.to_string(),
        content: content.to_string(),
        quote,
    })
}

/// Enforce the field-term micro-grammar (§4.2.1): a single quote character,
/// one or more arbitrary characters, the same quote character, `[`, one or
/// more alphanumeric-or-underscore characters, `]`, with nothing before or
/// after the whole span.
///
/// Whether a token is *attempting* the field-term shape at all — as
/// opposed to a plain quoted phrase — can't be decided by checking the
/// token's trailing character, since a malformed field term (missing `]`,
/// for instance) never ends in `]`. Instead this looks for the one
/// sequence a quoted phrase can never contain: the opening quote
/// character again, immediately followed by `[`. The tokenizer only ever
/// terminates a quoted region at the first occurrence of the matching
/// quote character, so that character cannot recur inside the content —
/// if it does recur followed by `[`, this token is either a well-formed or
/// a malformed field term, never a bare quoted phrase.
fn looks_like_field_term_attempt(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() < 2 {
        return false;
    }
    let quote_char = chars[0];
    if quote_char != '"' && quote_char != '\'' {
        return false;
    }
    (1..chars.len() - 1).any(|i| chars[i] == quote_char && chars[i + 1] == '[')
}

fn parse_field_term(s: &str) -> Result<FieldTerm, ParseError> {
    let chars: Vec<char> = s.chars().collect();
    let quote_char = chars[0];
    let quote = match QuoteStyle::from_char(quote_char) {
        Some(q) => q,
        None => {
            return Err(ParseError::InvalidFieldTerm {
                token: s.to_string(),
                reason: "missing outer quote".to_string(),
            })
        }
    };

    // The closing quote is the last occurrence of the opening quote
    // character that is immediately followed by '['. This rejects
    // mismatched quote styles (no such pair will be found).
    let mut close_idx = None;
    for i in (1..chars.len() - 1).rev() {
        if chars[i] == quote_char && chars[i + 1] == '[' {
            close_idx = Some(i);
            break;
        }
    }
    let close_idx = match close_idx {
        Some(i) => i,
        None => {
            return Err(ParseError::InvalidFieldTerm {
                token: s.to_string(),
                reason: "missing '[' after the closing quote, or mismatched quote style"
                    .to_string(),
            })
        }
    };

    let content: String = chars[1..close_idx].iter().collect();
    if content.is_empty() {
        return Err(ParseError::InvalidFieldTerm {
            token: s.to_string(),
            reason: "empty quoted content".to_string(),
        });
    }

    let bracket_open = close_idx + 1; // index of '['
    let code_start = bracket_open + 1;
    let bracket_close = chars[code_start..].iter().position(|&c| c == ']');
    let bracket_close = match bracket_close {
        Some(rel) => code_start + rel,
        None => {
            return Err(ParseError::InvalidFieldTerm {
                token: s.to_string(),
                reason: "missing closing ']'".to_string(),
            })
        }
    };

    let field_code: String = chars[code_start..bracket_close].iter().collect();
    if field_code.is_empty() {
        return Err(ParseError::InvalidFieldTerm {
            token: s.to_string(),
            reason: "empty field code".to_string(),
        });
    }
    if !field_code.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ParseError::InvalidFieldTerm {
            token: s.to_string(),
            reason: format!("field code {:?} is not alphanumeric/underscore", field_code),
        });
    }

    if bracket_close != chars.len() - 1 {
        return Err(ParseError::InvalidFieldTerm {
            token: s.to_string(),
            reason: "extra characters after ']'".to_string(),
        });
    }

    Ok(FieldTerm {
        raw: s.to_string(),
        content,
        quote,
        field_code,
    })
}

/// Open Question (spec §9) resolved: a bare atom matches `\w[\w.\-]*` with
/// no internal whitespace; anything else must be quoted.
pub fn is_valid_bare_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_delimiters_and_operators() {
        assert_eq!(classify_token("(").unwrap(), Token::LeftParen);
        assert_eq!(classify_token(")").unwrap(), Token::RightParen);
        assert_eq!(
            classify_token("AND").unwrap(),
            Token::Operator(Operator::And)
        );
        assert_eq!(
            classify_token("oder").unwrap(),
            Token::Operator(Operator::Or)
        );
    }

    #[test]
    fn classifies_quoted_phrase() {
        match classify_token("\"cancer treatment\"").unwrap() {
            Token::QuotedPhrase(q) => {
                assert_eq!(q.content, "cancer treatment");
                assert_eq!(q.quote, QuoteStyle::Double);
            }
            other => panic!("expected quoted phrase, got {:?}", other),
        }
    }

    #[test]
    fn classifies_field_term() {
        match classify_token("\"cancer\"[MeSH]").unwrap() {
            Token::FieldTerm(f) => {
                assert_eq!(f.content, "cancer");
                assert_eq!(f.field_code, "MeSH");
                assert_eq!(f.raw, "\"cancer\"[MeSH]");
            }
            other => panic!("expected field term, got {:?}", other),
        }
    }

    #[test]
    fn rejects_field_term_with_empty_code() {
        let err = classify_token("\"cancer\"[]").unwrap_err();
        assert_eq!(err.kind(), "InvalidFieldTerm");
    }

    #[test]
    fn rejects_field_term_with_extra_trailing_chars() {
        let err = classify_token("\"cancer\"[MeSH]x").unwrap_err();
        assert_eq!(err.kind(), "InvalidFieldTerm");
    }

    #[test]
    fn rejects_field_term_missing_closing_bracket() {
        let err = classify_token("\"cancer\"[MeSH").unwrap_err();
        assert_eq!(err.kind(), "InvalidFieldTerm");
    }

    #[test]
    fn classifies_bare_word() {
        assert_eq!(
            classify_token("cancer").unwrap(),
            Token::BareWord("cancer".to_string())
        );
        assert_eq!(
            classify_token("COVID-19").unwrap(),
            Token::BareWord("COVID-19".to_string())
        );
    }

    #[test]
    fn empty_quote_pair_is_empty_atom() {
        assert_eq!(classify_token("\"\"").unwrap_err().kind(), "EmptyAtom");
        assert_eq!(classify_token("''").unwrap_err().kind(), "EmptyAtom");
    }

    #[test]
    fn bare_word_rejects_internal_punctuation() {
        assert!(classify_token("cancer,treatment").is_err());
    }
}

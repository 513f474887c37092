//! Shared primitive types used across the tokenizer, parsers, and
//! diagnostics: source positions and spans.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};

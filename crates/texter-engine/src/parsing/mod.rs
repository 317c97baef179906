//! Markup parsing: turning tag soup back into a node tree.
//!
//! The grammar is the small subset the renderer emits: lowercase elements
//! with double-quoted attributes, text with `&`-entities, no comments, no
//! self-closing tags. Parsing is strict; malformed input is reported, not
//! repaired.

mod cursor;
mod parser;

pub use parser::parse;

/// Errors for markup that the strict grammar rejects.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input inside a tag")]
    UnexpectedEof,
    #[error("malformed tag at byte {at}")]
    MalformedTag { at: usize },
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedClosingTag { expected: String, found: String },
    #[error("closing tag </{name}> without a matching open element")]
    StrayClosingTag { name: String },
    #[error("element <{name}> is never closed")]
    UnclosedElement { name: String },
}

//! Lexical layer shared by the catalog and assignment parsers

pub mod lines;
pub mod tokenizer;

pub use lines::{lines, Line, Span};
pub use tokenizer::{tokenize, CheckRef, TokenizeError};

//! Tokenizer for Quark source files.
//!
//! Produces a flat [`Token`] stream, including synthetic `Newline`/
//! `Indent`/`Dedent` tokens that make the parser's indentation handling a
//! matter of matching token kinds rather than comparing whitespace widths
//! itself.

#![allow(non_camel_case_types)]

mod lexer;
mod token;

pub use lexer::tokenize;
pub use token::{Token, TokenKind};

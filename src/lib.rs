//! Wires the tokenizer, parser, and module loader together for the
//! `quark` command-line tool.

pub mod driver;

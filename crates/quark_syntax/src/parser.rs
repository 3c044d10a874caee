#![allow(dead_code)]

//! Recursive-descent parser with a Pratt expression sub-parser.
//!
//! Grounded in the teacher's `syntax::parser` (cursor-based, one-token
//! lookahead, `expect`/`bump_if` helpers, a `stacker`-backed recursion
//! guard), adapted to:
//! - operate on the pre-tokenized `Vec<Token>` `quark_lexer::tokenize`
//!   returns, rather than a pull-based streaming `Lexer`,
//! - never panic-mode resynchronize: a failed production records its
//!   error and the enclosing statement list skips tokens up to the next
//!   `Newline`/`Dedent`/`Eof` before continuing, instead of the teacher's
//!   keyword-scanning `Parser::sync`.

mod common;
mod expr;
mod module;
mod stmt;

#[cfg(test)]
mod tests;

use lexer::{Token, TokenKind};
use span::Span;

use crate::ast::Node;
use crate::{Error, Result};

/// Parses `source` into a `CompilationUnit`, together with every error
/// collected along the way. The tree is always returned, even when
/// `errors` is non-empty, per the error-handling design's best-effort
/// contract.
pub fn parse(source: &str) -> (Node<'_>, Vec<Error>) {
  let tokens = lexer::tokenize(source);
  let mut parser = Parser::new(tokens);
  let unit = parser.compilation_unit();
  (unit, parser.errors)
}

pub struct Parser<'src> {
  tokens: Vec<Token<'src>>,
  pos: usize,
  errors: Vec<Error>,
}

// A single parse_xxx call consumes a modest, roughly-bounded amount of
// stack; this bound is the teacher's own estimate, kept as-is since
// nothing about swapping the grammar changes the cost of a single frame.
const MINIMUM_STACK_REQUIRED: usize = 64_000;

impl<'src> Parser<'src> {
  fn new(tokens: Vec<Token<'src>>) -> Self {
    assert!(!tokens.is_empty(), "tokenize always emits a trailing Eof");
    Self {
      tokens,
      pos: 0,
      errors: Vec::new(),
    }
  }

  fn last_index(&self) -> usize {
    self.tokens.len() - 1
  }

  fn current(&self) -> &Token<'src> {
    &self.tokens[self.pos.min(self.last_index())]
  }

  fn peek(&self, k: usize) -> &Token<'src> {
    &self.tokens[(self.pos + k).min(self.last_index())]
  }

  fn previous(&self) -> &Token<'src> {
    &self.tokens[self.pos.saturating_sub(1).min(self.last_index())]
  }

  fn at(&self, kind: TokenKind) -> bool {
    self.current().kind == kind
  }

  fn at_eof(&self) -> bool {
    self.at(TokenKind::Eof)
  }

  fn bump(&mut self) -> Token<'src> {
    let token = self.current().clone();
    if self.pos < self.last_index() {
      self.pos += 1;
    }
    if self.at(TokenKind::Tok_Error) {
      let token = self.current().clone();
      self
        .errors
        .push(Error::new(format!("invalid token `{}`", token.lexeme), token.span));
    }
    token
  }

  fn bump_if(&mut self, kind: TokenKind) -> bool {
    if self.at(kind) {
      self.bump();
      true
    } else {
      false
    }
  }

  fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>> {
    if self.at(kind) {
      Ok(self.bump())
    } else {
      let token = self.current().clone();
      let message = format!("line {}: expected {:?} but got {:?}", token.line, kind, token.kind);
      let error = Error::new(message, token.span);
      self.errors.push(error.clone());
      Err(error)
    }
  }

  /// `module` is not a reserved word (there is no `Kw_Module`), so
  /// recognizing it at statement position is a plain lexeme comparison,
  /// exactly like `_` being nothing more than an `Identifier` whose
  /// literal happens to be `_`.
  fn at_soft_keyword(&self, word: &str) -> bool {
    self.at(TokenKind::Lit_Ident) && self.current().lexeme.as_ref() == word
  }

  fn skip_newlines(&mut self) {
    while self.bump_if(TokenKind::Newline) {}
  }

  /// The parser's entire error-recovery policy: skip tokens up to (but
  /// not past) the next `Newline`/`Dedent`/`Eof`, then consume a single
  /// trailing `Newline`. No keyword-scanning, no panic-mode resync.
  fn recover_to_next_statement(&mut self) {
    while !matches!(self.current().kind, TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof) {
      self.bump();
    }
    self.bump_if(TokenKind::Newline);
  }

  fn check_recursion_limit(&mut self, span: Span) -> Result<()> {
    if stacker::remaining_stack()
      .map(|available| available > MINIMUM_STACK_REQUIRED)
      .unwrap_or(true)
    {
      Ok(())
    } else {
      let error = Error::new("nesting limit reached", span);
      self.errors.push(error.clone());
      Err(error)
    }
  }
}

use super::Parser;
use crate::ast::{self, Node};

impl<'src> Parser<'src> {
  /// Top level: skip leading `Newline`s and dispatch each statement
  /// until `Eof`, per §4.2. A production that fails leaves its error on
  /// `self.errors` and is skipped rather than aborting the whole parse.
  pub(super) fn compilation_unit(&mut self) -> Node<'src> {
    let start = self.current().span;
    let mut children = Vec::new();

    loop {
      self.skip_newlines();
      if self.at_eof() {
        break;
      }
      match self.stmt() {
        Ok(node) => children.push(node),
        Err(_) => self.recover_to_next_statement(),
      }
    }

    let end = children.last().map(Node::span).unwrap_or(start);
    Node::CompilationUnit(ast::CompilationUnit {
      span: start.join(end),
      children,
    })
  }
}

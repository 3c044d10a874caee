use lexer::TokenKind;

use super::Parser;
use crate::ast::{self, Node};
use crate::unescape::unescape;
use crate::Result;

impl<'src> Parser<'src> {
  pub(super) fn ident(&mut self) -> Result<Node<'src>> {
    let token = self.expect(TokenKind::Lit_Ident)?;
    Ok(ast::ident(token.span, token.lexeme))
  }

  pub(super) fn literal(&mut self) -> Result<Node<'src>> {
    let token = self.current().clone();
    let value = match token.kind {
      TokenKind::Lit_Number => match token.lexeme.parse::<f64>() {
        Ok(n) => ast::LiteralValue::Number(n),
        Err(e) => {
          let error = crate::Error::new(format!("invalid number: {e}"), token.span);
          self.errors.push(error.clone());
          return Err(error);
        }
      },
      TokenKind::Lit_String => match unescape(&token.lexeme) {
        Some(s) => ast::LiteralValue::String(s.into()),
        None => {
          let error = crate::Error::new("invalid escape sequence in string", token.span);
          self.errors.push(error.clone());
          return Err(error);
        }
      },
      TokenKind::Lit_True => ast::LiteralValue::Bool(true),
      TokenKind::Lit_False => ast::LiteralValue::Bool(false),
      TokenKind::Lit_Null => ast::LiteralValue::Null,
      _ => unreachable!("Parser::literal is only called when the current token is a literal"),
    };
    self.bump();
    Ok(Node::Literal(ast::Literal { span: token.span, value }))
  }
}

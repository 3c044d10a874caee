//! Pratt expression parser.
//!
//! A single `expr_bp` loop driven by a `binding_power` table, in the
//! conventional style represented in the corpus (e.g. the `p2sh`
//! reference parser's `Precedence`/`peek_precedence` pair), rather than
//! the teacher's own ladder of a dozen near-identical `*_expr` methods —
//! this collapses that ladder into one data-driven loop, per the
//! precedence classes fixed for this grammar.

use lexer::TokenKind;
use span::Span;

use super::Parser;
use crate::ast::{self, BinaryOp, Node, UnaryOp};
use crate::{Error, Result};

/// `(left binding power, right binding power)` for a left-associative
/// infix operator at precedence level `p`: a caller holding a minimum of
/// `min_bp` takes this operator only if `min_bp <= left`, and then parses
/// its right-hand side with `expr_bp(right)`. `right = left + 1` is what
/// makes repeated application of the same operator fold left.
fn binding_power(kind: TokenKind) -> Option<(u8, u8)> {
  use TokenKind::*;
  Some(match kind {
    Op_Pipe => (2, 3),
    Kw_Or => (4, 5),
    Kw_And => (6, 7),
    Op_EqualEqual | Op_BangEqual | Op_Less | Op_LessEqual | Op_More | Op_MoreEqual => (10, 11),
    Op_Range => (12, 13),
    Op_Plus | Op_Minus => (14, 15),
    Op_Star | Op_Slash | Op_Percent => (16, 17),
    _ => return None,
  })
}

/// Minimum binding power for one pattern-item of a `when` arm: sits strictly
/// above `or`'s right bp (5) so a bare `or` between pattern items is left
/// for `Parser::pattern` to consume as a separator, but at or below `and`'s
/// left bp (6) so `and` still combines within a single pattern item.
const PATTERN_BP: u8 = 5;
/// Right binding power for the `not` prefix operator: looser than
/// `comparison` but tighter than `and`, per the precedence ladder
/// `pipe < or < and < not < comparison < ...`.
const NOT_BP: u8 = 8;
/// Right binding power for prefix `-`, between `multiplicative` and
/// `application/index`.
const NEG_BP: u8 = 18;
/// Minimum binding power an argument gathered by juxtaposition
/// application may have: only bare atoms, never an infix expression.
const APPLICATION_BP: u8 = 20;

fn binary_op(kind: TokenKind) -> BinaryOp {
  match kind {
    TokenKind::Op_Plus => BinaryOp::Add,
    TokenKind::Op_Minus => BinaryOp::Sub,
    TokenKind::Op_Star => BinaryOp::Mul,
    TokenKind::Op_Slash => BinaryOp::Div,
    TokenKind::Op_Percent => BinaryOp::Rem,
    TokenKind::Op_EqualEqual => BinaryOp::Eq,
    TokenKind::Op_BangEqual => BinaryOp::Neq,
    TokenKind::Op_Less => BinaryOp::Less,
    TokenKind::Op_LessEqual => BinaryOp::LessEq,
    TokenKind::Op_More => BinaryOp::More,
    TokenKind::Op_MoreEqual => BinaryOp::MoreEq,
    TokenKind::Kw_And => BinaryOp::And,
    TokenKind::Kw_Or => BinaryOp::Or,
    other => unreachable!("{other:?} is not an infix operator"),
  }
}

fn starts_atom(kind: TokenKind) -> bool {
  use TokenKind::*;
  matches!(
    kind,
    Lit_Ident | Lit_Number | Lit_String | Lit_True | Lit_False | Lit_Null | Brk_ParenL
  )
}

impl<'src> Parser<'src> {
  /// Parses an expression, consuming infix operators whose left binding
  /// power is at least `min_bp`.
  pub(super) fn expr_bp(&mut self, min_bp: u8) -> Result<Node<'src>> {
    self.check_recursion_limit(self.current().span)?;

    let mut lhs = self.prefix_expr()?;
    lhs = self.postfix_expr(lhs)?;

    loop {
      let (left_bp, right_bp) = match binding_power(self.current().kind) {
        Some(bp) => bp,
        None => break,
      };
      if left_bp < min_bp {
        break;
      }

      let op_token = self.bump();
      lhs = match op_token.kind {
        TokenKind::Op_Pipe => {
          let rhs = self.expr_bp(right_bp)?;
          let span = lhs.span().join(rhs.span());
          Node::Pipe(ast::Pipe {
            span,
            left: Box::new(lhs),
            right: Box::new(rhs),
          })
        }
        TokenKind::Op_Range => {
          let rhs = self.expr_bp(right_bp)?;
          let span = lhs.span().join(rhs.span());
          Node::Range(ast::Range {
            span,
            start: Box::new(lhs),
            end: Box::new(rhs),
          })
        }
        _ => {
          let rhs = self.expr_bp(right_bp)?;
          let span = lhs.span().join(rhs.span());
          Node::Binary(ast::Binary {
            span,
            op: binary_op(op_token.kind),
            left: Box::new(lhs),
            right: Box::new(rhs),
          })
        }
      };
    }

    Ok(lhs)
  }

  /// Parses one pattern-item of a `when` arm: an `expr_bp` call seeded
  /// just above `or`'s binding power, so that a bare `or` between two
  /// pattern items is left for the caller to consume as a separator
  /// rather than folded into the expression itself (§4.2).
  pub(super) fn pattern_item(&mut self) -> Result<Node<'src>> {
    self.expr_bp(PATTERN_BP)
  }

  fn prefix_expr(&mut self) -> Result<Node<'src>> {
    match self.current().kind {
      TokenKind::Op_Minus => {
        let op_token = self.bump();
        let operand = self.expr_bp(NEG_BP)?;
        let span = op_token.span.join(operand.span());
        Ok(Node::Unary(ast::Unary {
          span,
          op: UnaryOp::Neg,
          operand: Box::new(operand),
        }))
      }
      TokenKind::Kw_Not => {
        let op_token = self.bump();
        let operand = self.expr_bp(NOT_BP)?;
        let span = op_token.span.join(operand.span());
        Ok(Node::Unary(ast::Unary {
          span,
          op: UnaryOp::Not,
          operand: Box::new(operand),
        }))
      }
      _ => self.atom(),
    }
  }

  fn atom(&mut self) -> Result<Node<'src>> {
    match self.current().kind {
      TokenKind::Lit_Number | TokenKind::Lit_String | TokenKind::Lit_True | TokenKind::Lit_False | TokenKind::Lit_Null => {
        self.literal()
      }
      TokenKind::Lit_Ident => self.ident(),
      TokenKind::Brk_ParenL => {
        let start = self.bump().span;
        let inner = self.expr_bp(0)?;
        let end = self.expect(TokenKind::Brk_ParenR)?.span;
        Ok(Node::Grouping(ast::Grouping {
          span: start.join(end),
          inner: Box::new(inner),
        }))
      }
      _ => {
        let token = self.current().clone();
        let message = format!("line {}: expected an expression but got {:?}", token.line, token.kind);
        let error = Error::new(message, token.span);
        self.errors.push(error.clone());
        Err(error)
      }
    }
  }

  /// Consumes postfix `[index]` and juxtaposition-application args, both
  /// at the `application/index` precedence tier, tighter than any infix
  /// operator. Juxtaposition only ever follows an identifier (the
  /// callee), and each gathered argument is itself restricted to
  /// `APPLICATION_BP`, so `f a - 1` parses as `(f a) - 1`, not `f (a - 1)`.
  fn postfix_expr(&mut self, mut lhs: Node<'src>) -> Result<Node<'src>> {
    loop {
      if self.at(TokenKind::Brk_SquareL) {
        self.bump();
        let index = self.expr_bp(0)?;
        let end = self.expect(TokenKind::Brk_SquareR)?.span;
        let span = lhs.span().join(end);
        lhs = Node::Index(ast::Index {
          span,
          target: Box::new(lhs),
          index: Box::new(index),
        });
        continue;
      }

      if matches!(lhs, Node::Identifier(_)) && starts_atom(self.current().kind) {
        let mut items = Vec::new();
        while starts_atom(self.current().kind) {
          items.push(self.expr_bp(APPLICATION_BP)?);
        }
        let args_span = match (items.first(), items.last()) {
          (Some(first), Some(last)) => first.span().join(last.span()),
          _ => lhs.span(),
        };
        let span = lhs.span().join(args_span);
        lhs = Node::FunctionCall(ast::FunctionCall {
          span,
          target: Box::new(lhs),
          arguments: Box::new(Node::Arguments(ast::Arguments { span: args_span, items })),
          body: None,
        });
        continue;
      }

      break;
    }
    Ok(lhs)
  }

  /// Parses a flat, comma-separated argument list for `Function`/
  /// decorator `FunctionCall` headers: expressions at the lowest
  /// precedence, stopping at `:`, `Newline`, `Dedent`, or `Eof` — the
  /// hard terminators every list production shares (§4.2).
  pub(super) fn argument_list(&mut self) -> Result<Node<'src>> {
    let start: Span = self.current().span;
    let mut items = Vec::new();
    while !matches!(
      self.current().kind,
      TokenKind::Tok_Colon | TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
    ) {
      items.push(self.expr_bp(0)?);
      if !self.bump_if(TokenKind::Tok_Comma) {
        break;
      }
    }
    let span = items.last().map(|n: &Node| start.join(n.span())).unwrap_or(start);
    Ok(Node::Arguments(ast::Arguments { span, items }))
  }
}

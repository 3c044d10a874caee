use lexer::TokenKind;

use super::Parser;
use crate::ast::{self, Node};
use crate::Result;

impl<'src> Parser<'src> {
  /// Dispatches on the leading token of a statement, per the table in
  /// §4.2. Falls through to a bare expression statement when nothing
  /// more specific matches.
  pub(super) fn stmt(&mut self) -> Result<Node<'src>> {
    self.check_recursion_limit(self.current().span)?;

    match self.current().kind {
      TokenKind::Kw_If => self.if_stmt(),
      TokenKind::Kw_When => self.when_stmt(),
      TokenKind::Kw_For => self.for_stmt(),
      TokenKind::Kw_While => self.while_stmt(),
      TokenKind::Kw_Fn => self.fn_stmt(),
      TokenKind::Kw_Use => self.use_stmt(),
      TokenKind::Tok_At => self.decorator_call_stmt(),
      TokenKind::Lit_Ident if self.at_soft_keyword("module") => self.module_stmt(),
      TokenKind::Lit_Ident if self.peek(1).kind == TokenKind::Op_Equal && self.peek(2).kind == TokenKind::Kw_Fn => {
        self.anonymous_fn_stmt()
      }
      _ => self.expr_bp(0),
    }
  }

  /// A *block* is either an inline statement on the same line, a suite
  /// (`Newline Indent statement… Dedent`), or an empty single-`Newline`
  /// block with no indent following (§4.2).
  pub(super) fn block(&mut self) -> Result<Node<'src>> {
    let start = self.current().span;
    let statements = self.suite()?;
    let span = statements.last().map(|n| start.join(n.span())).unwrap_or(start);
    Ok(Node::Block(ast::Block { span, statements }))
  }

  /// The raw statement list behind a block, without wrapping it in a
  /// `Block` node — `Module` reuses this directly since its body isn't
  /// itself a `Block`.
  pub(super) fn suite(&mut self) -> Result<Vec<Node<'src>>> {
    if self.bump_if(TokenKind::Newline) {
      if !self.bump_if(TokenKind::Indent) {
        // A lone `Newline` with no following `Indent` is the empty block.
        return Ok(Vec::new());
      }
      let mut statements = Vec::new();
      while !matches!(self.current().kind, TokenKind::Dedent | TokenKind::Eof) {
        self.skip_newlines();
        if matches!(self.current().kind, TokenKind::Dedent | TokenKind::Eof) {
          break;
        }
        match self.stmt() {
          Ok(stmt) => statements.push(stmt),
          Err(_) => self.recover_to_next_statement(),
        }
      }
      self.expect(TokenKind::Dedent)?;
      Ok(statements)
    } else {
      // Inline form: a single statement on the same line.
      Ok(vec![self.stmt()?])
    }
  }

  fn if_stmt(&mut self) -> Result<Node<'src>> {
    let start = self.expect(TokenKind::Kw_If)?.span;
    let condition = self.expr_bp(0)?;
    self.expect(TokenKind::Tok_Colon)?;
    let body = self.block()?;

    let mut elseifs = Vec::new();
    while self.at(TokenKind::Kw_Elseif) {
      let elseif_start = self.bump().span;
      let elseif_condition = self.expr_bp(0)?;
      self.expect(TokenKind::Tok_Colon)?;
      let elseif_body = self.block()?;
      let span = elseif_start.join(elseif_body.span());
      elseifs.push(Node::IfStatement(ast::IfStatement {
        span,
        condition: Box::new(elseif_condition),
        body: Box::new(elseif_body),
        elseifs: Vec::new(),
        else_block: None,
      }));
    }

    let else_block = if self.bump_if(TokenKind::Kw_Else) {
      self.expect(TokenKind::Tok_Colon)?;
      Some(Box::new(self.block()?))
    } else {
      None
    };

    let end = else_block
      .as_deref()
      .map(Node::span)
      .or_else(|| elseifs.last().map(Node::span))
      .unwrap_or_else(|| body.span());
    Ok(Node::IfStatement(ast::IfStatement {
      span: start.join(end),
      condition: Box::new(condition),
      body: Box::new(body),
      elseifs,
      else_block,
    }))
  }

  fn when_stmt(&mut self) -> Result<Node<'src>> {
    let start = self.expect(TokenKind::Kw_When)?.span;
    let subject = self.expr_bp(0)?;
    self.expect(TokenKind::Tok_Colon)?;
    self.expect(TokenKind::Newline)?;
    self.expect(TokenKind::Indent)?;

    let mut patterns = Vec::new();
    while !matches!(self.current().kind, TokenKind::Dedent | TokenKind::Eof) {
      self.skip_newlines();
      if matches!(self.current().kind, TokenKind::Dedent | TokenKind::Eof) {
        break;
      }
      match self.pattern() {
        Ok(pattern) => patterns.push(pattern),
        Err(_) => self.recover_to_next_statement(),
      }
    }
    let end = self.expect(TokenKind::Dedent)?.span;

    Ok(Node::WhenStatement(ast::WhenStatement {
      span: start.join(end),
      subject: Box::new(subject),
      patterns,
    }))
  }

  /// One or more pattern items separated by `or`, followed by `:` and a
  /// full-precedence result expression (§4.2, GLOSSARY "Pattern").
  fn pattern(&mut self) -> Result<Node<'src>> {
    let start = self.current().span;
    let mut patterns = vec![self.pattern_item()?];
    while self.bump_if(TokenKind::Kw_Or) {
      patterns.push(self.pattern_item()?);
    }
    self.expect(TokenKind::Tok_Colon)?;
    let result = self.expr_bp(0)?;
    let span = start.join(result.span());
    Ok(Node::Pattern(ast::Pattern {
      span,
      patterns,
      result: Box::new(result),
    }))
  }

  fn for_stmt(&mut self) -> Result<Node<'src>> {
    let start = self.expect(TokenKind::Kw_For)?.span;
    let binding = self.ident()?;
    self.expect(TokenKind::Kw_In)?;
    let iterable = self.expr_bp(0)?;
    self.expect(TokenKind::Tok_Colon)?;
    let body = self.block()?;
    let span = start.join(body.span());
    Ok(Node::ForLoop(ast::ForLoop {
      span,
      binding: Box::new(binding),
      iterable: Box::new(iterable),
      body: Box::new(body),
    }))
  }

  fn while_stmt(&mut self) -> Result<Node<'src>> {
    let start = self.expect(TokenKind::Kw_While)?.span;
    let condition = self.expr_bp(0)?;
    self.expect(TokenKind::Tok_Colon)?;
    let body = self.block()?;
    let span = start.join(body.span());
    Ok(Node::WhileLoop(ast::WhileLoop {
      span,
      condition: Box::new(condition),
      body: Box::new(body),
    }))
  }

  /// Named form: `fn NAME Arguments : Block`.
  fn fn_stmt(&mut self) -> Result<Node<'src>> {
    let start = self.expect(TokenKind::Kw_Fn)?.span;
    let name = self.ident()?;
    let arguments = self.argument_list()?;
    self.expect(TokenKind::Tok_Colon)?;
    let body = self.block()?;
    let span = start.join(body.span());
    Ok(Node::Function(ast::Function {
      span,
      name: Box::new(name),
      arguments: Box::new(arguments),
      body: Box::new(body),
    }))
  }

  /// Anonymous-binding form: `NAME = fn Arguments : Block`; the bound
  /// name becomes the function's first child, same shape as the named
  /// form.
  fn anonymous_fn_stmt(&mut self) -> Result<Node<'src>> {
    let name = self.ident()?;
    self.expect(TokenKind::Op_Equal)?;
    self.expect(TokenKind::Kw_Fn)?;
    let arguments = self.argument_list()?;
    self.expect(TokenKind::Tok_Colon)?;
    let body = self.block()?;
    let span = name.span().join(body.span());
    Ok(Node::Function(ast::Function {
      span,
      name: Box::new(name),
      arguments: Box::new(arguments),
      body: Box::new(body),
    }))
  }

  /// `@ NAME Arguments`, optionally followed by `: Block` when the
  /// decorator call introduces a body of its own.
  fn decorator_call_stmt(&mut self) -> Result<Node<'src>> {
    let start = self.expect(TokenKind::Tok_At)?.span;
    let target = self.ident()?;
    let arguments = self.argument_list()?;
    let body = if self.bump_if(TokenKind::Tok_Colon) {
      Some(Box::new(self.block()?))
    } else {
      None
    };
    let end = body.as_deref().map(Node::span).unwrap_or_else(|| arguments.span());
    Ok(Node::FunctionCall(ast::FunctionCall {
      span: start.join(end),
      target: Box::new(target),
      arguments: Box::new(arguments),
      body,
    }))
  }

  fn use_stmt(&mut self) -> Result<Node<'src>> {
    let start = self.expect(TokenKind::Kw_Use)?.span;
    let target = if self.at(TokenKind::Lit_String) {
      self.literal()?
    } else {
      self.ident()?
    };
    let span = start.join(target.span());
    self.bump_if(TokenKind::Newline);
    Ok(Node::Use(ast::Use {
      span,
      target: Box::new(target),
    }))
  }

  /// `module` is a soft keyword (see `Parser::at_soft_keyword`): the
  /// distilled grammar table never names it, but every loader scenario
  /// (§4.4, §8) depends on a file's top-level declarations living inside
  /// one of these for the loader to find.
  fn module_stmt(&mut self) -> Result<Node<'src>> {
    let start = self.bump().span;
    let name = self.ident()?;
    self.expect(TokenKind::Tok_Colon)?;
    let body = self.suite()?;
    let end = body.last().map(Node::span).unwrap_or_else(|| name.span());
    Ok(Node::Module(ast::Module {
      span: start.join(end),
      name: Box::new(name),
      body,
    }))
  }
}

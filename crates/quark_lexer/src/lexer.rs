use beef::lean::Cow;
use logos::Logos;
use span::Span;

use crate::token::{Token, TokenKind};

/// Turns `src` into the final token stream, including synthetic
/// `Newline`/`Indent`/`Dedent` tokens.
///
/// This runs in two passes. The first pass is a plain `logos` scan that
/// strips whitespace and comments but records, for every real token, how
/// far into its line it begins (`None` if it continues the previous
/// token's line). The second pass walks that list and turns the
/// line-start information into the pseudo-tokens a Python-style grammar
/// expects, using an indent-width stack.
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
  let raw = scan(src);
  layout(src, raw)
}

struct Raw<'src> {
  kind: TokenKind,
  lexeme: &'src str,
  span: Span,
  /// Width of the indentation preceding this token, if it is the first
  /// real token on its physical line.
  line_start_width: Option<usize>,
  line: u32,
}

fn scan(src: &str) -> Vec<Raw<'_>> {
  let mut out = Vec::new();
  let mut lexer = TokenKind::lexer(src);
  let mut pending_width = None;
  let mut line: u32 = 1;

  while let Some(kind) = lexer.next() {
    let lexeme = lexer.slice();
    let span: Span = lexer.span().into();

    match kind {
      TokenKind::_Tok_Whitespace => {}
      TokenKind::_Tok_Comment => {}
      TokenKind::_Tok_Indent => {
        let newlines = lexeme.chars().filter(|c| *c == '\n').count() as u32;
        line += newlines;
        pending_width = Some(measure_indent(lexeme));
      }
      _ => {
        out.push(Raw {
          kind,
          lexeme,
          span,
          line_start_width: pending_width.take(),
          line,
        });
      }
    }
  }

  out
}

fn measure_indent(lexeme: &str) -> usize {
  lexeme.len() - lexeme.rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Tracks the stack of active indentation widths, innermost last.
struct IndentStack {
  stack: Vec<usize>,
}

impl IndentStack {
  fn new() -> Self {
    Self { stack: vec![0] }
  }

  fn top(&self) -> usize {
    *self.stack.last().unwrap()
  }

  fn push(&mut self, width: usize) {
    self.stack.push(width);
  }

  fn pop(&mut self) {
    self.stack.pop();
    if self.stack.is_empty() {
      self.stack.push(0);
    }
  }
}

fn layout<'src>(src: &'src str, raw: Vec<Raw<'src>>) -> Vec<Token<'src>> {
  let mut out = Vec::with_capacity(raw.len() + 8);
  let mut indent = IndentStack::new();
  let mut column_of = |span: Span| -> u32 {
    let line_start = src[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    (span.start - line_start + 1) as u32
  };
  let mut seen_token = false;

  for token in raw {
    if let Some(width) = token.line_start_width {
      if seen_token {
        out.push(Token::new(TokenKind::Newline, "", Span { start: token.span.start, end: token.span.start }, token.line, 1));
      }

      if width > indent.top() {
        indent.push(width);
        out.push(Token::new(TokenKind::Indent, "", Span { start: token.span.start, end: token.span.start }, token.line, 1));
      } else {
        while width < indent.top() {
          indent.pop();
          out.push(Token::new(TokenKind::Dedent, "", Span { start: token.span.start, end: token.span.start }, token.line, 1));
        }
        // A width between two stack levels is a malformed dedent; the
        // parser will surface this as an "invalid indentation" error
        // when it tries to match the block it expected to close.
      }
    }

    let column = column_of(token.span);
    out.push(Token::new(token.kind, Cow::borrowed(token.lexeme), token.span, token.line, column));
    seen_token = true;
  }

  let end = src.len();
  if seen_token {
    out.push(Token::new(TokenKind::Newline, "", Span { start: end, end }, 0, 1));
  }
  while indent.top() > 0 {
    indent.pop();
    out.push(Token::new(TokenKind::Dedent, "", Span { start: end, end }, 0, 1));
  }
  out.push(Token::new(TokenKind::Eof, "", Span { start: end, end }, 0, 1));

  out
}

#[cfg(test)]
mod tests {
  use indoc::indoc;

  use super::*;

  fn kinds(src: &str) -> Vec<TokenKind> {
    tokenize(src).into_iter().map(|t| t.kind).collect()
  }

  #[test]
  fn flat_statements_separated_by_newline() {
    use TokenKind::*;
    let got = kinds("x = 1\ny = 2\n");
    assert_eq!(
      got,
      vec![Lit_Ident, Op_Equal, Lit_Number, Newline, Lit_Ident, Op_Equal, Lit_Number, Newline, Eof]
    );
  }

  #[test]
  fn nested_block_emits_indent_and_dedent() {
    use TokenKind::*;
    let src = indoc! {"
      if x:
        y = 1
      z = 2
    "};
    let got = kinds(src);
    assert_eq!(
      got,
      vec![
        Kw_If, Lit_Ident, Tok_Colon, Newline, Indent, Lit_Ident, Op_Equal, Lit_Number, Newline, Dedent, Lit_Ident,
        Op_Equal, Lit_Number, Newline, Eof
      ]
    );
  }

  #[test]
  fn blank_and_comment_only_lines_do_not_affect_indentation() {
    use TokenKind::*;
    let src = indoc! {"
      if x:
        y = 1

        // a comment
        z = 2
    "};
    let got = kinds(src);
    assert_eq!(
      got,
      vec![
        Kw_If, Lit_Ident, Tok_Colon, Newline, Indent, Lit_Ident, Op_Equal, Lit_Number, Newline, Lit_Ident, Op_Equal,
        Lit_Number, Newline, Dedent, Eof
      ]
    );
  }
}

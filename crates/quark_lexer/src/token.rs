use std::fmt::{self, Display};

use beef::lean::Cow;
use logos::Logos;
use span::Span;

/// A single lexeme in a Quark source file.
///
/// `lexeme` is the exact source text that produced the token, except for
/// `Newline`/`Indent`/`Dedent`/`Eof`, which carry no text of their own.
/// `line`/`column` are 1-based and computed once during scanning, so that
/// diagnostics never need to re-walk the source to find them.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
  pub kind: TokenKind,
  pub lexeme: Cow<'src, str>,
  pub span: Span,
  pub line: u32,
  pub column: u32,
}

impl<'src> Token<'src> {
  pub fn new(kind: TokenKind, lexeme: impl Into<Cow<'src, str>>, span: impl Into<Span>, line: u32, column: u32) -> Self {
    Self {
      kind,
      lexeme: lexeme.into(),
      span: span.into(),
      line,
      column,
    }
  }

  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }
}

impl<'src> Display for Token<'src> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", self.kind)
  }
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
  #[token("if")]
  Kw_If,
  #[token("elseif")]
  Kw_Elseif,
  #[token("else")]
  Kw_Else,
  #[token("when")]
  Kw_When,
  #[token("for")]
  Kw_For,
  #[token("in")]
  Kw_In,
  #[token("while")]
  Kw_While,
  #[token("fn")]
  Kw_Fn,
  #[token("use")]
  Kw_Use,
  #[token("and")]
  Kw_And,
  #[token("or")]
  Kw_Or,
  #[token("not")]
  Kw_Not,

  #[token("true")]
  Lit_True,
  #[token("false")]
  Lit_False,
  #[token("null")]
  Lit_Null,

  #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
  Lit_Number,
  #[regex(r"'([^'\\]|\\.)*'")]
  Lit_String,
  #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
  Lit_Ident,

  #[token("(")]
  Brk_ParenL,
  #[token(")")]
  Brk_ParenR,
  #[token("[")]
  Brk_SquareL,
  #[token("]")]
  Brk_SquareR,

  #[token(":")]
  Tok_Colon,
  #[token(",")]
  Tok_Comma,
  #[token("@")]
  Tok_At,

  #[token("=")]
  Op_Equal,
  #[token("==")]
  Op_EqualEqual,
  #[token("!=")]
  Op_BangEqual,
  #[token("<")]
  Op_Less,
  #[token("<=")]
  Op_LessEqual,
  #[token(">")]
  Op_More,
  #[token(">=")]
  Op_MoreEqual,

  #[token("+")]
  Op_Plus,
  #[token("-")]
  Op_Minus,
  #[token("*")]
  Op_Star,
  #[token("/")]
  Op_Slash,
  #[token("%")]
  Op_Percent,

  #[token("|")]
  Op_Pipe,
  #[token("..")]
  Op_Range,

  #[doc(hidden)]
  #[regex(r"(\r?\n)+[ \t]*", priority = 10)]
  _Tok_Indent,
  #[doc(hidden)]
  #[regex(r"[ \t]+")]
  _Tok_Whitespace,
  #[doc(hidden)]
  #[regex(r"//[^\n]*")]
  _Tok_Comment,

  #[error]
  Tok_Error,

  /// A logical newline that ends a statement. Synthesized from `_Tok_Indent`
  /// by [`crate::lexer::tokenize`]; never produced by the raw logos scan.
  Newline,
  /// One level of deeper indentation than the enclosing block. Synthetic,
  /// like `Newline`.
  Indent,
  /// One level of shallower indentation than the enclosing block. Synthetic,
  /// like `Newline`.
  Dedent,
  Eof,
}

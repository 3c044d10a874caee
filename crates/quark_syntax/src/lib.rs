pub mod ast;
pub mod parser;
mod unescape;

use beef::lean::Cow;
use span::Span;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A single parser diagnostic. Library crates in this workspace never
/// render diagnostics themselves (that's `quark_diag`'s job, driven by
/// the root package); they only ever produce this plain, line-taggable
/// shape, per the workspace's error-handling split.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
  pub message: Cow<'static, str>,
  pub span: Span,
}

impl Error {
  pub fn new(message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    let message = message.into();
    let span = span.into();
    Error { message, span }
  }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let Error { message, span } = self;
    write!(f, "error at {span}: {message}")
  }
}

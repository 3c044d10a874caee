//! The `quark check` pipeline: load a file and every module it
//! transitively `use`s, then render whatever diagnostics come out of it.

use std::path::Path;

use anyhow::Context;
use diag::{Report, Source};
use loader::ModuleLoader;

/// Runs `quark check <path>`. Returns `Ok(true)` when loading found
/// nothing to report (the driver should exit 0), `Ok(false)` when it
/// rendered one or more diagnostics (exit 1). Never proceeds to anything
/// resembling code generation: this front end stops at diagnostics.
pub fn check(path: &Path, color: bool) -> anyhow::Result<bool> {
  let mut loader = ModuleLoader::new();
  let (_tree, errors) = loader.load(path);

  if errors.is_empty() {
    println!("{}: no errors found", path.display());
    return Ok(true);
  }

  for error in &errors {
    let source = match loader.sources().get(&error.path) {
      Some(contents) => Source::file(error.path.display().to_string(), *contents),
      None => Source::file(error.path.display().to_string(), ""),
    };

    let report = Report::error()
      .source(source)
      .message(error.message.clone())
      .span(error.span)
      .color(color)
      .build();

    let rendered = report
      .emit_to_string()
      .with_context(|| format!("failed to render diagnostic for '{}'", error.path.display()))?;
    eprint!("{rendered}");
  }

  Ok(false)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn reports_success_for_a_clean_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("main.qrk");
    fs::write(&path, "fn id x: x\n").unwrap();

    assert!(check(&path, false).unwrap());
  }

  #[test]
  fn reports_failure_for_a_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("main.qrk");
    fs::write(&path, "fn broken\n").unwrap();

    assert!(!check(&path, false).unwrap());
  }
}

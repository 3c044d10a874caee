//! Recursive module loader.
//!
//! Resolves every `use './path'`-style import reachable from a root file
//! into one composite tree, splicing each imported file's top-level
//! declarations in place of the `use` statement that named it. Grounded in
//! the discovery/dependency-graph pass the wider corpus uses for
//! multi-file front ends (see e.g. `mesh-pkg::resolver::ResolveCtx`'s
//! `visiting`-set DFS cycle guard and dedup bookkeeping), adapted to this
//! grammar's splice-in-place shape instead of a separate compilation-order
//! graph.

mod path;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use span::Span;
use syntax::ast::{self, Node};

use crate::path::lexical_normalize;

/// An error collected while loading a module tree.
///
/// `path`/`span` locate the error precisely enough for the driver to
/// render it with `quark_diag::Report` against the matching entry in
/// [`ModuleLoader::sources`]; for errors that don't have a more specific
/// location (a missing file, for instance, via [`Error::at_start`]), `span`
/// is a zero-width span at offset 0, which `Report` renders like any other
/// span: pointing at the file's first byte.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
  pub path: PathBuf,
  pub span: Span,
  pub message: String,
}

impl Error {
  fn new(path: PathBuf, span: Span, message: impl Into<String>) -> Self {
    Self {
      path,
      span,
      message: message.into(),
    }
  }

  fn at_start(path: PathBuf, message: impl Into<String>) -> Self {
    Self::new(path, Span::default(), message)
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.path.display(), self.message)
  }
}

impl std::error::Error for Error {}

/// Resolves `use` statements across files into one composite tree.
///
/// One loader instance is scoped to a single root: `loaded`/`resolving`/
/// `stack` all track state for the run currently in progress, so a loader
/// is not safe to share across concurrent resolutions (§5).
pub struct ModuleLoader {
  loaded: HashSet<PathBuf>,
  resolving: HashMap<PathBuf, usize>,
  stack: Vec<PathBuf>,
  sources: HashMap<PathBuf, &'static str>,
}

impl Default for ModuleLoader {
  fn default() -> Self {
    Self::new()
  }
}

impl ModuleLoader {
  pub fn new() -> Self {
    Self {
      loaded: HashSet::new(),
      resolving: HashMap::new(),
      stack: Vec::new(),
      sources: HashMap::new(),
    }
  }

  /// Every source file this loader has read so far, keyed by its
  /// normalized path. Lets the driver build a `quark_diag::Source` to
  /// render a given error's `path`/`span` against.
  pub fn sources(&self) -> &HashMap<PathBuf, &'static str> {
    &self.sources
  }

  /// Loads `root` and every module it transitively `use`s, depth-first,
  /// source order. The tree is always returned best-effort, even when
  /// `errors` is non-empty (§7).
  ///
  /// The returned tree borrows from file contents the loader reads and
  /// leaks for the lifetime of the process (a batch `quark check` run
  /// parses each file exactly once and exits; there is no arena crate in
  /// this corpus to borrow from instead, and leaking avoids threading a
  /// self-referential lifetime through every recursive call).
  pub fn load(&mut self, root: &Path) -> (Node<'static>, Vec<Error>) {
    let mut errors = Vec::new();
    let canonical = lexical_normalize(root);
    let tree = self.load_file(&canonical, &mut errors).unwrap_or_else(|| {
      Node::CompilationUnit(ast::CompilationUnit {
        span: Default::default(),
        children: Vec::new(),
      })
    });
    (tree, errors)
  }

  fn load_file(&mut self, path: &PathBuf, errors: &mut Vec<Error>) -> Option<Node<'static>> {
    let source = match std::fs::read_to_string(path) {
      Ok(source) => source,
      Err(e) => {
        errors.push(Error::at_start(path.clone(), format!("could not read file: {e}")));
        return None;
      }
    };
    let source: &'static str = Box::leak(source.into_boxed_str());
    self.sources.insert(path.clone(), source);

    let (tree, parse_errors) = syntax::parse(source);
    if !parse_errors.is_empty() {
      for error in parse_errors {
        errors.push(Error::new(
          path.clone(),
          error.span,
          format!("in '{}': {}", path.display(), error.message),
        ));
      }
      return None;
    }

    Some(self.resolve_uses(tree, path, errors))
  }

  /// Rewrites every direct `Use(Literal(String))` child of `tree` into the
  /// imported file's spliced content, per §4.3. `Use(Identifier)` children
  /// (already-composite references) pass through untouched, which is also
  /// what makes re-running this over an already-resolved tree a no-op: it
  /// finds no more string-literal `use`s left to expand.
  fn resolve_uses(&mut self, tree: Node<'static>, current_file: &Path, errors: &mut Vec<Error>) -> Node<'static> {
    let Node::CompilationUnit(cu) = tree else {
      return tree;
    };

    let mut children = Vec::with_capacity(cu.children.len());
    for child in cu.children {
      match child {
        Node::Use(use_stmt) if matches!(use_stmt.target.as_ref(), Node::Literal(_)) => {
          if let Some(mut spliced) = self.expand_use(&use_stmt, current_file, errors) {
            children.append(&mut spliced);
          }
          // Rejected, cyclic, or already-loaded imports record their error
          // (or, for dedup, nothing) and contribute no children.
        }
        other => children.push(other),
      }
    }

    Node::CompilationUnit(ast::CompilationUnit { span: cu.span, children })
  }

  /// Implements the loader's numbered algorithm (§4.4) for a single
  /// string-literal `use` statement: classify, check for a cycle, dedup,
  /// check existence, parse, recurse, locate the imported module, extract
  /// its name, and splice.
  fn expand_use(&mut self, use_stmt: &ast::Use<'static>, current_file: &Path, errors: &mut Vec<Error>) -> Option<Vec<Node<'static>>> {
    let Node::Literal(literal) = use_stmt.target.as_ref() else {
      return None;
    };
    let ast::LiteralValue::String(target) = &literal.value else {
      return None;
    };

    // 1. Classify: only `./` and `../` relative paths are supported.
    if !(target.starts_with("./") || target.starts_with("../")) {
      errors.push(Error::new(
        current_file.to_path_buf(),
        use_stmt.span,
        "stdlib imports are not yet supported; use relative paths",
      ));
      return None;
    }

    let dir = current_file.parent().unwrap_or_else(|| Path::new("."));
    let resolved = lexical_normalize(&dir.join(target.as_ref()).with_extension("qrk"));

    // 2. Cycle check. The chain starts at the stack position that first
    // recorded `resolved`, not at the root of the whole DFS, so a cycle
    // buried under an otherwise-acyclic prefix is reported on its own
    // (§4.4 step 2); each component is the base filename only.
    if let Some(&first_seen) = self.resolving.get(&resolved) {
      let mut chain: Vec<String> = self.stack[first_seen - 1..]
        .iter()
        .map(|p| p.file_name().unwrap_or(p.as_os_str()).to_string_lossy().into_owned())
        .collect();
      chain.push(resolved.file_name().unwrap_or(resolved.as_os_str()).to_string_lossy().into_owned());
      errors.push(Error::new(
        current_file.to_path_buf(),
        use_stmt.span,
        format!("circular import detected: {}", chain.join(" -> ")),
      ));
      return None;
    }

    // 3. Dedup: an already-spliced module contributes nothing a second time.
    if self.loaded.contains(&resolved) {
      return None;
    }

    // 4. Existence check, reporting both the spelling as written and the
    // resolved path.
    if !resolved.is_file() {
      errors.push(Error::new(
        current_file.to_path_buf(),
        use_stmt.span,
        format!("could not find module '{}' (resolved to '{}')", target, resolved.display()),
      ));
      return None;
    }

    // 6. Recurse, tracking the in-progress chain for cycle detection.
    self.stack.push(resolved.clone());
    self.resolving.insert(resolved.clone(), self.stack.len());

    let imported = self.load_file(&resolved, errors);

    self.stack.pop();
    self.resolving.remove(&resolved);

    let imported = imported?;
    self.loaded.insert(resolved.clone());

    let Node::CompilationUnit(cu) = imported else {
      return None;
    };

    // 7. Locate the module: the *last* top-level `Module` node, per the
    // resolved Open Question allowing multiple (last-wins, enabling
    // transitive splicing).
    let module_index = cu
      .children
      .iter()
      .enumerate()
      .rev()
      .find_map(|(i, node)| matches!(node, Node::Module(_)).then_some(i));

    let Some(module_index) = module_index else {
      errors.push(Error::new(
        current_file.to_path_buf(),
        use_stmt.span,
        format!("imported file '{target}' does not define a module"),
      ));
      return None;
    };

    // 8. Extract the module name.
    let name = match &cu.children[module_index] {
      Node::Module(module) => match module.name.as_ref() {
        Node::Identifier(ident) if !ident.name.is_empty() => ident.name.clone(),
        _ => {
          errors.push(Error::new(
            current_file.to_path_buf(),
            use_stmt.span,
            format!("imported file '{target}' defines a module with an empty name"),
          ));
          return None;
        }
      },
      _ => unreachable!("module_index always points at a Node::Module"),
    };

    // 9. Splice: every top-level child of the imported file, plus a
    // synthetic `Use(Identifier(name))` standing in for the original
    // string-literal use, spanning the same source range so it still
    // resolves to the original use site's line.
    let mut spliced = cu.children;
    spliced.push(Node::Use(ast::Use {
      span: use_stmt.span,
      target: Box::new(Node::Identifier(ast::Identifier {
        span: use_stmt.span,
        name,
      })),
    }));
    Some(spliced)
  }
}

#[cfg(test)]
mod tests;

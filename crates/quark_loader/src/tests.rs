use std::fs;

use syntax::ast::Node;
use tempfile::tempdir;

use super::*;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
  let path = dir.join(name);
  fs::write(&path, contents).unwrap();
  path
}

fn count_modules(node: &Node<'_>) -> usize {
  let own = usize::from(matches!(node, Node::Module(_)));
  own + node.children().iter().map(|child| count_modules(child)).sum::<usize>()
}

#[test]
fn splices_a_local_import_in_place() {
  let dir = tempdir().unwrap();
  write(dir.path(), "b.qrk", "module b:\n    fn id x: x\n");
  let entry = write(dir.path(), "a.qrk", "use './b'\nid 1\n");

  let mut loader = ModuleLoader::new();
  let (tree, errors) = loader.load(&entry);
  assert!(errors.is_empty(), "unexpected errors: {errors:?}");

  let Node::CompilationUnit(cu) = &tree else {
    panic!("expected a CompilationUnit");
  };
  assert_eq!(cu.children.len(), 3);
  assert!(matches!(cu.children[0], Node::Module(_)));
  let Node::Use(use_stmt) = &cu.children[1] else {
    panic!("expected a synthetic Use node");
  };
  assert_eq!(use_stmt.target.as_identifier().unwrap().name.as_ref(), "b");
  assert!(matches!(cu.children[2], Node::FunctionCall(_)));
}

#[test]
fn s4_duplicate_import_is_deduplicated() {
  let dir = tempdir().unwrap();
  write(dir.path(), "b.qrk", "module b:\n    fn id x: x\n");
  let entry = write(dir.path(), "a.qrk", "use './b'\nuse './b'\n");

  let mut loader = ModuleLoader::new();
  let (tree, errors) = loader.load(&entry);
  assert!(errors.is_empty(), "unexpected errors: {errors:?}");
  assert_eq!(count_modules(&tree), 1, "the second `use './b'` must contribute nothing");
}

#[test]
fn s3_circular_import_is_reported_with_the_full_chain() {
  let dir = tempdir().unwrap();
  write(dir.path(), "b.qrk", "use './a'\n");
  let entry = write(dir.path(), "a.qrk", "use './b'\n");

  let mut loader = ModuleLoader::new();
  let (_tree, errors) = loader.load(&entry);
  assert!(errors.iter().any(|e| e.message.contains("circular import detected")), "{errors:?}");
}

#[test]
fn s5_non_relative_import_is_rejected() {
  let dir = tempdir().unwrap();
  let entry = write(dir.path(), "a.qrk", "use 'csv'\n");

  let mut loader = ModuleLoader::new();
  let (tree, errors) = loader.load(&entry);
  assert!(errors.iter().any(|e| e.message.contains("stdlib imports are not yet supported")));

  // The tree is still returned best-effort, with the rejected `use`
  // simply absent (never spliced).
  let Node::CompilationUnit(cu) = &tree else {
    panic!("expected a CompilationUnit");
  };
  assert!(cu.children.is_empty());
}

#[test]
fn missing_file_is_reported_with_both_spellings() {
  let dir = tempdir().unwrap();
  let entry = write(dir.path(), "a.qrk", "use './missing'\n");

  let mut loader = ModuleLoader::new();
  let (_tree, errors) = loader.load(&entry);
  assert!(errors.iter().any(|e| e.message.contains("could not find module") && e.message.contains("./missing")));
}

#[test]
fn import_without_a_module_declaration_is_an_error() {
  let dir = tempdir().unwrap();
  write(dir.path(), "b.qrk", "1 + 1\n");
  let entry = write(dir.path(), "a.qrk", "use './b'\n");

  let mut loader = ModuleLoader::new();
  let (_tree, errors) = loader.load(&entry);
  assert!(errors.iter().any(|e| e.message.contains("does not define a module")));
}

#[test]
fn imported_file_with_a_parse_error_is_not_spliced() {
  let dir = tempdir().unwrap();
  write(dir.path(), "b.qrk", "fn broken\n");
  let entry = write(dir.path(), "a.qrk", "use './b'\n");

  let mut loader = ModuleLoader::new();
  let (tree, errors) = loader.load(&entry);
  assert!(
    errors.iter().any(|e| e.message.starts_with("in '") && e.message.contains("b.qrk")),
    "{errors:?}"
  );

  let Node::CompilationUnit(cu) = &tree else {
    panic!("expected a CompilationUnit");
  };
  assert!(cu.children.is_empty(), "the malformed import must not be spliced in: {cu:?}");
}

#[test]
fn already_resolved_tree_is_a_no_op() {
  let already_resolved = Node::CompilationUnit(ast::CompilationUnit {
    span: Default::default(),
    children: vec![Node::Use(ast::Use {
      span: Default::default(),
      target: Box::new(ast::ident(span::Span::default(), "b")),
    })],
  });

  let mut loader = ModuleLoader::new();
  let mut errors = Vec::new();
  let again = loader.resolve_uses(already_resolved.clone(), Path::new("a.qrk"), &mut errors);

  assert!(errors.is_empty());
  assert_eq!(again, already_resolved);
}

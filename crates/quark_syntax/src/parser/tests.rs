//! Direct shape assertions rather than `insta` snapshots: a snapshot
//! needs a human to accept its first baseline, which isn't available
//! here, so these tests match on the resulting `Node` shape directly.

use indoc::indoc;

use crate::ast::{BinaryOp, Node};
use crate::parser::parse;

fn parse_ok(src: &str) -> Node<'_> {
  let (unit, errors) = parse(src);
  assert!(errors.is_empty(), "unexpected parser errors: {errors:?}");
  unit
}

fn top_level(unit: &Node) -> &[Node] {
  match unit {
    Node::CompilationUnit(cu) => &cu.children,
    _ => unreachable!(),
  }
}

fn ident_name<'a>(node: &'a Node) -> &'a str {
  node.as_identifier().expect("expected an Identifier node").name.as_ref()
}

#[test]
fn s1_named_function() {
  let src = indoc! {"
    fn sum a, b:
        a + b
  "};
  let unit = parse_ok(src);
  let children = top_level(&unit);
  assert_eq!(children.len(), 1);

  let Node::Function(func) = &children[0] else {
    panic!("expected a Function node, got {:?}", children[0]);
  };
  assert_eq!(ident_name(&func.name), "sum");

  let Node::Arguments(args) = func.arguments.as_ref() else {
    panic!("expected an Arguments node");
  };
  assert_eq!(args.items.len(), 2);
  assert_eq!(ident_name(&args.items[0]), "a");
  assert_eq!(ident_name(&args.items[1]), "b");

  let Node::Block(body) = func.body.as_ref() else {
    panic!("expected a Block node");
  };
  assert_eq!(body.statements.len(), 1);
  let Node::Binary(binary) = &body.statements[0] else {
    panic!("expected a Binary node");
  };
  assert_eq!(binary.op, BinaryOp::Add);
  assert_eq!(ident_name(&binary.left), "a");
  assert_eq!(ident_name(&binary.right), "b");
}

#[test]
fn s6_anonymous_binding() {
  let src = "inc = fn x: x + 1\n";
  let unit = parse_ok(src);
  let children = top_level(&unit);
  assert_eq!(children.len(), 1);

  let Node::Function(func) = &children[0] else {
    panic!("expected a Function node");
  };
  assert_eq!(ident_name(&func.name), "inc");
}

#[test]
fn s2_when_with_wildcard() {
  let src = indoc! {"
    when n:
        0 or 1: 1
        _: n * factorial n
  "};
  let unit = parse_ok(src);
  let children = top_level(&unit);
  assert_eq!(children.len(), 1);

  let Node::WhenStatement(when) = &children[0] else {
    panic!("expected a WhenStatement node");
  };
  assert_eq!(ident_name(&when.subject), "n");
  assert_eq!(when.patterns.len(), 2);

  let Node::Pattern(first) = &when.patterns[0] else {
    panic!("expected a Pattern node");
  };
  assert_eq!(first.patterns.len(), 2);
  assert!(matches!(first.patterns[0], Node::Literal(_)));
  assert!(matches!(first.patterns[1], Node::Literal(_)));
  assert!(matches!(first.result.as_ref(), Node::Literal(_)));

  let Node::Pattern(second) = &when.patterns[1] else {
    panic!("expected a Pattern node");
  };
  assert_eq!(second.patterns.len(), 1);
  assert_eq!(ident_name(&second.patterns[0]), "_");
  assert!(matches!(second.result.as_ref(), Node::Binary(_)));
}

#[test]
fn when_pattern_item_combines_and_but_splits_on_or() {
  let src = indoc! {"
    when x:
        a and b or c: 1
        _: 0
  "};
  let unit = parse_ok(src);
  let Node::WhenStatement(when) = &top_level(&unit)[0] else {
    panic!("expected a WhenStatement node");
  };
  assert_eq!(when.patterns.len(), 2);

  let Node::Pattern(first) = &when.patterns[0] else {
    panic!("expected a Pattern node");
  };
  // `or` still separates pattern items, so there are two: `a and b`, `c`.
  assert_eq!(first.patterns.len(), 2);
  let Node::Binary(and_pattern) = &first.patterns[0] else {
    panic!("expected `a and b` to parse as a single Binary pattern item, got {:?}", first.patterns[0]);
  };
  assert_eq!(and_pattern.op, BinaryOp::And);
  assert_eq!(ident_name(&and_pattern.left), "a");
  assert_eq!(ident_name(&and_pattern.right), "b");
  assert_eq!(ident_name(&first.patterns[1]), "c");
}

#[test]
fn precedence_or_binds_looser_than_and() {
  let unit = parse_ok("a or b and c\n");
  let Node::Binary(top) = &top_level(&unit)[0] else {
    panic!("expected a Binary node");
  };
  assert_eq!(top.op, BinaryOp::Or);
  assert_eq!(ident_name(&top.left), "a");
  let Node::Binary(rhs) = top.right.as_ref() else {
    panic!("expected `b and c` to parse as a Binary node");
  };
  assert_eq!(rhs.op, BinaryOp::And);
}

#[test]
fn pipe_is_left_associative() {
  let unit = parse_ok("x | f | g\n");
  let Node::Pipe(top) = &top_level(&unit)[0] else {
    panic!("expected a Pipe node");
  };
  // `(x | f) | g`: the left side of the outermost pipe is itself a pipe.
  assert!(matches!(top.left.as_ref(), Node::Pipe(_)));
  assert_eq!(ident_name(&top.right), "g");
}

#[test]
fn if_elseif_else_chain() {
  let src = indoc! {"
    if a:
        1
    elseif b:
        2
    else:
        3
  "};
  let unit = parse_ok(src);
  let Node::IfStatement(stmt) = &top_level(&unit)[0] else {
    panic!("expected an IfStatement node");
  };
  assert_eq!(stmt.elseifs.len(), 1);
  assert!(stmt.else_block.is_some());
}

#[test]
fn for_and_while_loops() {
  let unit = parse_ok("for x in xs: x\n");
  assert!(matches!(top_level(&unit)[0], Node::ForLoop(_)));

  let unit = parse_ok("while true: 1\n");
  assert!(matches!(top_level(&unit)[0], Node::WhileLoop(_)));
}

#[test]
fn use_forms() {
  let unit = parse_ok("use './a'\n");
  let Node::Use(use_stmt) = &top_level(&unit)[0] else {
    panic!("expected a Use node");
  };
  assert!(matches!(use_stmt.target.as_ref(), Node::Literal(_)));

  let unit = parse_ok("use a\n");
  let Node::Use(use_stmt) = &top_level(&unit)[0] else {
    panic!("expected a Use node");
  };
  assert!(matches!(use_stmt.target.as_ref(), Node::Identifier(_)));
}

#[test]
fn module_declaration() {
  let src = indoc! {"
    module a:
        fn id x: x
  "};
  let unit = parse_ok(src);
  let Node::Module(module) = &top_level(&unit)[0] else {
    panic!("expected a Module node");
  };
  assert_eq!(ident_name(&module.name), "a");
  assert_eq!(module.body.len(), 1);
}

#[test]
fn decorator_call() {
  let unit = parse_ok("@memoize factorial\n");
  let Node::FunctionCall(call) = &top_level(&unit)[0] else {
    panic!("expected a FunctionCall node");
  };
  assert_eq!(ident_name(&call.target), "memoize");
  let Node::Arguments(args) = call.arguments.as_ref() else {
    panic!("expected an Arguments node");
  };
  assert_eq!(args.items.len(), 1);
}

#[test]
fn malformed_statement_is_skipped_without_aborting_the_rest() {
  let src = "fn broken\nfn ok x: x\n";
  let (unit, errors) = parse(src);
  assert!(!errors.is_empty());
  // The malformed `fn broken` (missing arguments/`:`/body) is dropped;
  // `fn ok x: x` still parses.
  let children = top_level(&unit);
  assert!(children.iter().any(|n| matches!(n, Node::Function(f) if ident_name(&f.name) == "ok")));
}

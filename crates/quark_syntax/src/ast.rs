//! The syntax tree produced by [`crate::parser`].
//!
//! Every construct is a variant of [`Node`]; each variant fixes its own
//! child shape at compile time (the teacher's own "tagged enum with
//! payload structs" design), and [`Node::children`] flattens whichever
//! shape a given variant has into the uniform view the loader's splicing
//! code and any generic tree-walker need.

use beef::lean::Cow;
use span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
  CompilationUnit(CompilationUnit<'src>),
  Module(Module<'src>),
  Use(Use<'src>),
  Function(Function<'src>),
  Arguments(Arguments<'src>),
  FunctionCall(FunctionCall<'src>),
  Block(Block<'src>),
  IfStatement(IfStatement<'src>),
  WhenStatement(WhenStatement<'src>),
  Pattern(Pattern<'src>),
  ForLoop(ForLoop<'src>),
  WhileLoop(WhileLoop<'src>),
  Identifier(Identifier<'src>),
  Literal(Literal<'src>),
  Binary(Binary<'src>),
  Unary(Unary<'src>),
  Index(Index<'src>),
  Pipe(Pipe<'src>),
  Range(Range<'src>),
  Grouping(Grouping<'src>),
}

impl<'src> Node<'src> {
  pub fn span(&self) -> Span {
    match self {
      Node::CompilationUnit(n) => n.span,
      Node::Module(n) => n.span,
      Node::Use(n) => n.span,
      Node::Function(n) => n.span,
      Node::Arguments(n) => n.span,
      Node::FunctionCall(n) => n.span,
      Node::Block(n) => n.span,
      Node::IfStatement(n) => n.span,
      Node::WhenStatement(n) => n.span,
      Node::Pattern(n) => n.span,
      Node::ForLoop(n) => n.span,
      Node::WhileLoop(n) => n.span,
      Node::Identifier(n) => n.span,
      Node::Literal(n) => n.span,
      Node::Binary(n) => n.span,
      Node::Unary(n) => n.span,
      Node::Index(n) => n.span,
      Node::Pipe(n) => n.span,
      Node::Range(n) => n.span,
      Node::Grouping(n) => n.span,
    }
  }

  /// Flattens this node's fields into the uniform child-list view used by
  /// the loader's splicing code and any generic tree-walker. The order
  /// matches each kind's grammar production.
  pub fn children(&self) -> Vec<&Node<'src>> {
    match self {
      Node::CompilationUnit(n) => n.children.iter().collect(),
      Node::Module(n) => std::iter::once(n.name.as_ref()).chain(n.body.iter()).collect(),
      Node::Use(n) => vec![n.target.as_ref()],
      Node::Function(n) => vec![n.name.as_ref(), n.arguments.as_ref(), n.body.as_ref()],
      Node::Arguments(n) => n.items.iter().collect(),
      Node::FunctionCall(n) => {
        let mut out = vec![n.target.as_ref(), n.arguments.as_ref()];
        if let Some(body) = &n.body {
          out.push(body.as_ref());
        }
        out
      }
      Node::Block(n) => n.statements.iter().collect(),
      Node::IfStatement(n) => {
        let mut out = vec![n.condition.as_ref(), n.body.as_ref()];
        out.extend(n.elseifs.iter());
        if let Some(else_block) = &n.else_block {
          out.push(else_block.as_ref());
        }
        out
      }
      Node::WhenStatement(n) => std::iter::once(n.subject.as_ref()).chain(n.patterns.iter()).collect(),
      Node::Pattern(n) => n.patterns.iter().chain(std::iter::once(n.result.as_ref())).collect(),
      Node::ForLoop(n) => vec![n.binding.as_ref(), n.iterable.as_ref(), n.body.as_ref()],
      Node::WhileLoop(n) => vec![n.condition.as_ref(), n.body.as_ref()],
      Node::Identifier(_) => vec![],
      Node::Literal(_) => vec![],
      Node::Binary(n) => vec![n.left.as_ref(), n.right.as_ref()],
      Node::Unary(n) => vec![n.operand.as_ref()],
      Node::Index(n) => vec![n.target.as_ref(), n.index.as_ref()],
      Node::Pipe(n) => vec![n.left.as_ref(), n.right.as_ref()],
      Node::Range(n) => vec![n.start.as_ref(), n.end.as_ref()],
      Node::Grouping(n) => vec![n.inner.as_ref()],
    }
  }

  pub fn as_identifier(&self) -> Option<&Identifier<'src>> {
    match self {
      Node::Identifier(ident) => Some(ident),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit<'src> {
  pub span: Span,
  pub children: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module<'src> {
  pub span: Span,
  pub name: Box<Node<'src>>,
  pub body: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Use<'src> {
  pub span: Span,
  pub target: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function<'src> {
  pub span: Span,
  pub name: Box<Node<'src>>,
  pub arguments: Box<Node<'src>>,
  pub body: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arguments<'src> {
  pub span: Span,
  pub items: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall<'src> {
  pub span: Span,
  pub target: Box<Node<'src>>,
  pub arguments: Box<Node<'src>>,
  /// Only ever set for the decorator-call production, which may attach a
  /// trailing `: Block` to the call it introduces.
  pub body: Option<Box<Node<'src>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block<'src> {
  pub span: Span,
  pub statements: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement<'src> {
  pub span: Span,
  pub condition: Box<Node<'src>>,
  pub body: Box<Node<'src>>,
  pub elseifs: Vec<Node<'src>>,
  pub else_block: Option<Box<Node<'src>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenStatement<'src> {
  pub span: Span,
  pub subject: Box<Node<'src>>,
  pub patterns: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern<'src> {
  pub span: Span,
  pub patterns: Vec<Node<'src>>,
  pub result: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop<'src> {
  pub span: Span,
  pub binding: Box<Node<'src>>,
  pub iterable: Box<Node<'src>>,
  pub body: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop<'src> {
  pub span: Span,
  pub condition: Box<Node<'src>>,
  pub body: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier<'src> {
  pub span: Span,
  pub name: Cow<'src, str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal<'src> {
  pub span: Span,
  pub value: LiteralValue<'src>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue<'src> {
  Number(f64),
  String(Cow<'src, str>),
  Bool(bool),
  Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Rem,
  Eq,
  Neq,
  Less,
  LessEq,
  More,
  MoreEq,
  And,
  Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary<'src> {
  pub span: Span,
  pub op: BinaryOp,
  pub left: Box<Node<'src>>,
  pub right: Box<Node<'src>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
  Neg,
  Not,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary<'src> {
  pub span: Span,
  pub op: UnaryOp,
  pub operand: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Index<'src> {
  pub span: Span,
  pub target: Box<Node<'src>>,
  pub index: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe<'src> {
  pub span: Span,
  pub left: Box<Node<'src>>,
  pub right: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Range<'src> {
  pub span: Span,
  pub start: Box<Node<'src>>,
  pub end: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<'src> {
  pub span: Span,
  pub inner: Box<Node<'src>>,
}

pub fn ident<'src>(span: impl Into<Span>, name: impl Into<Cow<'src, str>>) -> Node<'src> {
  Node::Identifier(Identifier {
    span: span.into(),
    name: name.into(),
  })
}

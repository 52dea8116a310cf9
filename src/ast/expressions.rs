use crate::{lexer::tokens::Token, Span};

use super::ast::{impl_node, Node, NodeKind};

/// Expression
///
/// Closed set of expression nodes. Children are owned through `Box`/`Vec`,
/// so the tree never shares nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    Symbol(SymbolExpr),
    FieldAccess(FieldAccessExpr),
    Binary(BinaryExpr),
    Application(ApplicationExpr),
    Tuple(TupleExpr),
    List(ListExpr),
}

impl Node for Expr {
    fn get_node_kind(&self) -> NodeKind {
        match self {
            Expr::Number(expr) => expr.get_node_kind(),
            Expr::Symbol(expr) => expr.get_node_kind(),
            Expr::FieldAccess(expr) => expr.get_node_kind(),
            Expr::Binary(expr) => expr.get_node_kind(),
            Expr::Application(expr) => expr.get_node_kind(),
            Expr::Tuple(expr) => expr.get_node_kind(),
            Expr::List(expr) => expr.get_node_kind(),
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            Expr::Number(expr) => expr.get_span(),
            Expr::Symbol(expr) => expr.get_span(),
            Expr::FieldAccess(expr) => expr.get_span(),
            Expr::Binary(expr) => expr.get_span(),
            Expr::Application(expr) => expr.get_span(),
            Expr::Tuple(expr) => expr.get_span(),
            Expr::List(expr) => expr.get_span(),
        }
    }
}

// LITERALS

/// Number Expression
/// Represents a numeric literal. `raw` keeps the source text so `1` and
/// `1.0` stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: f64,
    pub raw: String,
    pub span: Span,
}

impl NumberExpr {
    pub fn is_float(&self) -> bool {
        self.raw.contains('.')
    }
}

/// Symbol Expression
/// Represents an identifier, including builtin type names used as values
/// (`float x` converts `x`).
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// COMPOUND

/// Field Access Expression
/// `object.field`; chains nest to the left.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccessExpr {
    pub object: Box<Expr>,
    pub field: String,
    pub span: Span,
}

/// Binary Expression
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Application Expression
/// One argument applied to a callee; `f x y` is `(f x) y`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationExpr {
    pub callee: Box<Expr>,
    pub argument: Box<Expr>,
    pub span: Span,
}

impl ApplicationExpr {
    /// Walks down the callee chain and returns the applied function with
    /// its arguments in source order.
    pub fn flatten(&self) -> (&Expr, Vec<&Expr>) {
        let mut arguments = vec![self.argument.as_ref()];
        let mut callee = self.callee.as_ref();

        while let Expr::Application(inner) = callee {
            arguments.push(inner.argument.as_ref());
            callee = inner.callee.as_ref();
        }

        arguments.reverse();
        (callee, arguments)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

// LET

/// Let Binding
/// `name = value` inside a let-in block.
#[derive(Debug, Clone, PartialEq)]
pub struct LetBinding {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

/// Let-In Expression
///
/// Bindings in declaration order, followed by the two names given after
/// `@in`.
#[derive(Debug, Clone, PartialEq)]
pub struct LetInExpr {
    pub bindings: Vec<LetBinding>,
    pub inputs: [String; 2],
    pub span: Span,
}

impl LetInExpr {
    pub fn binding(&self, name: &str) -> Option<&LetBinding> {
        self.bindings.iter().find(|binding| binding.name == name)
    }
}

impl_node!(
    NumberExpr => NumberLiteral,
    SymbolExpr => Identifier,
    FieldAccessExpr => FieldAccess,
    BinaryExpr => BinOp,
    ApplicationExpr => FunctionApplication,
    TupleExpr => Tuple,
    ListExpr => List,
    LetBinding => LetBinding,
    LetInExpr => LetInExpr,
);

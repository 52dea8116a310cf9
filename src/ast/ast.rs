use std::fmt::Debug;

use crate::Span;

/// Node Kinds
///
/// Every node of the tree reports one of these through [`Node::get_node_kind`].
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum NodeKind {
    Program,
    // Declarations
    TypeDef,
    Field,
    Input,
    Uniform,
    Output,
    Include,
    FunctionDef,
    TypeSignature,
    EntryPoint,
    OperatorOverload,
    // Expressions
    LetInExpr,
    LetBinding,
    Identifier,
    NumberLiteral,
    List,
    Tuple,
    FieldAccess,
    BinOp,
    FunctionApplication,
}

/// Node Trait
///
/// Defines the behavior shared by all nodes in the AST.
pub trait Node: Debug {
    /// Returns the kind of the node.
    fn get_node_kind(&self) -> NodeKind;
    /// Returns the span of the node.
    fn get_span(&self) -> &Span;
}

/// Implements [`Node`] for structs holding a `span` field.
macro_rules! impl_node {
    ($($node:ty => $kind:ident),* $(,)?) => {
        $(
            impl $crate::ast::ast::Node for $node {
                fn get_node_kind(&self) -> $crate::ast::ast::NodeKind {
                    $crate::ast::ast::NodeKind::$kind
                }
                fn get_span(&self) -> &$crate::Span {
                    &self.span
                }
            }
        )*
    };
}

pub(crate) use impl_node;

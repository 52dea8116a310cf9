use crate::Span;

use super::{
    ast::{impl_node, Node, NodeKind},
    expressions::{Expr, LetInExpr},
};

/// Program
///
/// Root of every successful parse. Items are kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
    pub span: Span,
}

impl Program {
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.items.iter().filter_map(|item| match &item.decl {
            Decl::FunctionDef(function) => Some(function),
            _ => None,
        })
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions().find(|function| function.name == name)
    }

    pub fn entry_point(&self) -> Option<&EntryPoint> {
        self.items.iter().find_map(|item| match &item.decl {
            Decl::EntryPoint(entry) => Some(entry),
            _ => None,
        })
    }
}

/// Top level item: a declaration plus the `@internal` marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub decl: Decl,
    pub internal: bool,
}

impl Node for Item {
    fn get_node_kind(&self) -> NodeKind {
        self.decl.get_node_kind()
    }
    fn get_span(&self) -> &Span {
        self.decl.get_span()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    TypeDef(TypeDef),
    Input(InputBlock),
    Output(OutputBlock),
    Include(Include),
    FunctionDef(FunctionDef),
    EntryPoint(EntryPoint),
    OperatorOverload(OperatorOverload),
}

impl Node for Decl {
    fn get_node_kind(&self) -> NodeKind {
        match self {
            Decl::TypeDef(decl) => decl.get_node_kind(),
            Decl::Input(decl) => decl.get_node_kind(),
            Decl::Output(decl) => decl.get_node_kind(),
            Decl::Include(decl) => decl.get_node_kind(),
            Decl::FunctionDef(decl) => decl.get_node_kind(),
            Decl::EntryPoint(decl) => decl.get_node_kind(),
            Decl::OperatorOverload(decl) => decl.get_node_kind(),
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            Decl::TypeDef(decl) => decl.get_span(),
            Decl::Input(decl) => decl.get_span(),
            Decl::Output(decl) => decl.get_span(),
            Decl::Include(decl) => decl.get_span(),
            Decl::FunctionDef(decl) => decl.get_span(),
            Decl::EntryPoint(decl) => decl.get_span(),
            Decl::OperatorOverload(decl) => decl.get_span(),
        }
    }
}

// DATA

/// `data Name :: { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub fields: Vec<Field>,
    pub span: Span,
}

/// Field of a data declaration. `aliases` holds the names listed after
/// `->`, e.g. `pos -> [position, p] :: float,`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub ty: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub span: Span,
}

// SHADER INTERFACE

/// `name :: type` entry of an input, uniform or output block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockField {
    pub name: String,
    pub ty: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    pub fields: Vec<BlockField>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEntry {
    Field(BlockField),
    Uniforms(UniformBlock),
}

/// `@in Name :: { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct InputBlock {
    pub name: String,
    pub entries: Vec<InputEntry>,
    pub span: Span,
}

impl InputBlock {
    pub fn fields(&self) -> impl Iterator<Item = &BlockField> {
        self.entries.iter().filter_map(|entry| match entry {
            InputEntry::Field(field) => Some(field),
            InputEntry::Uniforms(_) => None,
        })
    }

    pub fn uniforms(&self) -> impl Iterator<Item = &BlockField> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                InputEntry::Uniforms(block) => Some(block.fields.iter()),
                InputEntry::Field(_) => None,
            })
            .flatten()
    }
}

/// `@out Name :: { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBlock {
    pub name: String,
    pub fields: Vec<BlockField>,
    pub span: Span,
}

/// `@include (a, b) -> dest`
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    pub sources: Vec<String>,
    pub destination: String,
    pub span: Span,
}

// FUNCTIONS

/// `name :: A -> B -> R`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSignature {
    pub name: String,
    pub params: Vec<String>,
    pub return_type: String,
    pub span: Span,
}

/// `name a b = body`, together with every signature declared for `name`
/// before it, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub signatures: Vec<TypeSignature>,
    pub params: Vec<String>,
    pub body: Expr,
    pub span: Span,
}

impl FunctionDef {
    /// More than one attached signature.
    pub fn is_overloaded(&self) -> bool {
        self.signatures.len() > 1
    }
}

/// `@main name = let ... @in a b`
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPoint {
    pub name: String,
    pub body: LetInExpr,
    pub span: Span,
}

/// `(+) a b :: body`
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorOverload {
    pub operator: String,
    pub params: Vec<String>,
    pub body: Expr,
    pub span: Span,
}

impl_node!(
    Program => Program,
    TypeDef => TypeDef,
    Field => Field,
    BlockField => Field,
    UniformBlock => Uniform,
    InputBlock => Input,
    OutputBlock => Output,
    Include => Include,
    TypeSignature => TypeSignature,
    FunctionDef => FunctionDef,
    EntryPoint => EntryPoint,
    OperatorOverload => OperatorOverload,
);

//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that turns the lexer's token stream
//! into a [`Program`](crate::ast::items::Program). Expressions use
//! precedence climbing with implicit function application; declarations
//! are parsed by recursive descent. It handles:
//!
//! - Data declarations, shader input/output blocks and includes
//! - The `@main` entry point and its let-in body
//! - Function definitions and the type signatures declared ahead of them
//! - Operator overloads
//!
//! Errors are fatal: the first one ends the parse.

pub mod expr;
pub mod items;
pub mod lookups;
pub mod parser;
pub mod signatures;

#[cfg(test)]
mod tests;

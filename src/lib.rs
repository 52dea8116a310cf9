#![allow(clippy::module_inception)]

//! Front end for the haskgl shading language.
//!
//! Source text is scanned by [`lexer::lexer::Lexer`] and turned into a
//! [`ast::items::Program`] by [`parser::parser::parse`].

use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Builds a span covering `start` up to the end of `end`.
    pub fn between(start: &Span, end: &Span) -> Span {
        Span {
            start: start.start.clone(),
            end: end.end.clone(),
        }
    }
}

//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts haskgl source
//! into tokens for parsing. It handles:
//!
//! - Pull based scanning with one token of lookahead
//! - Recognition of annotations (`@main`, `@in`, ...), keywords and builtin types
//! - Numbers, identifiers, operators and punctuation
//! - Newlines, which are significant and emitted as tokens
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;

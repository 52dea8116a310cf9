use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("data", TokenKind::Data);
        map.insert("@internal", TokenKind::Internal);
        map.insert("@main", TokenKind::Main);
        map.insert("@include", TokenKind::Include);
        map.insert("@uniform", TokenKind::Uniforms);
        map.insert("@in", TokenKind::Input);
        map.insert("@out", TokenKind::Output);
        // Builtin types
        map.insert("float", TokenKind::Type);
        map.insert("int", TokenKind::Type);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    End,
    NewLine,
    Identifier,
    Number,
    Type,

    Plus,
    Minus,
    Multiply,
    Divide,

    Equality, // ==
    Equals,   // =

    Colon,
    DoubleColon,
    RightArrow,
    Dot,
    Comma,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,

    // Reserved
    Data,
    Include,
    Uniforms,
    Input,
    Output,
    Internal,
    Main,
    Let,

    Unknown,
}

impl TokenKind {
    /// Whether this kind is one of the binary operators handled by the
    /// precedence table.
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Equality
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Human readable form of the lexeme, used in error messages.
    pub fn lexeme(&self) -> &str {
        match self.kind {
            TokenKind::NewLine => "<newline>",
            TokenKind::End => "<end>",
            _ => &self.value,
        }
    }
}

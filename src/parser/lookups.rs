use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, items::Decl},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, items::*, parser::Parser};

/// Operator precedence. Higher binds tighter; application binds tighter
/// than all of these and is handled before the table is consulted.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default = 0,
    Relational = 10,
    Additive = 20,
    Multiplicative = 30,
}

impl BindingPower {
    pub fn precedence(self) -> u8 {
        self as u8
    }
}

/// Returns `None` when the declaration only updates parser state (type
/// signatures).
pub type ItemHandler = fn(&mut Parser) -> Result<Option<Decl>, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Relational
    parser.led(TokenKind::Equality, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Multiply, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Divide, BindingPower::Multiplicative, parse_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_number_expr);
    parser.nud(TokenKind::Type, parse_symbol_expr);
    parser.nud(TokenKind::Identifier, parse_symbol_expr);
    parser.nud(TokenKind::LeftParen, parse_grouping_expr);
    parser.nud(TokenKind::LeftBracket, parse_list_expr);

    // Declarations
    parser.item(TokenKind::Input, parse_input_decl);
    parser.item(TokenKind::Output, parse_output_decl);
    parser.item(TokenKind::Include, parse_include_decl);
    parser.item(TokenKind::Main, parse_entry_point_decl);
    parser.item(TokenKind::Data, parse_data_decl);
    parser.item(TokenKind::Identifier, parse_binding_decl);
    parser.item(TokenKind::LeftParen, parse_operator_overload_decl);
}

// Lookup tables inside parser struct, so it's easier
pub type ItemLookup = HashMap<TokenKind, ItemHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

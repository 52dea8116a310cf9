//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program loop.
//! The parser pulls tokens from a [`Lexer`] one at a time and keeps a
//! single token of lookahead. Declarations are dispatched through a lookup
//! table keyed by the current token; expressions use precedence climbing
//! with NUD/LED handlers.
//!
//! It maintains lookup tables for:
//! - Top level declaration handlers
//! - NUD (null denotation) handlers for primary expressions
//! - LED (left denotation) handlers for binary operators
//! - Binding powers for operator precedence
//!
//! and the table of type signatures waiting for their definition.

use std::{collections::HashMap, mem, rc::Rc};

use log::{debug, warn};

use crate::{
    ast::{
        ast::Node,
        items::{Decl, Item, Program},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, ItemHandler, ItemLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup,
    },
    signatures::PendingSignatures,
};

/// The main parser structure that maintains parsing state.
///
/// The parser exclusively owns its lexer, the current lookahead token and
/// the pending signature table.
pub struct Parser {
    /// Token source
    lexer: Lexer,
    /// Current lookahead token
    current: Token,
    /// End of the last consumed token, used to close spans
    previous_end: Position,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for top level declaration handlers
    item_lookup: ItemLookup,
    /// Lookup table for null denotation (primary) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Signatures declared ahead of their definition
    pending_signatures: PendingSignatures,
}

impl Parser {
    /// Creates a new Parser and reads the first token from `lexer`.
    ///
    /// The lookup tables start empty; [`parse`] fills them through
    /// [`create_token_lookups`].
    pub fn new(mut lexer: Lexer) -> Self {
        let file = Rc::clone(lexer.file());
        let current = lexer.next();

        Parser {
            lexer,
            previous_end: Position(0, Rc::clone(&file)),
            current,
            file,
            item_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            pending_signatures: PendingSignatures::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the token after the current one without consuming anything.
    pub fn peek_token(&self) -> Token {
        self.lexer.peek()
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next();
        let previous = mem::replace(&mut self.current, next);
        self.previous_end = previous.span.end.clone();
        previous
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return if expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind == expected_kind {
            return Ok(self.advance());
        }

        if let Some(error) = error {
            return Err(error);
        }

        let error_impl = if token.kind == TokenKind::Unknown {
            ErrorImpl::UnrecognisedToken {
                token: token.value.clone(),
                expected: Some(expected_kind),
            }
        } else {
            ErrorImpl::UnexpectedToken {
                token: token.lexeme().to_string(),
                expected: expected_kind,
            }
        };

        Err(Error::new(error_impl, token.span.start.clone()))
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes the current token if it is one of `kinds`, otherwise fails
    /// with `message`.
    pub fn expect_one_of(&mut self, kinds: &[TokenKind], message: &str) -> Result<Token, Error> {
        if self.current.is_one_of_many(kinds) {
            Ok(self.advance())
        } else {
            Err(self.error_detailed(message))
        }
    }

    /// Consumes a line terminator. The end of input also terminates a line
    /// and is left in place.
    pub fn expect_line_end(&mut self) -> Result<(), Error> {
        if self.current_token_kind() == TokenKind::End {
            return Ok(());
        }

        self.expect(TokenKind::NewLine)?;
        Ok(())
    }

    pub fn skip_newlines(&mut self) {
        while self.current_token_kind() == TokenKind::NewLine {
            self.advance();
        }
    }

    /// Builds an [`ErrorImpl::UnexpectedTokenDetailed`] for the current token.
    pub fn error_detailed(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current.lexeme().to_string(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::End
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_item_lookup(&self) -> &ItemLookup {
        &self.item_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (primary) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a top level declaration handler for a token.
    pub fn item(&mut self, kind: TokenKind, item_fn: ItemHandler) {
        self.item_lookup.insert(kind, item_fn);
    }

    /// Signatures still waiting for their definition.
    pub fn pending_signatures(&self) -> &PendingSignatures {
        &self.pending_signatures
    }

    pub fn pending_signatures_mut(&mut self) -> &mut PendingSignatures {
        &mut self.pending_signatures
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end.clone(),
        }
    }
}

/// Parses everything `lexer` produces into a [`Program`].
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses declarations until the end
/// token.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing)
/// - Result containing either the Program or the first Error
pub fn parse(lexer: Lexer) -> (Parser, Result<Program, Error>) {
    let mut parser = Parser::new(lexer);
    create_token_lookups(&mut parser);

    let program = parse_program(&mut parser);
    (parser, program)
}

/// Parses `source` and drops the parser state.
pub fn parse_source(source: &str, file: Option<String>) -> Result<Program, Error> {
    parse(Lexer::new(source, file)).1
}

fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    let mut items = vec![];
    let mut internal = false;

    while parser.has_tokens() {
        if parser.current_token_kind() == TokenKind::Internal {
            parser.advance();
            parser.expect(TokenKind::NewLine)?;
            internal = true;
            continue;
        }

        let handler = parser
            .get_item_lookup()
            .get(&parser.current_token_kind())
            .copied();

        match handler {
            Some(handler) => {
                if let Some(decl) = handler(parser)? {
                    debug!(
                        "parsed {:?} `{}` (internal: {})",
                        decl.get_node_kind(),
                        decl_name(&decl),
                        internal
                    );
                    items.push(Item { decl, internal });
                    internal = false;
                }
            }
            None => {
                parser.advance();
            }
        }
    }

    for name in parser.pending_signatures().names() {
        warn!("type signature for `{}` has no definition", name);
    }

    Ok(Program {
        items,
        span: Span {
            start: Position(0, Rc::clone(&parser.file)),
            end: parser.get_position(),
        },
    })
}

fn decl_name(decl: &Decl) -> &str {
    match decl {
        Decl::TypeDef(decl) => &decl.name,
        Decl::Input(decl) => &decl.name,
        Decl::Output(decl) => &decl.name,
        Decl::Include(decl) => &decl.destination,
        Decl::FunctionDef(decl) => &decl.name,
        Decl::EntryPoint(decl) => &decl.name,
        Decl::OperatorOverload(decl) => &decl.operator,
    }
}

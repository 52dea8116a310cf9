use crate::{
    ast::{
        ast::Node,
        expressions::{
            ApplicationExpr, BinaryExpr, Expr, FieldAccessExpr, LetBinding, LetInExpr, ListExpr,
            NumberExpr, SymbolExpr, TupleExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Precedence climbing entry point.
///
/// Parses one application chain, then folds every following operator whose
/// precedence is at least `min_precedence`.
pub fn parse_expr(parser: &mut Parser, min_precedence: u8) -> Result<Expr, Error> {
    let mut left = parse_application_expr(parser)?;

    while let Some(bp) = parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        if bp.precedence() < min_precedence {
            break;
        }

        let led = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => break,
        };

        left = led(parser, left, bp)?;
    }

    Ok(left)
}

/// Juxtaposed primaries: `f a b` is `(f a) b`.
pub fn parse_application_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut callee = parse_primary_expr(parser)?;

    while parser
        .get_nud_lookup()
        .contains_key(&parser.current_token_kind())
    {
        let argument = parse_primary_expr(parser)?;

        callee = Expr::Application(ApplicationExpr {
            span: Span::between(callee.get_span(), argument.get_span()),
            callee: Box::new(callee),
            argument: Box::new(argument),
        });
    }

    Ok(callee)
}

/// Dispatches to the NUD handler of the current token and applies any
/// `.field` suffixes.
pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let handler = parser
        .get_nud_lookup()
        .get(&parser.current_token_kind())
        .copied();

    let Some(handler) = handler else {
        let token = parser.current_token();
        let error_impl = if token.kind == TokenKind::Unknown {
            ErrorImpl::UnrecognisedToken {
                token: token.value.clone(),
                expected: None,
            }
        } else {
            ErrorImpl::ExpectedExpression {
                token: token.lexeme().to_string(),
            }
        };
        return Err(Error::new(error_impl, parser.get_position()));
    };

    let expr = handler(parser)?;
    parse_field_access(parser, expr)
}

/// `a.b.c` nests as `FieldAccess(c, FieldAccess(b, a))`.
pub fn parse_field_access(parser: &mut Parser, mut object: Expr) -> Result<Expr, Error> {
    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        let field = parser.expect(TokenKind::Identifier)?;

        object = Expr::FieldAccess(FieldAccessExpr {
            span: Span {
                start: object.get_span().start.clone(),
                end: field.span.end.clone(),
            },
            object: Box::new(object),
            field: field.value,
        });
    }

    Ok(object)
}

pub fn parse_number_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Number)?;

    match token.value.parse::<f64>() {
        Ok(value) => Ok(Expr::Number(NumberExpr {
            value,
            raw: token.value,
            span: token.span,
        })),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError { token: token.value },
            token.span.start,
        )),
    }
}

/// Identifiers, and builtin type names used as values.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();

    Ok(Expr::Symbol(SymbolExpr {
        value: token.value,
        span: token.span,
    }))
}

/// `( expr )`, or a tuple when the first element is followed by a comma.
/// `()` is the empty tuple.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::LeftParen)?.span.start;

    if parser.current_token_kind() == TokenKind::RightParen {
        parser.advance();
        return Ok(Expr::Tuple(TupleExpr {
            elements: vec![],
            span: parser.span_from(start),
        }));
    }

    let first = parse_expr(parser, BindingPower::Default.precedence())?;

    if parser.current_token_kind() != TokenKind::Comma {
        parser.expect(TokenKind::RightParen)?;
        return Ok(first);
    }

    let mut elements = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        elements.push(parse_expr(parser, BindingPower::Default.precedence())?);
    }

    parser.expect(TokenKind::RightParen)?;

    Ok(Expr::Tuple(TupleExpr {
        elements,
        span: parser.span_from(start),
    }))
}

/// `[a, b, c]`
pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::LeftBracket)?.span.start;

    let mut elements = vec![];
    while parser.current_token_kind() != TokenKind::RightBracket {
        elements.push(parse_expr(parser, BindingPower::Default.precedence())?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::RightBracket)?;

    Ok(Expr::List(ListExpr {
        elements,
        span: parser.span_from(start),
    }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator = parser.advance();

    // One above the operator's own precedence keeps equal operators left
    // associative.
    let right = parse_expr(parser, bp.precedence() + 1)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span::between(left.get_span(), right.get_span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

/// ```text
/// let a = expr
///     b = expr
/// @in first second
/// ```
///
/// The trailing line terminator after the input names is left to the
/// caller.
pub fn parse_let_in_expr(parser: &mut Parser) -> Result<LetInExpr, Error> {
    let start = parser.expect(TokenKind::Let)?.span.start;

    let mut bindings = vec![parse_let_binding(parser)?];
    parser.expect(TokenKind::NewLine)?;

    loop {
        parser.skip_newlines();
        if parser.current_token_kind() == TokenKind::Input {
            break;
        }

        bindings.push(parse_let_binding(parser)?);
    }

    parser.expect(TokenKind::Input)?;
    let first = parser.expect(TokenKind::Identifier)?.value;
    let second = parser.expect(TokenKind::Identifier)?.value;

    Ok(LetInExpr {
        bindings,
        inputs: [first, second],
        span: parser.span_from(start),
    })
}

fn parse_let_binding(parser: &mut Parser) -> Result<LetBinding, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Equals)?;
    let value = parse_expr(parser, BindingPower::Default.precedence())?;

    Ok(LetBinding {
        span: Span {
            start: name.span.start,
            end: value.get_span().end.clone(),
        },
        name: name.value,
        value,
    })
}

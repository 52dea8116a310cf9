use log::debug;

use crate::{
    ast::items::{
        BlockField, Decl, EntryPoint, Field, FunctionDef, Include, InputBlock, InputEntry,
        OperatorOverload, OutputBlock, TypeDef, TypeSignature, UniformBlock,
    },
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::{parse_expr, parse_let_in_expr},
    lookups::BindingPower,
    parser::Parser,
};

/// Token kinds accepted where a type name is expected.
const TYPE_NAME: [TokenKind; 2] = [TokenKind::Type, TokenKind::Identifier];

/// ```text
/// data Vec3 :: {
///     x :: float,
///     y -> [g, v] :: float,
/// }
/// ```
///
/// The type-first form (`float x,`) is accepted as well, and blank lines
/// between fields are skipped. The declaration ends at `}`; whatever
/// follows on the line is left to the program loop.
pub fn parse_data_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    let start = parser.expect(TokenKind::Data)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::DoubleColon)?;
    parser.expect(TokenKind::LeftBrace)?;
    parser.skip_newlines();

    let mut fields = Vec::new();
    while parser.current_token_kind() != TokenKind::RightBrace {
        fields.push(parse_data_field(parser)?);
        parser.skip_newlines();
    }

    parser.expect(TokenKind::RightBrace)?;
    let span = parser.span_from(start);

    Ok(Some(Decl::TypeDef(TypeDef { name, fields, span })))
}

fn parse_data_field(parser: &mut Parser) -> Result<Field, Error> {
    let start = parser.get_position();

    let (ty, name, aliases) = if parser.current_token_kind() == TokenKind::Type {
        let ty = parser.advance().value;
        let name = parser.expect(TokenKind::Identifier)?.value;
        let aliases = parse_alias_list(parser)?;
        (ty, name, aliases)
    } else {
        let name = parser.expect(TokenKind::Identifier)?.value;
        let aliases = parse_alias_list(parser)?;

        if parser.current_token_kind() == TokenKind::DoubleColon {
            parser.advance();
        }

        let ty = parser
            .expect_one_of(&[TokenKind::Type], "expected a builtin field type")?
            .value;
        (ty, name, aliases)
    };

    parser.expect(TokenKind::Comma)?;

    Ok(Field {
        ty,
        name,
        aliases,
        span: parser.span_from(start),
    })
}

/// Optional `-> [a, b]` clause after a field name.
fn parse_alias_list(parser: &mut Parser) -> Result<Vec<String>, Error> {
    let mut aliases = Vec::new();
    if parser.current_token_kind() != TokenKind::RightArrow {
        return Ok(aliases);
    }

    parser.advance();
    parser.expect(TokenKind::LeftBracket)?;
    aliases.push(parser.expect(TokenKind::Identifier)?.value);

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        aliases.push(parser.expect(TokenKind::Identifier)?.value);
    }

    parser.expect(TokenKind::RightBracket)?;
    Ok(aliases)
}

/// ```text
/// @in Vertex :: {
///     position :: Vec3,
///     @uniform :: {
///         time :: float,
///     },
/// }
/// ```
pub fn parse_input_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    let start = parser.expect(TokenKind::Input)?.span.start;
    let name = parse_block_header(parser)?;

    let mut entries = Vec::new();
    while parser.current_token_kind() != TokenKind::RightBrace {
        if parser.current_token_kind() == TokenKind::Uniforms {
            entries.push(InputEntry::Uniforms(parse_uniform_block(parser)?));
        } else {
            entries.push(InputEntry::Field(parse_block_field(parser)?));
        }

        finish_block_line(parser)?;
    }

    parser.expect(TokenKind::RightBrace)?;
    let span = parser.span_from(start);

    Ok(Some(Decl::Input(InputBlock {
        name,
        entries,
        span,
    })))
}

/// `@out Fragment :: { color :: Vec4, }`
pub fn parse_output_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    let start = parser.expect(TokenKind::Output)?.span.start;
    let name = parse_block_header(parser)?;

    let mut fields = Vec::new();
    while parser.current_token_kind() != TokenKind::RightBrace {
        fields.push(parse_block_field(parser)?);
        finish_block_line(parser)?;
    }

    parser.expect(TokenKind::RightBrace)?;
    let span = parser.span_from(start);

    Ok(Some(Decl::Output(OutputBlock { name, fields, span })))
}

/// `name :: {` followed by its line break. Returns the name.
fn parse_block_header(parser: &mut Parser) -> Result<String, Error> {
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::DoubleColon)?;
    parser.expect(TokenKind::LeftBrace)?;
    parser.expect(TokenKind::NewLine)?;
    parser.skip_newlines();

    Ok(name)
}

fn parse_uniform_block(parser: &mut Parser) -> Result<UniformBlock, Error> {
    let start = parser.expect(TokenKind::Uniforms)?.span.start;

    parser.expect(TokenKind::DoubleColon)?;
    parser.expect(TokenKind::LeftBrace)?;
    parser.expect(TokenKind::NewLine)?;
    parser.skip_newlines();

    let mut fields = Vec::new();
    while parser.current_token_kind() != TokenKind::RightBrace {
        fields.push(parse_block_field(parser)?);
        finish_block_line(parser)?;
    }

    parser.expect(TokenKind::RightBrace)?;
    parser.expect(TokenKind::Comma)?;

    Ok(UniformBlock {
        fields,
        span: parser.span_from(start),
    })
}

/// `name :: type`
fn parse_block_field(parser: &mut Parser) -> Result<BlockField, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::DoubleColon)?;
    let ty = parser.expect_one_of(&TYPE_NAME, "expected a type name")?;

    Ok(BlockField {
        name: name.value,
        ty: ty.value,
        span: parser.span_from(name.span.start),
    })
}

/// Optional `,`, the line break, and any blank lines after it.
fn finish_block_line(parser: &mut Parser) -> Result<(), Error> {
    if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
    }

    parser.expect(TokenKind::NewLine)?;
    parser.skip_newlines();
    Ok(())
}

/// `@include (a, b) -> dest`
pub fn parse_include_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    let start = parser.expect(TokenKind::Include)?.span.start;

    parser.expect(TokenKind::LeftParen)?;
    let mut sources = vec![parser.expect(TokenKind::Identifier)?.value];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        sources.push(parser.expect(TokenKind::Identifier)?.value);
    }
    parser.expect(TokenKind::RightParen)?;

    parser.expect(TokenKind::RightArrow)?;
    let destination = parser.expect(TokenKind::Identifier)?.value;
    let span = parser.span_from(start);
    parser.expect_line_end()?;

    Ok(Some(Decl::Include(Include {
        sources,
        destination,
        span,
    })))
}

/// `@main name =` followed by a let-in expression, optionally on the next
/// line.
pub fn parse_entry_point_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    let start = parser.expect(TokenKind::Main)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::Equals)?;
    if parser.current_token_kind() == TokenKind::NewLine {
        parser.advance();
    }

    let body = parse_let_in_expr(parser)?;

    Ok(Some(Decl::EntryPoint(EntryPoint {
        name,
        body,
        span: parser.span_from(start),
    })))
}

/// A line starting with an identifier: either a type signature, which is
/// queued until its definition shows up, or a function definition.
pub fn parse_binding_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    let name = parser.expect(TokenKind::Identifier)?;

    if parser.current_token_kind() == TokenKind::DoubleColon {
        parser.advance();
        let signature = parse_type_signature(parser, name)?;

        debug!(
            "queued signature for `{}`: {:?} -> {}",
            signature.name, signature.params, signature.return_type
        );
        parser.pending_signatures_mut().push(signature);
        return Ok(None);
    }

    parse_function_def(parser, name).map(|function| Some(Decl::FunctionDef(function)))
}

/// Everything after `name ::` up to the end of the line. The last type is
/// the return type.
fn parse_type_signature(parser: &mut Parser, name: Token) -> Result<TypeSignature, Error> {
    let mut types = vec![parser.expect_one_of(&TYPE_NAME, "expected a type name")?.value];

    while parser.current_token_kind() == TokenKind::RightArrow {
        parser.advance();
        types.push(parser.expect_one_of(&TYPE_NAME, "expected a type name")?.value);
    }

    let span = parser.span_from(name.span.start);
    parser.expect_line_end()?;

    // `types` always holds at least one entry
    let return_type = types.pop().unwrap_or_default();

    Ok(TypeSignature {
        name: name.value,
        params: types,
        return_type,
        span,
    })
}

fn parse_function_def(parser: &mut Parser, name: Token) -> Result<FunctionDef, Error> {
    let mut params = Vec::new();
    while parser.current_token_kind() == TokenKind::Identifier {
        params.push(parser.advance().value);
    }

    parser.expect(TokenKind::Equals)?;
    let body = parse_expr(parser, BindingPower::Default.precedence())?;

    let signatures = parser.pending_signatures_mut().take(&name.value);
    if !signatures.is_empty() {
        debug!(
            "attached {} signature(s) to `{}`",
            signatures.len(),
            name.value
        );
    }

    Ok(FunctionDef {
        span: parser.span_from(name.span.start),
        name: name.value,
        signatures,
        params,
        body,
    })
}

/// `(+) a b :: body`
pub fn parse_operator_overload_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    let start = parser.expect(TokenKind::LeftParen)?.span.start;

    if !parser.current_token_kind().is_binary_operator() {
        return Err(parser.error_detailed("expected an operator to overload"));
    }
    let operator = parser.advance().value;
    parser.expect(TokenKind::RightParen)?;

    let mut params = Vec::new();
    while parser.current_token_kind() == TokenKind::Identifier {
        params.push(parser.advance().value);
    }

    parser.expect(TokenKind::DoubleColon)?;
    let body = parse_expr(parser, BindingPower::Default.precedence())?;

    Ok(Some(Decl::OperatorOverload(OperatorOverload {
        operator,
        params,
        body,
        span: parser.span_from(start),
    })))
}

//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Expressions: precedence, associativity, application, field access
//! - Data declarations, input/output blocks, includes
//! - The `@main` entry point and let-in expressions
//! - Type signatures, overloads and function definitions
//! - Error reporting

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{Node, NodeKind},
        expressions::Expr,
        items::{Decl, InputEntry, Program},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::{
    expr::parse_expr,
    lookups::create_token_lookups,
    parser::{parse, parse_source, Parser},
    signatures::PendingSignatures,
};

/// Renders an expression as an s-expression so trees compare as strings.
fn show(expr: &Expr) -> String {
    match expr {
        Expr::Number(number) => number.raw.clone(),
        Expr::Symbol(symbol) => symbol.value.clone(),
        Expr::FieldAccess(access) => format!("(. {} {})", show(&access.object), access.field),
        Expr::Binary(binary) => format!(
            "({} {} {})",
            binary.operator.value,
            show(&binary.left),
            show(&binary.right)
        ),
        Expr::Application(application) => format!(
            "(app {} {})",
            show(&application.callee),
            show(&application.argument)
        ),
        Expr::Tuple(tuple) => {
            let mut parts = vec![String::from("tuple")];
            parts.extend(tuple.elements.iter().map(show));
            format!("({})", parts.join(" "))
        }
        Expr::List(list) => format!(
            "[{}]",
            list.elements.iter().map(show).collect::<Vec<_>>().join(" ")
        ),
    }
}

fn expression_parser(source: &str) -> Parser {
    let mut parser = Parser::new(Lexer::new(source, Some("test.hgl".to_string())));
    create_token_lookups(&mut parser);
    parser
}

fn parse_expression(source: &str) -> Result<Expr, Error> {
    let mut parser = expression_parser(source);
    parse_expr(&mut parser, 0)
}

fn expression(source: &str) -> String {
    show(&parse_expression(source).unwrap())
}

fn program(source: &str) -> Program {
    parse_source(source, Some("test.hgl".to_string())).unwrap()
}

fn parse_error(source: &str) -> ErrorImpl {
    parse_source(source, Some("test.hgl".to_string()))
        .unwrap_err()
        .get_internal()
        .clone()
}

// EXPRESSIONS

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(expression("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(expression("1 * 2 + 3"), "(+ (* 1 2) 3)");
}

#[test]
fn test_equal_precedence_is_left_associative() {
    assert_eq!(expression("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(expression("a * b / c"), "(/ (* a b) c)");
}

#[test]
fn test_equality_binds_loosest() {
    assert_eq!(expression("a == b + c"), "(== a (+ b c))");
    assert_eq!(expression("a * 2 == b"), "(== (* a 2) b)");
}

#[test]
fn test_application_binds_tighter_than_operators() {
    assert_eq!(expression("f x + 1"), "(+ (app f x) 1)");
    assert_eq!(expression("1 + f x"), "(+ 1 (app f x))");
}

#[test]
fn test_application_is_left_associative() {
    assert_eq!(expression("f x y"), "(app (app f x) y)");
    assert_eq!(expression("mix a (b * 2) 0.5"), "(app (app (app mix a) (* b 2)) 0.5)");
}

#[test]
fn test_builtin_type_as_value() {
    assert_eq!(expression("float x"), "(app float x)");
}

#[test]
fn test_parentheses() {
    assert_eq!(expression("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    assert_eq!(expression("((a))"), "a");
}

#[test]
fn test_field_access_chain() {
    let expr = parse_expression("a.b.c").unwrap();

    let Expr::FieldAccess(outer) = &expr else {
        panic!("expected field access, got {:?}", expr);
    };
    assert_eq!(outer.field, "c");

    let Expr::FieldAccess(inner) = outer.object.as_ref() else {
        panic!("expected nested field access");
    };
    assert_eq!(inner.field, "b");
    assert_eq!(show(&inner.object), "a");
    assert_eq!(expr.get_node_kind(), NodeKind::FieldAccess);
}

#[test]
fn test_field_access_in_expressions() {
    assert_eq!(expression("v.x * 2"), "(* (. v x) 2)");
    assert_eq!(expression("(f x).y"), "(. (app f x) y)");
    assert_eq!(expression("length v.xy"), "(app length (. v xy))");
}

#[test]
fn test_field_access_after_number() {
    assert_eq!(expression("1.5.x"), "(. 1.5 x)");
}

#[test]
fn test_tuples_and_lists() {
    assert_eq!(expression("(a, b + 1)"), "(tuple a (+ b 1))");
    assert_eq!(expression("()"), "(tuple)");
    assert_eq!(expression("[1, 2, 3]"), "[1 2 3]");
    assert_eq!(expression("[]"), "[]");
    assert_eq!(expression("sum [a, b]"), "(app sum [a b])");
}

#[test]
fn test_number_literal_values() {
    let Expr::Number(number) = parse_expression("2.5").unwrap() else {
        panic!("expected number");
    };
    assert_eq!(number.value, 2.5);
    assert!(number.is_float());
}

#[test]
fn test_expression_stops_at_newline() {
    let mut parser = expression_parser("a b\nc");
    let expr = parse_expr(&mut parser, 0).unwrap();

    assert_eq!(show(&expr), "(app a b)");
    assert_eq!(parser.current_token_kind(), TokenKind::NewLine);
}

#[test]
fn test_min_precedence_stops_folding() {
    let mut parser = expression_parser("a + b * c");
    let expr = parse_expr(&mut parser, 30).unwrap();

    assert_eq!(show(&expr), "a");
    assert_eq!(parser.current_token_kind(), TokenKind::Plus);
}

#[test]
fn test_missing_primary_is_an_error() {
    let error = parse_expression("1 + = 2").unwrap_err();
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::ExpectedExpression {
            token: "=".to_string()
        }
    );

    let error = parse_expression("").unwrap_err();
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::ExpectedExpression {
            token: "<end>".to_string()
        }
    );
}

#[test]
fn test_unclosed_parenthesis() {
    let error = parse_expression("(1 + 2").unwrap_err();
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::UnexpectedToken {
            token: "<end>".to_string(),
            expected: TokenKind::RightParen
        }
    );
}

#[test]
fn test_unknown_character_in_expression() {
    let error = parse_expression("a + #").unwrap_err();
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
            expected: None
        }
    );
}

#[test]
fn test_parser_peek_token() {
    let mut parser = expression_parser("a b c");

    assert_eq!(parser.current_token().value, "a");
    assert_eq!(parser.peek_token().value, "b");
    assert_eq!(parser.current_token().value, "a");

    parser.advance();
    assert_eq!(parser.current_token().value, "b");
    assert_eq!(parser.peek_token().value, "c");
}

// DATA

#[test]
fn test_parse_data_single_line() {
    let program = program("data Vec3 :: { float x, float y, float z, }");

    assert_eq!(program.items.len(), 1);
    let Decl::TypeDef(def) = &program.items[0].decl else {
        panic!("expected type definition");
    };

    assert_eq!(def.name, "Vec3");
    assert_eq!(def.fields.len(), 3);
    let fields: Vec<(&str, &str)> = def
        .fields
        .iter()
        .map(|field| (field.ty.as_str(), field.name.as_str()))
        .collect();
    assert_eq!(fields, vec![("float", "x"), ("float", "y"), ("float", "z")]);
}

#[test]
fn test_parse_data_with_aliases() {
    let source = "data Vertex :: {\n    position -> [pos, p] :: float,\n\n    uv float,\n    count :: int,\n}\n";
    let program = program(source);

    let Decl::TypeDef(def) = &program.items[0].decl else {
        panic!("expected type definition");
    };

    assert_eq!(def.fields.len(), 3);
    assert_eq!(def.fields[0].name, "position");
    assert_eq!(def.fields[0].aliases, vec!["pos", "p"]);
    assert_eq!(def.fields[0].ty, "float");
    assert_eq!(def.fields[1].name, "uv");
    assert!(def.fields[1].aliases.is_empty());
    assert_eq!(def.fields[2].ty, "int");
    assert_eq!(def.fields[2].get_node_kind(), NodeKind::Field);
}

#[test]
fn test_parse_empty_data() {
    let program = program("data Empty :: {\n}\n");

    let Decl::TypeDef(def) = &program.items[0].decl else {
        panic!("expected type definition");
    };
    assert!(def.fields.is_empty());
}

#[test]
fn test_block_declarations_end_at_closing_brace() {
    let program = program(
        "data V :: { float x, } ]\n@out F :: {\n    c :: float\n} ,\n@in I :: {\n    p :: V\n} g = 1\n",
    );

    let kinds: Vec<NodeKind> = program.items.iter().map(|item| item.get_node_kind()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::TypeDef, NodeKind::Output, NodeKind::Input, NodeKind::FunctionDef]
    );
    assert_eq!(program.function("g").unwrap().params.len(), 0);
}

#[test]
fn test_data_missing_closing_brace() {
    let error = parse_error("data Vec3 :: {\n    x :: float,\n");
    assert_eq!(
        error,
        ErrorImpl::UnexpectedToken {
            token: "<end>".to_string(),
            expected: TokenKind::Identifier
        }
    );

    assert!(parse_source("data Vec3 :: {\n    x :: float,\nadd a b = a + b\n", None).is_err());
}

#[test]
fn test_data_field_needs_builtin_type() {
    let error = parse_error("data Mesh :: {\n    origin :: Vec3,\n}\n");
    assert!(matches!(
        error,
        ErrorImpl::UnexpectedTokenDetailed { ref token, .. } if token == "Vec3"
    ));
}

#[test]
fn test_data_field_needs_comma() {
    let error = parse_error("data Vec2 :: {\n    x :: float\n}\n");
    assert_eq!(
        error,
        ErrorImpl::UnexpectedToken {
            token: "<newline>".to_string(),
            expected: TokenKind::Comma
        }
    );
}

#[test]
fn test_data_missing_name() {
    let error = parse_error("data :: {\n}\n");
    assert_eq!(
        error,
        ErrorImpl::UnexpectedToken {
            token: "::".to_string(),
            expected: TokenKind::Identifier
        }
    );
}

// INPUT / OUTPUT

#[test]
fn test_parse_input_block() {
    let source = "@in Vertex :: {\n    position :: Vec3,\n    @uniform :: {\n        time :: float,\n        scale :: float\n    },\n    index :: int\n}\n";
    let program = program(source);

    let Decl::Input(input) = &program.items[0].decl else {
        panic!("expected input block");
    };

    assert_eq!(input.name, "Vertex");
    assert_eq!(input.entries.len(), 3);
    assert!(matches!(&input.entries[0], InputEntry::Field(field) if field.name == "position" && field.ty == "Vec3"));
    let InputEntry::Uniforms(uniforms) = &input.entries[1] else {
        panic!("expected uniform block");
    };
    assert_eq!(uniforms.fields.len(), 2);
    assert_eq!(uniforms.fields[0].name, "time");
    assert_eq!(uniforms.fields[1].name, "scale");
    assert_eq!(uniforms.get_node_kind(), NodeKind::Uniform);
    assert!(matches!(&input.entries[2], InputEntry::Field(field) if field.ty == "int"));
}

#[test]
fn test_uniform_block_needs_trailing_comma() {
    let source = "@in Vertex :: {\n    @uniform :: {\n        time :: float,\n    }\n}\n";
    assert_eq!(
        parse_error(source),
        ErrorImpl::UnexpectedToken {
            token: "<newline>".to_string(),
            expected: TokenKind::Comma
        }
    );
}

#[test]
fn test_input_block_needs_newline_after_brace() {
    assert_eq!(
        parse_error("@in Vertex :: { position :: Vec3 }\n"),
        ErrorImpl::UnexpectedToken {
            token: "position".to_string(),
            expected: TokenKind::NewLine
        }
    );
}

#[test]
fn test_parse_output_block() {
    let program = program("@out Fragment :: {\n    color :: Vec4,\n    depth :: float\n}\n");

    let Decl::Output(output) = &program.items[0].decl else {
        panic!("expected output block");
    };
    assert_eq!(output.name, "Fragment");
    assert_eq!(output.fields.len(), 2);
    assert_eq!(output.fields[1].name, "depth");
    assert_eq!(output.get_node_kind(), NodeKind::Output);
}

// INCLUDE

#[test]
fn test_parse_include() {
    let program = program("@include (common, lighting) -> shader\n");

    let Decl::Include(include) = &program.items[0].decl else {
        panic!("expected include");
    };
    assert_eq!(include.sources, vec!["common", "lighting"]);
    assert_eq!(include.destination, "shader");
}

#[test]
fn test_include_needs_arrow() {
    assert_eq!(
        parse_error("@include (common) shader\n"),
        ErrorImpl::UnexpectedToken {
            token: "shader".to_string(),
            expected: TokenKind::RightArrow
        }
    );
}

// ENTRY POINT

#[test]
fn test_parse_entry_point() {
    let source = "@main shader =\n  let position = transform vertex.position\n      color = 1.0\n  @in vertex uniforms\n";
    let program = program(source);

    let entry = program.entry_point().unwrap();
    assert_eq!(entry.name, "shader");

    let body = &entry.body;
    assert_eq!(body.bindings.len(), 2);
    assert_eq!(body.bindings[0].name, "position");
    assert_eq!(
        show(&body.bindings[0].value),
        "(app transform (. vertex position))"
    );
    assert_eq!(body.bindings[1].name, "color");
    assert_eq!(show(&body.binding("color").unwrap().value), "1.0");
    assert_eq!(body.inputs, ["vertex".to_string(), "uniforms".to_string()]);
    assert_eq!(body.get_node_kind(), NodeKind::LetInExpr);
}

#[test]
fn test_entry_point_on_one_line() {
    let program = program("@main m = let x = 1\n@in a b");

    let entry = program.entry_point().unwrap();
    assert_eq!(entry.body.bindings.len(), 1);
    assert_eq!(entry.body.inputs, ["a".to_string(), "b".to_string()]);
}

#[test]
fn test_entry_point_missing_in() {
    assert_eq!(
        parse_error("@main m =\n  let x = 1\n"),
        ErrorImpl::UnexpectedToken {
            token: "<end>".to_string(),
            expected: TokenKind::Identifier
        }
    );
}

#[test]
fn test_let_requires_newline_after_first_binding() {
    assert_eq!(
        parse_error("@main m = let x = 1 @in a b\n"),
        ErrorImpl::UnexpectedToken {
            token: "@in".to_string(),
            expected: TokenKind::NewLine
        }
    );
}

// FUNCTIONS AND SIGNATURES

#[test]
fn test_signature_attaches_to_definition() {
    let source = "add :: int -> int -> int\nadd a b = a + b\n";
    let (parser, program) = parse(Lexer::new(source, Some("test.hgl".to_string())));
    let program = program.unwrap();

    assert_eq!(program.items.len(), 1);
    let add = program.function("add").unwrap();

    assert_eq!(add.signatures.len(), 1);
    assert_eq!(add.signatures[0].params, vec!["int", "int"]);
    assert_eq!(add.signatures[0].return_type, "int");
    assert_eq!(add.params, vec!["a", "b"]);
    assert_eq!(show(&add.body), "(+ a b)");
    assert!(!add.is_overloaded());

    assert!(!parser.pending_signatures().contains("add"));
    assert!(parser.pending_signatures().is_empty());
}

#[test]
fn test_overloads_attach_in_declaration_order() {
    let source = "scale :: float -> float\nscale :: Vec3 -> Vec3\nscale v = v * 2\n";
    let program = program(source);

    let scale = program.function("scale").unwrap();
    assert!(scale.is_overloaded());
    assert_eq!(scale.signatures[0].params, vec!["float"]);
    assert_eq!(scale.signatures[1].params, vec!["Vec3"]);
    assert_eq!(scale.signatures[1].return_type, "Vec3");
}

#[test]
fn test_signature_without_parameters() {
    let program = program("pi :: float\npi = 3.14159\n");

    let pi = program.function("pi").unwrap();
    assert!(pi.signatures[0].params.is_empty());
    assert_eq!(pi.signatures[0].return_type, "float");
    assert!(pi.params.is_empty());
}

#[test]
fn test_signature_without_definition_stays_pending() {
    let (parser, program) = parse(Lexer::new("orphan :: int -> int\nb = 1\n", None));
    let program = program.unwrap();

    assert!(program.function("b").unwrap().signatures.is_empty());
    assert!(parser.pending_signatures().contains("orphan"));
    assert_eq!(parser.pending_signatures().get("orphan").unwrap().len(), 1);
    assert_eq!(parser.pending_signatures().len(), 1);
}

#[test]
fn test_signature_after_definition_is_not_attached() {
    let (parser, program) = parse(Lexer::new("f x = x\nf :: int -> int\n", None));

    assert!(program.unwrap().function("f").unwrap().signatures.is_empty());
    assert!(parser.pending_signatures().contains("f"));
}

#[test]
fn test_signature_needs_types() {
    assert!(matches!(
        parse_error("f :: int -> 3\n"),
        ErrorImpl::UnexpectedTokenDetailed { ref token, .. } if token == "3"
    ));
}

#[test]
fn test_definition_needs_equals() {
    assert_eq!(
        parse_error("f x 1\n"),
        ErrorImpl::UnexpectedToken {
            token: "1".to_string(),
            expected: TokenKind::Equals
        }
    );
}

#[test]
fn test_definition_unknown_character() {
    assert_eq!(
        parse_error("f = #\n"),
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
            expected: None
        }
    );
}

#[test]
fn test_unknown_character_names_expected_kind() {
    let error = parse_source("data V :: {\n    x :: float #\n}\n", None).unwrap_err();

    assert_eq!(
        error.get_internal(),
        &ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
            expected: Some(TokenKind::Comma)
        }
    );
    assert_eq!(error.get_position().0, 27);
    assert_eq!(error.to_string(), "unrecognised token: \"#\", expected: Comma at shell:27");
}

#[test]
fn test_pending_signatures_table() {
    let program = program("a :: int\nb :: float\n");
    assert!(program.items.is_empty());

    let mut table = PendingSignatures::new();
    assert!(table.is_empty());
    assert!(table.take("missing").is_empty());

    let (parser, _) = parse(Lexer::new("a :: int\na :: float\nb :: float\n", None));
    let mut names: Vec<&str> = parser.pending_signatures().names().collect();
    names.sort();
    assert_eq!(names, vec!["a", "b"]);

    for signature in parser.pending_signatures().get("a").unwrap().iter().cloned() {
        table.push(signature);
    }
    let taken = table.take("a");
    assert_eq!(taken.len(), 2);
    assert_eq!(taken[0].return_type, "int");
    assert_eq!(taken[1].return_type, "float");
    assert!(!table.contains("a"));
}

// TOP LEVEL

#[test]
fn test_internal_marks_next_item_only() {
    let program = program("@internal\nhelper x = x\nvisible y = y\n");

    assert_eq!(program.items.len(), 2);
    assert!(program.items[0].internal);
    assert!(!program.items[1].internal);
}

#[test]
fn test_internal_survives_signature() {
    let program = program("@internal\nsq :: float -> float\nsq x = x * x\n");

    assert!(program.items[0].internal);
    assert_eq!(program.function("sq").unwrap().signatures.len(), 1);
}

#[test]
fn test_internal_survives_skipped_tokens() {
    let program = program("@internal\n}\nfoo = 1\nbar = 2\n");

    assert!(program.items[0].internal);
    assert!(!program.items[1].internal);
}

#[test]
fn test_internal_needs_newline() {
    assert_eq!(
        parse_error("@internal helper x = x\n"),
        ErrorImpl::UnexpectedToken {
            token: "helper".to_string(),
            expected: TokenKind::NewLine
        }
    );
}

#[test]
fn test_unknown_top_level_tokens_are_skipped() {
    let program = program("+ +\n,\n\n] foo = 1\n");

    assert_eq!(program.items.len(), 1);
    assert_eq!(program.function("foo").unwrap().params.len(), 0);
}

#[test]
fn test_empty_program() {
    let program = program("");
    assert!(program.items.is_empty());
    assert_eq!(program.get_node_kind(), NodeKind::Program);
}

#[test]
fn test_parse_operator_overload() {
    let program = program("(+) a b :: a.x + b.x\n");

    let Decl::OperatorOverload(overload) = &program.items[0].decl else {
        panic!("expected operator overload");
    };
    assert_eq!(overload.operator, "+");
    assert_eq!(overload.params, vec!["a", "b"]);
    assert_eq!(show(&overload.body), "(+ (. a x) (. b x))");
}

#[test]
fn test_operator_overload_needs_operator() {
    assert!(matches!(
        parse_error("(foo) a :: a\n"),
        ErrorImpl::UnexpectedTokenDetailed { ref token, .. } if token == "foo"
    ));
}

#[test]
fn test_items_keep_source_order() {
    let source = "data V :: { float x, }\n@include (a) -> b\nf = 1\n@out O :: {\n    c :: float\n}\n";
    let program = program(source);

    let kinds: Vec<NodeKind> = program
        .items
        .iter()
        .map(|item| item.get_node_kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::TypeDef,
            NodeKind::Include,
            NodeKind::FunctionDef,
            NodeKind::Output
        ]
    );
}

#[test]
fn test_error_position_points_at_token() {
    let error = parse_source("f x 1", Some("pos.hgl".to_string())).unwrap_err();

    assert_eq!(error.get_position().0, 4);
    assert_eq!(error.get_position().1.as_str(), "pos.hgl");
}

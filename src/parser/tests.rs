//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - `let` and `return` statements
//! - Expression statements
//! - Operator precedence and associativity
//! - Number literal typing
//! - Error accumulation and recovery

use super::{
    lookups::BindingPower,
    parser::{parse, Parser, MAX_NESTING_DEPTH},
};
use crate::{
    ast::{
        ast::{Expr, ExprType, Program, Stmt, StmtType},
        expressions::NumberValue,
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
    Position,
};

fn parse_ok(source: &str) -> Program {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, errors);
    program
}

fn single_expr(source: &str) -> Expr {
    let program = parse_ok(source);
    assert_eq!(program.statements.len(), 1, "input {:?}", source);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn error_messages(source: &str) -> Vec<String> {
    parse(source).1.iter().map(|error| error.to_string()).collect()
}

#[test]
fn test_parse_assign_statements() {
    let program = parse_ok("let x = 5;\nlet foo = 10;");

    assert_eq!(program.statements.len(), 2);
    for (stmt, (name, value)) in program.iter().zip([("x", 5), ("foo", 10)]) {
        assert_eq!(stmt.get_stmt_type(), StmtType::AssignStmt);
        assert_eq!(stmt.token_value(), "let");

        let Stmt::Assign(assign) = stmt else { unreachable!() };
        assert_eq!(assign.name.name, name);
        assert_eq!(assign.name.token.value, name);
        match &assign.value {
            Expr::Number(literal) => assert_eq!(literal.value, NumberValue::Integer(value)),
            other => panic!("expected number literal, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_assign_with_expression_value() {
    let program = parse_ok("let total = a + b * 2;");

    assert_eq!(program.to_string(), "let total = (a + (b * 2));");
}

#[test]
fn test_parse_return_statements() {
    let program = parse_ok("return 5;\nreturn 10;");

    assert_eq!(program.statements.len(), 2);
    for stmt in program.iter() {
        assert_eq!(stmt.get_stmt_type(), StmtType::ReturnStmt);
        assert_eq!(stmt.token_value(), "return");
    }
    assert_eq!(program.to_string(), "return 5;return 10;");
}

#[test]
fn test_parse_statements_without_semicolons() {
    let program = parse_ok("let x = 1\nreturn x\nx + 1");

    assert_eq!(program.statements.len(), 3);
    assert_eq!(program.statements[0].get_stmt_type(), StmtType::AssignStmt);
    assert_eq!(program.statements[1].get_stmt_type(), StmtType::ReturnStmt);
    assert_eq!(program.statements[2].get_stmt_type(), StmtType::ExpressionStmt);
}

#[test]
fn test_parse_identifier_expression() {
    let program = parse_ok("foobar;");
    let stmt = &program.statements[0];

    assert_eq!(stmt.token_value(), "foobar");
    match stmt {
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Identifier(ident) => {
                assert_eq!(ident.name, "foobar");
                assert_eq!(ident.token.kind, TokenKind::Ident);
            }
            other => panic!("expected identifier, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_number_literals() {
    let cases = [
        ("5;", NumberValue::Integer(5)),
        ("5.5;", NumberValue::Float(5.5)),
        ("0.125", NumberValue::Float(0.125)),
    ];

    for (source, expected) in cases {
        match single_expr(source) {
            Expr::Number(literal) => {
                assert_eq!(literal.value, expected, "input {:?}", source);
                assert_eq!(literal.to_string(), source.trim_end_matches(';'));
            }
            other => panic!("expected number literal, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_integer_overflow_is_an_error() {
    let (program, errors) = parse("99999999999999999999;");

    assert!(program.statements.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "could not parse \"99999999999999999999\" as number");
}

#[test]
fn test_parse_prefix_expressions() {
    let cases = [("-5", "(-5)"), ("!x", "(!x)"), ("!-a", "(!(-a))"), ("--5", "(-(-5))")];

    for (source, expected) in cases {
        let expr = single_expr(source);
        assert_eq!(expr.get_expr_type(), ExprType::Prefix);
        assert_eq!(expr.to_string(), expected);
    }
}

#[test]
fn test_parse_infix_expressions() {
    let cases = [
        ("5 + 5", "+"),
        ("5 - 5", "-"),
        ("5 * 5", "*"),
        ("5 / 5", "/"),
        ("5 % 5", "%"),
        ("5 == 5", "=="),
        ("5 != 5", "!="),
        ("5 < 5", "<"),
        ("5 > 5", ">"),
        ("5 <= 5", "<="),
        ("5 >= 5", ">="),
        ("a && b", "&&"),
        ("a || b", "||"),
    ];

    for (source, operator) in cases {
        match single_expr(source) {
            Expr::Infix(infix) => {
                assert_eq!(infix.operator, operator);
                assert_eq!(infix.token.value, operator);
            }
            other => panic!("expected infix expression for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("1 + 2 * 3", "(1 + (2 * 3))"),
        ("1 - 2 - 3", "((1 - 2) - 3)"),
        ("-5 * 2", "((-5) * 2)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b % c", "(a + (b % c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
        ("a == b && c != d || e", "(((a == b) && (c != d)) || e)"),
        ("!a == b", "((!a) == b)"),
    ];

    for (source, expected) in cases {
        assert_eq!(single_expr(source).to_string(), expected, "input {:?}", source);
    }
}

#[test]
fn test_grouped_expressions() {
    let cases = [
        ("(1 + 2) * 3", "((1 + 2) * 3)"),
        ("a - (b - c)", "(a - (b - c))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("((a))", "a"),
    ];

    for (source, expected) in cases {
        assert_eq!(single_expr(source).to_string(), expected, "input {:?}", source);
    }
}

#[test]
fn test_unclosed_group_is_an_error() {
    assert_eq!(
        error_messages("(1 + 2"),
        vec!["expected next token to be CloseParen, got EOF instead"]
    );
}

#[test]
fn test_infix_stops_at_semicolon() {
    let program = parse_ok("a + b; c * d;");

    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0].to_string(), "(a + b)");
    assert_eq!(program.statements[1].to_string(), "(c * d)");
}

#[test]
fn test_infix_stops_at_token_without_led() {
    let program = parse_ok("a b");

    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.to_string(), "ab");
}

#[test]
fn test_missing_identifier_records_one_error() {
    let (program, errors) = parse("let 5 = 10;");

    assert!(program.statements.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "expected next token to be Ident, got Number instead");
    assert_eq!(*errors[0].get_position(), Position::new(0, 4));
}

#[test]
fn test_missing_assignment_records_error() {
    assert_eq!(
        error_messages("let x 5;"),
        vec!["expected next token to be Assignment, got Number instead"]
    );
}

#[test]
fn test_no_prefix_parse_fn() {
    assert_eq!(error_messages("=;"), vec!["no prefix parse function for Assignment found"]);
    assert_eq!(error_messages("let x = ;"), vec!["no prefix parse function for Semicolon found"]);
    assert_eq!(error_messages("&"), vec!["no prefix parse function for Illegal found"]);
}

#[test]
fn test_errors_accumulate_across_statements() {
    let (program, errors) = parse("let = 1;\nlet y = 2;\nreturn ;\nlet z 3;\nz;");

    let messages: Vec<String> = errors.iter().map(|error| error.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "expected next token to be Ident, got Assignment instead",
            "no prefix parse function for Semicolon found",
            "expected next token to be Assignment, got Number instead",
        ]
    );
    assert_eq!(errors[1].get_position().line, 2);
    assert_eq!(program.to_string(), "let y = 2;z");
}

#[test]
fn test_recovery_without_semicolons() {
    let (program, errors) = parse("let 5 = 1\nlet y = 2\nlet = 3\nlet z 4");

    let messages: Vec<String> = errors.iter().map(|error| error.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "expected next token to be Ident, got Number instead",
            "expected next token to be Ident, got Assignment instead",
            "expected next token to be Assignment, got Number instead",
        ]
    );
    assert_eq!(
        errors.iter().map(|error| error.get_position().line).collect::<Vec<_>>(),
        vec![0, 2, 3]
    );
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.to_string(), "let y = 2;");
}

#[test]
fn test_recovery_stops_at_statement_keyword() {
    let (program, errors) = parse("let x = ) return x let y = 2");

    assert_eq!(
        errors.iter().map(|error| error.to_string()).collect::<Vec<_>>(),
        vec!["no prefix parse function for CloseParen found"]
    );
    assert_eq!(program.to_string(), "return x;let y = 2;");
}

#[test]
fn test_recovery_resumes_with_expression_statement_on_next_line() {
    let (program, errors) = parse("let = 1 2 3\nfoo + bar\n) 4");

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].to_string(), "expected next token to be Ident, got Assignment instead");
    assert_eq!(errors[1].to_string(), "no prefix parse function for CloseParen found");
    assert_eq!(errors[1].get_position().line, 2);
    assert_eq!(program.to_string(), "(foo + bar)");
}

#[test]
fn test_recovery_keeps_statement_that_ended_the_failed_one() {
    let (program, errors) = parse("return 1 +\nlet x = 2\nx");

    assert_eq!(
        errors.iter().map(|error| error.to_string()).collect::<Vec<_>>(),
        vec!["no prefix parse function for Let found"]
    );
    assert_eq!(*errors[0].get_position(), Position::new(1, 0));
    assert_eq!(program.to_string(), "let x = 2;x");
}

#[test]
fn test_deeply_nested_groups_are_an_error() {
    let depth = 1000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let (program, errors) = parse(&source);

    assert!(program.statements.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::NestingTooDeep { limit: MAX_NESTING_DEPTH }
    );
    assert_eq!(*errors[0].get_position(), Position::new(0, MAX_NESTING_DEPTH as u32));
}

#[test]
fn test_long_prefix_chain_is_an_error() {
    let source = format!("{}1\nlet ok = 2", "-".repeat(200_000));
    let (program, errors) = parse(&source);

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::NestingTooDeep { limit: MAX_NESTING_DEPTH }
    );
    assert_eq!(program.to_string(), "let ok = 2;");
}

#[test]
fn test_nesting_within_limit_parses() {
    let depth = 50;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(single_expr(&source).to_string(), "x");
    assert_eq!(single_expr(&format!("{}5", "-".repeat(depth))).get_expr_type(), ExprType::Prefix);
}

#[test]
fn test_nesting_depth_resets_between_statements() {
    let nested = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    let source = format!("{};\n{};\n{}", nested, nested, nested);

    assert_eq!(parse_ok(&source).statements.len(), 3);
}

#[test]
fn test_parser_reports_errors_through_accessor() {
    let mut parser = Parser::new(Lexer::new("let 1;"));
    let program = parser.parse_program();

    assert!(program.statements.is_empty());
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
}

#[test]
fn test_parser_lookahead() {
    let mut parser = Parser::new(Lexer::new("let x"));

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Ident);

    let previous = parser.advance();
    assert_eq!(previous.kind, TokenKind::Let);
    assert_eq!(parser.current_token().value, "x");
    assert_eq!(parser.peek_token_kind(), TokenKind::EOF);

    parser.advance();
    parser.advance();
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
    assert_eq!(parser.peek_token_kind(), TokenKind::EOF);
}

#[test]
fn test_binding_power_order() {
    assert!(BindingPower::Default < BindingPower::Logical);
    assert!(BindingPower::Logical < BindingPower::Equality);
    assert!(BindingPower::Equality < BindingPower::Relational);
    assert!(BindingPower::Relational < BindingPower::Additive);
    assert!(BindingPower::Additive < BindingPower::Multiplicative);
    assert!(BindingPower::Multiplicative < BindingPower::Unary);
    assert!(BindingPower::Unary < BindingPower::Call);
}

#[test]
fn test_precedence_lookup() {
    let parser = Parser::new(Lexer::new("a * b"));

    assert_eq!(parser.current_precedence(), BindingPower::Default);
    assert_eq!(parser.peek_precedence(), BindingPower::Multiplicative);
}

#[test]
fn test_expression_spans() {
    let expr = single_expr("  a + -b");
    let span = expr.get_span();

    assert_eq!(span.start, Position::new(0, 2));
    assert_eq!(span.end, Position::new(0, 8));
}

#[test]
fn test_empty_program() {
    let program = parse_ok("");

    assert!(program.statements.is_empty());
    assert_eq!(program.to_string(), "");
}

use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{AssignStmt, ExpressionStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt<I: Iterator<Item = char>>(parser: &mut Parser<I>) -> Result<Stmt, Error> {
    let stmt_fn = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied();
    if let Some(stmt_fn) = stmt_fn {
        return stmt_fn(parser);
    }

    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;
    skip_optional_semicolon(parser);

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: token.span.start,
            end: parser.current_token().span.end,
        },
        token,
        expression,
    }))
}

/// `let <ident> = <expr>` with an optional trailing `;`.
pub fn parse_assign_stmt<I: Iterator<Item = char>>(parser: &mut Parser<I>) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Ident)?;
    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    skip_optional_semicolon(parser);

    Ok(Stmt::Assign(AssignStmt {
        span: Span {
            start: token.span.start,
            end: parser.current_token().span.end,
        },
        token,
        name: Identifier {
            name: name_token.value.clone(),
            token: name_token,
        },
        value,
    }))
}

/// `return <expr>` with an optional trailing `;`.
pub fn parse_return_stmt<I: Iterator<Item = char>>(parser: &mut Parser<I>) -> Result<Stmt, Error> {
    let token = parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    skip_optional_semicolon(parser);

    Ok(Stmt::Return(ReturnStmt {
        span: Span {
            start: token.span.start,
            end: parser.current_token().span.end,
        },
        token,
        value,
    }))
}

fn skip_optional_semicolon<I: Iterator<Item = char>>(parser: &mut Parser<I>) {
    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }
}

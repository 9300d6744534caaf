use crate::{
    ast::{
        ast::Expr,
        expressions::{Identifier, InfixExpr, NumberLiteral, NumberValue, PrefixExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

// Handlers start with the parser on the first token of their construct and
// leave it on the last one.

pub fn parse_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    bp: BindingPower,
) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let expr = parse_nested_expr(parser, bp);
    parser.exit_nesting();

    expr
}

fn parse_nested_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    bp: BindingPower,
) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = parser
        .get_nud_lookup()
        .get(&token_kind)
        .copied()
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::NoPrefixParseFn { kind: token_kind },
                parser.current_token().span.start,
            )
        })?;

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, fold it into lhs
    while !parser.peek_is(TokenKind::Semicolon) && bp < parser.peek_precedence() {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Ok(left);
        };

        parser.advance();
        let operator_bp = parser.current_precedence();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr<I: Iterator<Item = char>>(parser: &mut Parser<I>) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Ident => Ok(Expr::Identifier(Identifier {
            name: token.value.clone(),
            token,
        })),
        TokenKind::Number => {
            let value = if token.value.contains('.') {
                token.value.parse().ok().map(NumberValue::Float)
            } else {
                token.value.parse().ok().map(NumberValue::Integer)
            };

            match value {
                Some(value) => Ok(Expr::Number(NumberLiteral { token, value })),
                None => Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                )),
            }
        }
        kind => Err(Error::new(ErrorImpl::NoPrefixParseFn { kind }, token.span.start)),
    }
}

pub fn parse_prefix_expr<I: Iterator<Item = char>>(parser: &mut Parser<I>) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        operand: Box::new(operand),
    }))
}

pub fn parse_binary_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr<I: Iterator<Item = char>>(parser: &mut Parser<I>) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

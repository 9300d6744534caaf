use std::collections::HashMap;

use crate::{ast::ast::{Expr, Stmt}, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Logical,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    // Reserved for call expressions; no rule binds at this level yet.
    Call,
}

pub type StmtHandler<I> = fn(&mut Parser<I>) -> Result<Stmt, Error>;
pub type NUDHandler<I> = fn(&mut Parser<I>) -> Result<Expr, Error>;
pub type LEDHandler<I> = fn(&mut Parser<I>, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups<I: Iterator<Item = char>>(parser: &mut Parser<I>) {
    // Logical
    parser.led(TokenKind::And, BindingPower::Logical, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::Logical, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Ident, parse_primary_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_assign_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup<I> = HashMap<TokenKind, StmtHandler<I>>;
pub type NUDLookup<I> = HashMap<TokenKind, NUDHandler<I>>;
pub type LEDLookup<I> = HashMap<TokenKind, LEDHandler<I>>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

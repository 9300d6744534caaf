use std::fmt::Display;

use crate::lexer::tokens::Token;

use super::ast::Expr;

// LITERALS

/// Identifier Expression
/// A bare name, e.g. `foo`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Value of a numeric literal, decided once when the literal is parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Integer(i64),
    Float(f64),
}

/// Number Expression
/// A numeric literal. Integer unless its text contains a radix point.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub token: Token,
    pub value: NumberValue,
}

impl Display for NumberLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

// OPERATORS

/// Prefix Expression
/// A unary operator applied to one operand, e.g. `-x` or `!ok`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub operand: Box<Expr>,
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.operand)
    }
}

/// Infix Expression
/// A binary operator between two operands, e.g. `a + b`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub operator: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

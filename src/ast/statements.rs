use std::fmt::Display;

use crate::{lexer::tokens::Token, Span};

use super::{ast::Expr, expressions::Identifier};

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub token: Token,
    pub name: Identifier,
    pub value: Expr,
    pub span: Span,
}

impl Display for AssignStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = {};", self.token.value, self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Expr,
    pub span: Span,
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {};", self.token.value, self.value)
    }
}

/// An expression in statement position, with an optional trailing `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    /// First token of the expression.
    pub token: Token,
    pub expression: Expr,
    pub span: Span,
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

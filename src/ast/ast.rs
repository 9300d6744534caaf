use std::fmt::Display;

use crate::Span;

use super::{
    expressions::{Identifier, InfixExpr, NumberLiteral, PrefixExpr},
    statements::{AssignStmt, ExpressionStmt, ReturnStmt},
};

/// Statement Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    AssignStmt,
    ReturnStmt,
    ExpressionStmt,
}

/// A statement node. The program root is a sequence of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(AssignStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Assign(_) => StmtType::AssignStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
            Stmt::Expression(_) => StmtType::ExpressionStmt,
        }
    }

    /// Text of the token that introduced this statement.
    pub fn token_value(&self) -> &str {
        match self {
            Stmt::Assign(stmt) => &stmt.token.value,
            Stmt::Return(stmt) => &stmt.token.value,
            Stmt::Expression(stmt) => &stmt.token.value,
        }
    }

    pub fn get_span(&self) -> Span {
        match self {
            Stmt::Assign(stmt) => stmt.span,
            Stmt::Return(stmt) => stmt.span,
            Stmt::Expression(stmt) => stmt.span,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Assign(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Identifier,
    Number,
    Prefix,
    Infix,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Number(NumberLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Identifier(_) => ExprType::Identifier,
            Expr::Number(_) => ExprType::Number,
            Expr::Prefix(_) => ExprType::Prefix,
            Expr::Infix(_) => ExprType::Infix,
        }
    }

    /// Text of the token that introduced this expression: the name, the
    /// literal, or the operator.
    pub fn token_value(&self) -> &str {
        match self {
            Expr::Identifier(expr) => &expr.token.value,
            Expr::Number(expr) => &expr.token.value,
            Expr::Prefix(expr) => &expr.token.value,
            Expr::Infix(expr) => &expr.token.value,
        }
    }

    /// Source extent of the whole expression, including its operands.
    pub fn get_span(&self) -> Span {
        match self {
            Expr::Identifier(expr) => expr.token.span,
            Expr::Number(expr) => expr.token.span,
            Expr::Prefix(expr) => Span {
                start: expr.token.span.start,
                end: expr.operand.get_span().end,
            },
            Expr::Infix(expr) => Span {
                start: expr.left.get_span().start,
                end: expr.right.get_span().end,
            },
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier(expr) => write!(f, "{}", expr),
            Expr::Number(expr) => write!(f, "{}", expr),
            Expr::Prefix(expr) => write!(f, "{}", expr),
            Expr::Infix(expr) => write!(f, "{}", expr),
        }
    }
}

/// The parse root: every statement in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

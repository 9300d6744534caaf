//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and its entry points.
//! The parser pulls tokens from its lexer on demand and keeps two of them in
//! view: the current token and one token of lookahead (`peek`).
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// How many expressions may be open at once before parsing gives up on
/// the statement with `NestingTooDeep`.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The main parser structure that maintains parsing state.
///
/// Parse errors do not abort parsing: each one is recorded and the parser
/// resumes at the next statement, so a single pass reports every problem it
/// can find.
pub struct Parser<I: Iterator<Item = char>> {
    /// The token source, driven strictly forward
    lexer: Lexer<I>,
    /// The token being parsed
    current_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Errors recorded so far, in source order
    errors: Vec<Error>,
    /// Number of `parse_expr` calls currently on the stack
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup<I>,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup<I>,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup<I>,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Creates a parser over `lexer` with all lookup tables registered.
    pub fn new(mut lexer: Lexer<I>) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current_token,
            peek_token,
            errors: vec![],
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let peek = std::mem::replace(&mut self.peek_token, next);
        std::mem::replace(&mut self.current_token, peek)
    }

    /// Advances only if the lookahead token is of `expected_kind`.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedPeek` error positioned at the
    /// lookahead token. The parser does not move on failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek_is(expected_kind) {
            self.advance();
            Ok(self.current_token.clone())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedPeek {
                    expected: expected_kind,
                    received: self.peek_token.kind,
                },
                self.peek_token.span.start,
            ))
        }
    }

    /// Opens one level of expression nesting, failing once the limit is hit.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current_token.span.start,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Binding power of the current token, `Default` if it is not an infix operator.
    pub fn current_precedence(&self) -> BindingPower {
        self.precedence_of(self.current_token.kind)
    }

    /// Binding power of the lookahead token, `Default` if it is not an infix operator.
    pub fn peek_precedence(&self) -> BindingPower {
        self.precedence_of(self.peek_token.kind)
    }

    fn precedence_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup<I> {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup<I> {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup<I> {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler<I>) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler<I>) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler<I>) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Parses statements until end of input.
    ///
    /// A statement that fails to parse is left out of the program; its error
    /// is recorded and parsing resumes at the next statement boundary. Check
    /// [`Parser::errors`] even when the returned program looks complete.
    #[instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::EOF) {
            let start = self.current_token.span.start;
            match parse_stmt(self) {
                Ok(stmt) => program.statements.push(stmt),
                Err(error) => {
                    debug!(%error, position = %error.get_position(), "recorded parse error");
                    self.errors.push(error);
                    if self.synchronize(start) {
                        continue;
                    }
                }
            }

            // Always consume at least one token per statement.
            self.advance();
        }

        debug!(
            statements = program.statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        program
    }

    /// Skips the rest of a failed statement that began at `start`.
    ///
    /// Returns `true` when the parser already sits on a later `let`/`return`,
    /// which then starts the next statement. Otherwise it stops on a `;`, on
    /// EOF, or on the last token before a `let`/`return` keyword or a line
    /// break, and the caller's `advance` lands on the next statement.
    fn synchronize(&mut self, start: Position) -> bool {
        let statement_keyword = [TokenKind::Let, TokenKind::Return];

        loop {
            if self.current_token.is_one_of_many(&statement_keyword)
                && self.current_token.span.start > start
            {
                return true;
            }

            if self.current_token.is_one_of_many(&[TokenKind::Semicolon, TokenKind::EOF])
                || self.peek_token.is_one_of_many(&statement_keyword)
                || self.peek_token.line() > self.current_token.line()
            {
                return false;
            }

            self.advance();
        }
    }
}

/// Parses `source` into a program plus every error recorded along the way.
pub fn parse(source: &str) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    (program, parser.into_errors())
}

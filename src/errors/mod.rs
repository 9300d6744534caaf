//! Error types and error handling for the front end.
//!
//! This module defines the errors the parser records while building the
//! AST, and the fatal errors raised when a source cannot be read at all.
//! Lexical problems are not errors here: the lexer reports them in-band as
//! `Illegal` tokens.

pub mod errors;

//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Single- and two-character punctuation and operators
//! - Recognition of keywords, identifiers, numbers and string literals
//! - Line/column tracking for every token
//! - In-band reporting of malformed input as `Illegal` tokens

pub mod lexer;
pub mod tokens;

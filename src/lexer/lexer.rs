use std::{io::Read, iter::Peekable, str::Chars};

use tracing::{debug, trace};

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{lookup_ident, Token, TokenKind};

/// Pull-based lexer over any iterator of characters.
///
/// Characters are taken from the iterator only as tokens are requested, so
/// `from_chars` lexes a lazily produced source without buffering it.
/// The lexer holds the character under the cursor (`None` once the input is
/// exhausted) and can look exactly one character further ahead. Every call to
/// [`Lexer::next_token`] returns a token; malformed input is reported as
/// [`TokenKind::Illegal`] rather than as an error.
pub struct Lexer<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    ch: Option<char>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<Chars<'a>> {
    pub fn new(source: &'a str) -> Self {
        Lexer::from_chars(source.chars())
    }
}

impl Lexer<std::vec::IntoIter<char>> {
    /// Reads the whole of `reader` into memory, then lexes it.
    ///
    /// The source is decoded up front so that a read failure or invalid UTF-8
    /// is reported before any token is produced. Both are fatal.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|err| {
            Error::new(ErrorImpl::Io { message: err.to_string() }, Position::default())
        })?;

        let source = String::from_utf8(bytes).map_err(|err| {
            let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
            let prefix = std::str::from_utf8(valid).unwrap_or_default();
            Error::new(ErrorImpl::InvalidUtf8, position_after(prefix))
        })?;

        Ok(Lexer::from_chars(source.chars().collect::<Vec<_>>().into_iter()))
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn from_chars(chars: I) -> Self {
        let mut chars = chars.peekable();
        let ch = chars.next();

        Lexer {
            chars,
            ch,
            line: 0,
            column: 0,
        }
    }

    /// Position of the character under the cursor.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Moves the cursor one character forward. A no-op at end of input.
    pub fn read_char(&mut self) {
        match self.ch {
            Some('\n') => {
                self.line += 1;
                self.column = 0;
            }
            Some(_) => self.column += 1,
            None => return,
        }

        self.ch = self.chars.next();
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            None => Token::eof(self.position()),
            Some(ch) => match ch {
                '+' => MK_DEFAULT_HANDLER!(self, TokenKind::Plus, "+"),
                '-' => MK_DEFAULT_HANDLER!(self, TokenKind::Dash, "-"),
                '*' => MK_DEFAULT_HANDLER!(self, TokenKind::Star, "*"),
                '/' => MK_DEFAULT_HANDLER!(self, TokenKind::Slash, "/"),
                '%' => MK_DEFAULT_HANDLER!(self, TokenKind::Percent, "%"),
                ',' => MK_DEFAULT_HANDLER!(self, TokenKind::Comma, ","),
                '.' => MK_DEFAULT_HANDLER!(self, TokenKind::Dot, "."),
                ';' => MK_DEFAULT_HANDLER!(self, TokenKind::Semicolon, ";"),
                ':' => MK_DEFAULT_HANDLER!(self, TokenKind::Colon, ":"),
                '(' => MK_DEFAULT_HANDLER!(self, TokenKind::OpenParen, "("),
                ')' => MK_DEFAULT_HANDLER!(self, TokenKind::CloseParen, ")"),
                '{' => MK_DEFAULT_HANDLER!(self, TokenKind::OpenCurly, "{"),
                '}' => MK_DEFAULT_HANDLER!(self, TokenKind::CloseCurly, "}"),
                '[' => MK_DEFAULT_HANDLER!(self, TokenKind::OpenBracket, "["),
                ']' => MK_DEFAULT_HANDLER!(self, TokenKind::CloseBracket, "]"),
                '=' => match self.peek_char() {
                    Some('=') => MK_DEFAULT_HANDLER!(self, TokenKind::Equals, "=="),
                    _ => MK_DEFAULT_HANDLER!(self, TokenKind::Assignment, "="),
                },
                '!' => match self.peek_char() {
                    Some('=') => MK_DEFAULT_HANDLER!(self, TokenKind::NotEquals, "!="),
                    _ => MK_DEFAULT_HANDLER!(self, TokenKind::Not, "!"),
                },
                '<' => match self.peek_char() {
                    Some('=') => MK_DEFAULT_HANDLER!(self, TokenKind::LessEquals, "<="),
                    _ => MK_DEFAULT_HANDLER!(self, TokenKind::Less, "<"),
                },
                '>' => match self.peek_char() {
                    Some('=') => MK_DEFAULT_HANDLER!(self, TokenKind::GreaterEquals, ">="),
                    _ => MK_DEFAULT_HANDLER!(self, TokenKind::Greater, ">"),
                },
                // No single-character `&` or `|` in this grammar.
                '&' => match self.peek_char() {
                    Some('&') => MK_DEFAULT_HANDLER!(self, TokenKind::And, "&&"),
                    _ => self.read_illegal_char(ch),
                },
                '|' => match self.peek_char() {
                    Some('|') => MK_DEFAULT_HANDLER!(self, TokenKind::Or, "||"),
                    _ => self.read_illegal_char(ch),
                },
                '"' | '\'' => self.read_string(ch),
                c if c.is_ascii_digit() => self.read_number(),
                c if is_letter(c) => self.read_identifier(),
                _ => self.read_illegal_char(ch),
            },
        };

        trace!(
            kind = %token.kind,
            value = %token.value,
            line = token.line(),
            column = token.column(),
            "lexed token"
        );

        token
    }

    /// Drains the lexer, returning every token up to and including `EOF`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = vec![];

        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::EOF;
            tokens.push(token);

            if done {
                return tokens;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\r' | '\n')) {
            self.read_char();
        }
    }

    fn read_illegal_char(&mut self, ch: char) -> Token {
        let start = self.position();
        self.read_char();

        debug!(character = %ch, line = start.line, column = start.column, "unrecognised character");
        MK_TOKEN!(TokenKind::Illegal, ch.to_string(), Span { start, end: self.position() })
    }

    fn read_string(&mut self, quote: char) -> Token {
        let start = self.position();
        self.read_char();

        let mut body = String::new();
        while let Some(ch) = self.ch.filter(|c| *c != quote) {
            body.push(ch);
            self.read_char();
        }

        if self.ch.is_none() {
            debug!(line = start.line, column = start.column, "unterminated string literal");

            let mut value = String::with_capacity(body.len() + 1);
            value.push(quote);
            value.push_str(&body);
            return MK_TOKEN!(TokenKind::Illegal, value, Span { start, end: self.position() });
        }

        self.read_char();
        MK_TOKEN!(TokenKind::String, body, Span { start, end: self.position() })
    }

    fn read_number(&mut self) -> Token {
        let start = self.position();
        let mut literal = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.ch {
            if ch.is_ascii_digit() {
                literal.push(ch);
                self.read_char();
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                literal.push(ch);
                self.read_char();

                if !self.ch.is_some_and(|c| c.is_ascii_digit()) {
                    debug!(literal = %literal, line = start.line, column = start.column, "number ends with a dot");
                    return MK_TOKEN!(TokenKind::Illegal, literal, Span { start, end: self.position() });
                }
            } else {
                break;
            }
        }

        MK_TOKEN!(TokenKind::Number, literal, Span { start, end: self.position() })
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.position();
        let mut word = String::new();

        while let Some(ch) = self.ch.filter(|c| is_letter(*c)) {
            word.push(ch);
            self.read_char();
        }

        MK_TOKEN!(lookup_ident(&word), word, Span { start, end: self.position() })
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn position_after(text: &str) -> Position {
    let mut lexer = Lexer::new(text);
    while lexer.ch.is_some() {
        lexer.read_char();
    }
    lexer.position()
}

/// Lexes a whole string. The result always ends with exactly one `EOF` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

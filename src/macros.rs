//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Lexes a fixed-spelling token at the lexer's cursor
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Consumes one character per character of `$value` and returns a token of
/// `$kind` spanning them.
///
/// The caller must already have checked that the upcoming characters spell
/// `$value`.
///
/// # Example
///
/// ```ignore
/// '+' => MK_DEFAULT_HANDLER!(self, TokenKind::Plus, "+"),
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($lexer:expr, $kind:expr, $value:literal) => {{
        let start = $lexer.position();
        for _ in 0..$value.chars().count() {
            $lexer.read_char();
        }
        MK_TOKEN!(
            $kind,
            String::from($value),
            Span {
                start,
                end: $lexer.position()
            }
        )
    }};
}

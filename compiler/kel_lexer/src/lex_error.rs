//! Lexical errors.

use std::fmt;

use kel_ir::{Position, Span};

/// What went wrong while scanning.
///
/// `Default` is what logos reports for input that matches no rule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A byte that starts no token (control characters, `\0`, DEL).
    #[default]
    InvalidCharacter,
    /// End of line or end of input inside a string literal.
    UnterminatedString,
    /// `/*` without a closing `*/`.
    UnterminatedBlockComment,
    /// Unknown escape after `\`, or `\x` without hex digits.
    InvalidEscape,
    /// Numeric literal that does not fit its width or has a bad suffix.
    InvalidNumber,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::InvalidCharacter => write!(f, "invalid character"),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnterminatedBlockComment => write!(f, "unterminated block comment"),
            LexErrorKind::InvalidEscape => write!(f, "invalid escape sequence"),
            LexErrorKind::InvalidNumber => write!(f, "invalid number literal"),
        }
    }
}

/// A lexical error with its location.
///
/// `position` is the 0-based line/column of `span.start`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[must_use = "lexical errors must be reported or propagated"]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub position: Position,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span, position: Position) -> Self {
        LexError {
            kind,
            span,
            position,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lexical error at {}:{}: {}",
            self.position.line, self.position.column, self.kind
        )
    }
}

impl std::error::Error for LexError {}

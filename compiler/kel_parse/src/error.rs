//! Syntax errors.

use std::fmt;

use kel_ir::{Position, Span};
use kel_object::EvalError;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// Input ended inside a form. `open` is the unclosed `(`, if any.
    UnexpectedEof { open: Option<Span> },
    /// A specific token was required.
    ExpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    /// A token that cannot start an expression, such as `)`.
    UnrecognizedToken { found: String },
    /// A signed literal whose magnitude exceeds its type's positive range.
    LiteralOutOfRange { literal: String, ty: &'static str },
    /// The runtime refused to allocate a node.
    Allocation(EvalError),
}

/// A syntax error at a token.
#[derive(Clone, Debug, PartialEq)]
#[must_use = "syntax errors must be reported or propagated"]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Span of the offending token.
    pub span: Span,
    /// 0-based position of `span.start`.
    pub position: Position,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, span: Span, position: Position) -> Self {
        let message = match &kind {
            ParseErrorKind::UnexpectedEof { .. } => "unexpected end of input".to_string(),
            ParseErrorKind::ExpectedToken { expected, found } => {
                format!("expected {expected}, found {found}")
            }
            ParseErrorKind::UnrecognizedToken { found } => {
                format!("unrecognized token `{found}` in expression position")
            }
            ParseErrorKind::LiteralOutOfRange { literal, ty } => {
                format!("literal `{literal}` is out of range for {ty}")
            }
            ParseErrorKind::Allocation(err) => err.message.clone(),
        };
        ParseError {
            kind,
            message,
            span,
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error at {}:{}: {}",
            self.position.line, self.position.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

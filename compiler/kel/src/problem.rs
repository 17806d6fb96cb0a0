//! One error type across lexing, parsing and evaluation.
//!
//! `Problem` keeps the phase error intact; [`Problem::to_diagnostic`] turns it
//! into a coded [`Diagnostic`] for rendering.

use kel_diagnostic::{Diagnostic, ErrorCode};
use kel_ir::LineIndex;
use kel_lexer::{LexError, LexErrorKind};
use kel_object::{EvalError, EvalErrorKind};
use kel_parse::{ParseError, ParseErrorKind};

/// Anything that stops a [`Session::run`](crate::Session::run).
#[derive(Debug, thiserror::Error)]
#[must_use = "problems must be reported or propagated"]
pub enum Problem {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Problem {
    pub fn code(&self) -> ErrorCode {
        match self {
            Problem::Lex(err) => lex_code(err.kind),
            Problem::Parse(err) => match &err.kind {
                ParseErrorKind::ExpectedToken { .. } => ErrorCode::E1001,
                ParseErrorKind::UnrecognizedToken { .. } => ErrorCode::E1002,
                ParseErrorKind::UnexpectedEof { .. } => ErrorCode::E1003,
                ParseErrorKind::LiteralOutOfRange { .. } => ErrorCode::E1004,
                ParseErrorKind::Allocation(inner) => eval_code(&inner.kind),
            },
            Problem::Eval(err) => eval_code(&err.kind),
        }
    }

    /// Build the diagnostic for this problem. `index` is the line table of
    /// the source that was run; it places backtrace frames.
    #[cold]
    pub fn to_diagnostic(&self, index: &LineIndex) -> Diagnostic {
        let diag = Diagnostic::error(self.code());
        match self {
            Problem::Lex(err) => diag
                .with_message(err.kind.to_string())
                .with_label(err.span, lex_label(err.kind)),
            Problem::Parse(err) => parse_diagnostic(diag, err),
            Problem::Eval(err) => eval_diagnostic(diag, err, index),
        }
    }
}

fn lex_code(kind: LexErrorKind) -> ErrorCode {
    match kind {
        LexErrorKind::UnterminatedString => ErrorCode::E0001,
        LexErrorKind::InvalidCharacter => ErrorCode::E0002,
        LexErrorKind::InvalidNumber => ErrorCode::E0003,
        LexErrorKind::InvalidEscape => ErrorCode::E0005,
        LexErrorKind::UnterminatedBlockComment => ErrorCode::E0006,
    }
}

fn lex_label(kind: LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::UnterminatedString => "string starts here",
        LexErrorKind::InvalidCharacter => "not valid here",
        LexErrorKind::InvalidNumber => "does not fit its type",
        LexErrorKind::InvalidEscape => "unknown escape",
        LexErrorKind::UnterminatedBlockComment => "comment starts here",
    }
}

fn eval_code(kind: &EvalErrorKind) -> ErrorCode {
    match kind {
        EvalErrorKind::UnboundSymbol { .. } => ErrorCode::E6001,
        EvalErrorKind::NotCallable { .. } => ErrorCode::E6002,
        EvalErrorKind::ArityMismatch { .. } => ErrorCode::E6003,
        EvalErrorKind::TypeMismatch { .. } => ErrorCode::E6004,
        EvalErrorKind::InvalidSpecialForm { .. } => ErrorCode::E6005,
        EvalErrorKind::RecursionLimit { .. } => ErrorCode::E6006,
        EvalErrorKind::OutOfMemory { .. } => ErrorCode::E6007,
        EvalErrorKind::Custom { .. } => ErrorCode::E6099,
    }
}

fn parse_diagnostic(diag: Diagnostic, err: &ParseError) -> Diagnostic {
    let diag = diag.with_message(err.message.clone());
    match &err.kind {
        ParseErrorKind::UnexpectedEof { open } => {
            let diag = diag.with_label(err.span, "input ends here");
            match open {
                Some(open) => diag.with_secondary_label(*open, "unclosed `(`"),
                None => diag,
            }
        }
        ParseErrorKind::ExpectedToken { expected, .. } => {
            diag.with_label(err.span, format!("expected {expected}"))
        }
        ParseErrorKind::UnrecognizedToken { .. } => {
            diag.with_label(err.span, "expected an expression")
        }
        ParseErrorKind::LiteralOutOfRange { ty, .. } => diag
            .with_label(err.span, format!("does not fit in {ty}"))
            .with_note("use a wider suffix such as `i64`"),
        ParseErrorKind::Allocation(_) => diag.with_label(err.span, "while building this"),
    }
}

fn eval_diagnostic(diag: Diagnostic, err: &EvalError, index: &LineIndex) -> Diagnostic {
    let mut diag = diag.with_message(err.message.clone());
    if let Some(span) = err.span {
        diag = diag.with_label(span, "while evaluating this");
    }
    if let EvalErrorKind::RecursionLimit { .. } = err.kind {
        diag = diag.with_note("raise KEL_MAX_DEPTH, or set it to `none`, to allow deeper programs");
    }
    if let Some(backtrace) = &err.backtrace {
        // The innermost frame is the labelled one.
        for frame in backtrace.frames().iter().skip(1) {
            diag = match frame.span {
                Some(span) => {
                    let at = index.position(span.start);
                    diag.with_note(format!(
                        "called from `{}` at {}:{}",
                        frame.name,
                        at.line + 1,
                        at.column + 1
                    ))
                }
                None => diag.with_note(format!("called from `{}`", frame.name)),
            };
        }
    }
    diag
}

#[cfg(test)]
mod tests;

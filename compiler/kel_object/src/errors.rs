//! Runtime error types.
//!
//! `EvalErrorKind` gives each failure a typed category so hosts can match
//! on it and diagnostics can assign E6xxx codes. Errors are built through
//! the `#[cold]` factory functions below, which fill in both `kind` and
//! `message`.

use std::fmt;

use kel_ir::Span;

use crate::Value;

/// Result of evaluating a form or running a native function.
pub type EvalResult = Result<Value, EvalError>;

/// Accepted argument counts of a callable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Between(lo, hi) => (lo..=hi).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (text, last) = match *self {
            Arity::Exactly(n) => (n.to_string(), n),
            Arity::AtLeast(n) => (format!("at least {n}"), n),
            Arity::Between(lo, hi) => (format!("{lo} to {hi}"), hi),
        };
        let word = if last == 1 { "argument" } else { "arguments" };
        write!(f, "{text} {word}")
    }
}

/// Typed runtime error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Call head names a symbol with no binding.
    UnboundSymbol { name: String },
    /// Call head is bound to (or is) something that cannot be called.
    NotCallable { type_name: String },
    ArityMismatch {
        name: String,
        expected: Arity,
        got: usize,
    },
    TypeMismatch { expected: String, got: String },
    /// A special form such as `if` used with the wrong shape.
    InvalidSpecialForm { form: String, reason: String },
    /// The explicit frame stack reached its configured depth.
    RecursionLimit { depth: usize },
    /// The memory provider refused an allocation.
    OutOfMemory {
        requested: usize,
        in_use: usize,
        limit: Option<usize>,
    },
    /// Raised by a native function with a free-form message.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundSymbol { name } => write!(f, "unbound symbol: {name}"),
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(f, "{name} expects {expected}, got {got}"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::InvalidSpecialForm { form, reason } => {
                write!(f, "invalid `{form}` form: {reason}")
            }
            Self::RecursionLimit { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
            Self::OutOfMemory {
                requested,
                in_use,
                limit,
            } => {
                write!(f, "out of memory: {requested} bytes requested with {in_use} in use")?;
                if let Some(limit) = limit {
                    write!(f, " (limit: {limit})")?;
                }
                Ok(())
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// One pending frame at the point an error was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Name of the call head, or `"<list>"` when it is not a symbol.
    pub name: String,
    pub span: Option<Span>,
}

/// Snapshot of the frame stack, innermost frame first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A runtime error.
#[derive(Clone, Debug, PartialEq)]
#[must_use = "runtime errors must be reported or propagated"]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Source of the form that failed, when it came from parsed text.
    pub span: Option<Span>,
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// A free-form error, for native functions.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            span: None,
            backtrace: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            backtrace: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless a more precise one is already set.
    pub fn or_span(mut self, span: Option<Span>) -> Self {
        if self.span.is_none() {
            self.span = span;
        }
        self
    }

    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

#[cold]
pub fn unbound_symbol(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundSymbol {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_special_form(form: &str, reason: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidSpecialForm {
        form: form.to_string(),
        reason: reason.to_string(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

#[cold]
pub fn out_of_memory(requested: usize, in_use: usize, limit: Option<usize>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OutOfMemory {
        requested,
        in_use,
        limit,
    })
}

#[cfg(test)]
mod tests;

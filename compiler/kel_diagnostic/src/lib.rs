//! Diagnostics for the kel runtime.
//!
//! Each phase error (lexical, syntax, runtime) converts into a
//! [`Diagnostic`] carrying a stable [`ErrorCode`], a message and labeled
//! spans. The [`TerminalEmitter`] renders diagnostics against the source
//! text for a host to show its users.

mod diagnostic;
mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;

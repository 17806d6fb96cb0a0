//! Evaluator for the kel runtime.
//!
//! Evaluation runs on an explicit frame stack owned by the [`Context`]
//! rather than on the native call stack, so interpreted programs can
//! recurse as deep as the frame limit allows. See [`context`] for the
//! state machine.
//!
//! # Re-exports
//!
//! Error types and constructors come from `kel_object` and are re-exported
//! through [`errors`] for convenience.

pub mod context;
pub mod errors;
mod frame;
pub mod prelude;
mod print_handler;

pub use context::{Context, EvalConfig, DEFAULT_MAX_DEPTH};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandler,
    SharedPrintHandler, StdoutPrintHandler,
};

//! Embedding facade for the kel runtime.
//!
//! A [`Session`] owns a runtime and its global bindings with the prelude
//! installed, and runs source text end to end:
//!
//! ```text
//! source ─▶ Lexer ─▶ Parser ─▶ program list ─▶ Context::eval_program ─▶ Value
//! ```
//!
//! Failures from any phase come back as one [`Problem`], which renders to a
//! source-annotated diagnostic through [`Session::render`].

mod config;
mod problem;
mod session;
mod tracing_setup;

pub use config::Config;
pub use problem::Problem;
pub use session::Session;
pub use tracing_setup::init_tracing;

pub use kel_diagnostic::{ColorMode, Diagnostic, ErrorCode};
pub use kel_eval::{
    buffer_handler, silent_handler, stdout_handler, EvalConfig, SharedPrintHandler,
};
pub use kel_object::{NativeCall, Value};

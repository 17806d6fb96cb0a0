//! Runtime errors, re-exported from `kel_object`.
//!
//! Native functions and the evaluator build errors with the factory
//! functions here so every error carries a typed [`EvalErrorKind`].

pub use kel_object::{
    arity_mismatch, invalid_special_form, not_callable, out_of_memory,
    recursion_limit_exceeded, type_mismatch, unbound_symbol, Arity, BacktraceFrame,
    EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};

//! Value and object model for the kel runtime.
//!
//! - [`Value`]: a copyable tagged scalar, or a reference to a heap object
//! - [`Object`]: the closed set of heap variants (string, symbol, list,
//!   native function), owned by a [`Runtime`]
//! - [`HostRef`] / [`HostRefSet`]: counted handles that keep objects
//!   reachable from host code
//! - [`Bindings`]: the symbol table consulted when a list is called
//! - [`NativeFn`] / [`NativeCall`]: the host callback interface
//!
//! # Reclamation
//!
//! A `Runtime` is an arena. Objects are never freed individually; every
//! object a runtime created is released when the runtime is dropped. Host
//! reference counts are tracked (atomically) so hosts and tooling can see
//! which objects are still held, but reaching zero frees nothing.
//!
//! # Threading
//!
//! A `Runtime` and everything borrowed from it is single-threaded: it is
//! `Send` but not shared. `HostRef` counts are atomic so handles may be
//! dropped on another thread. Mutating one runtime from several threads at
//! once is not supported.

mod bindings;
mod display;
mod errors;
mod host_ref;
mod memory;
mod native;
mod object;
mod runtime;
mod value;

pub use bindings::Bindings;
pub use display::ValueDisplay;
pub use errors::{
    arity_mismatch, invalid_special_form, not_callable, out_of_memory,
    recursion_limit_exceeded, type_mismatch, unbound_symbol, Arity, BacktraceFrame,
    EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use host_ref::{HostRef, HostRefSet};
pub use memory::{BudgetProvider, MemoryProvider, SystemProvider};
pub use native::{NativeCall, NativeFn, NativeFunction};
pub use object::{Object, ObjectKind, ObjectRef};
pub use runtime::{Runtime, RuntimeId};
pub use value::Value;

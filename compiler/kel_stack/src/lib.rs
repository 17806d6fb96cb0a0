//! Native stack growth for recursive walks over nested data.
//!
//! Evaluation never recurses on the native stack; it runs on an explicit
//! frame stack. Two walks remain recursive because their depth follows the
//! nesting of the *source text*, not the interpreted call depth:
//!
//! - descending into `( ... )` and `'` in the parser
//! - printing nested lists
//!
//! Both wrap each level in [`ensure_sufficient_stack`], so a pathological
//! input like ten thousand open parentheses grows the stack instead of
//! overflowing it.
//!
//! On `wasm32` the closure is called directly.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

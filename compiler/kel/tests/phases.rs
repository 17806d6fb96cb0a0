// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Phase-based end-to-end tests.
//!
//! - `parse/` - lexing and parsing through the public crates
//! - `eval/` - whole programs run through a `Session`
//! - `common/` - shared helpers
//!
//! ```bash
//! cargo test -p kel --test phases
//! cargo test -p kel --test phases eval
//! ```

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/parse/mod.rs"]
mod parse;

#[path = "phases/eval/mod.rs"]
mod eval;

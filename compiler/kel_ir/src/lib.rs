//! Source location types for the kel runtime.
//!
//! Every phase reports locations with the types defined here:
//!
//! - [`Span`]: a half-open byte range into the source text
//! - [`Position`]: a 0-based line/column pair
//! - [`Location`]: the begin and end [`Position`] of a token or form
//! - [`LineIndex`]: converts byte offsets into positions

mod line_index;
mod position;
mod span;

pub use line_index::LineIndex;
pub use position::{Location, Position};
pub use span::Span;

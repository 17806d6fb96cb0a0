//! Line/column positions.

use std::fmt;

/// A 0-based line and column pair.
///
/// `column` counts bytes since the last newline. Positions order by line,
/// then by column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Begin and end positions of a token or form; `end` is exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct Location {
    pub begin: Position,
    pub end: Position,
}

impl Location {
    #[inline]
    pub const fn new(begin: Position, end: Position) -> Self {
        Location { begin, end }
    }

    /// Check whether `position` lies in `begin..end`.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.begin <= position && position < self.end
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

//! Position types for source locations.
//!
//! All coordinates are 1-based: line 1 is the first line of the document and
//! column 1 is the first character of a line. This matches the line numbering
//! used by findings and edits throughout the engine.

use serde::{Deserialize, Serialize};

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, counted in characters).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A contiguous region of source text, from `start` (inclusive) to `end`
/// (exclusive in column terms on the final line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Start position.
    pub start: Position,
    /// End position.
    pub end: Position,
}

impl Location {
    /// Creates a new location.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a location spanning whole lines, from `first` through `last`.
    #[inline]
    pub const fn lines(first: u32, last: u32, last_width: u32) -> Self {
        Self {
            start: Position::new(first, 1),
            end: Position::new(last, last_width + 1),
        }
    }

    /// Returns true if the given line falls within this location.
    #[inline]
    pub const fn contains_line(&self, line: u32) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    /// Merges two locations into one that covers both.
    pub fn merge(&self, other: &Location) -> Location {
        Location {
            start: if self.start <= other.start {
                self.start
            } else {
                other.start
            },
            end: if self.end >= other.end {
                self.end
            } else {
                other.end
            },
        }
    }
}

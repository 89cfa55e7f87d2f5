//! Source location tracking for tokens and syntax tree nodes.

use serde::{Deserialize, Serialize};

/// A half-open range of character offsets into the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start character offset (inclusive).
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merges two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Returns the characters of `input` covered by this span.
    #[must_use]
    pub fn slice<'a>(&self, input: &'a [char]) -> &'a [char] {
        &input[self.start.min(input.len())..self.end.min(input.len())]
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

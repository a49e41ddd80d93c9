//! Character ranges inside text values, and their fragmentation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use gridtrace_foundation::Span;

/// Half-open interval `[start, end)` of characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CharRange {
    /// First character (inclusive).
    pub start: usize,
    /// End character (exclusive).
    pub end: usize,
}

/// Result of splitting a queried range against a marked range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragments {
    /// The part of the query that falls inside the marked range.
    pub inside: Option<CharRange>,
    /// The parts of the query outside the marked range, left to right.
    pub outside: Vec<CharRange>,
}

impl CharRange {
    /// Creates a range; `end` is clamped so the range is never inverted.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the range covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Returns the overlap of two ranges, if it is non-empty.
    #[must_use]
    pub fn intersect(&self, other: &CharRange) -> Option<CharRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(CharRange { start, end })
    }

    /// Returns true if `other` lies entirely inside this range.
    #[must_use]
    pub fn covers(&self, other: &CharRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Moves the range by `delta` characters to the right.
    #[must_use]
    pub fn shifted(&self, delta: usize) -> CharRange {
        CharRange {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Splits this (queried) range against a marked range.
    ///
    /// Used when one region of a text value was produced by a different
    /// location than the rest: the inside fragment is attributed to the
    /// marked region's origin, the outside fragments to the default origin.
    #[must_use]
    pub fn fragment(&self, marked: &CharRange) -> Fragments {
        let inside = self.intersect(marked);
        let mut outside = Vec::new();
        match inside {
            None => {
                if !self.is_empty() {
                    outside.push(*self);
                }
            }
            Some(overlap) => {
                if self.start < overlap.start {
                    outside.push(CharRange::new(self.start, overlap.start));
                }
                if overlap.end < self.end {
                    outside.push(CharRange::new(overlap.end, self.end));
                }
            }
        }
        Fragments { inside, outside }
    }
}

impl From<Span> for CharRange {
    fn from(span: Span) -> Self {
        Self::new(span.start, span.end)
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

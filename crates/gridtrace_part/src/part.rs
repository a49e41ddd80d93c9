//! Composable designator chains.
//!
//! A [`Part`] is read head-first: the head is the most specific segment and
//! each following segment names the structure that contains it. For example
//! `chars 0..3 of cell B2 of output 0` has head `chars 0..3` and tail
//! `cell B2 of output 0`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::range::CharRange;
use crate::segment::{Segment, SegmentKind};
use crate::subject::SubjectKind;

/// An ordered chain of segments addressing a precise sub-location.
///
/// The empty chain designates the whole subject.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Part {
    /// Outermost segment first; the head is the last element.
    segments: Vec<Segment>,
}

impl Part {
    /// The empty chain: the whole subject.
    #[must_use]
    pub fn nothing() -> Self {
        Self::default()
    }

    /// A chain of a single segment.
    #[must_use]
    pub fn of(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
        }
    }

    /// Composes segments given head-first.
    ///
    /// `Part::compose([Segment::cell(0, 1), Segment::Output(0)])` designates
    /// cell A2 of output 0.
    #[must_use]
    pub fn compose(head_first: impl IntoIterator<Item = Segment>) -> Self {
        let mut segments: Vec<Segment> = head_first.into_iter().collect();
        segments.reverse();
        Self { segments }
    }

    /// Designates the Nth output pin.
    #[must_use]
    pub fn output(pin: usize) -> Self {
        Self::of(Segment::Output(pin))
    }

    /// Designates the Nth input pin.
    #[must_use]
    pub fn input(pin: usize) -> Self {
        Self::of(Segment::Input(pin))
    }

    /// Designates the subject itself.
    #[must_use]
    pub fn self_ref() -> Self {
        Self::of(Segment::SelfRef)
    }

    /// Returns a chain with `segment` as its new, more specific head.
    #[must_use]
    pub fn then(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Returns a chain with `segment` as its new outermost container.
    #[must_use]
    pub fn within(mut self, segment: Segment) -> Self {
        self.segments.insert(0, segment);
        self
    }

    /// Places this chain inside `outer`: the result's head is this chain's head.
    #[must_use]
    pub fn inside(&self, outer: &Part) -> Part {
        let mut segments = outer.segments.clone();
        segments.extend(self.segments.iter().cloned());
        Part { segments }
    }

    /// Returns true if this is the empty chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns the most specific segment.
    #[must_use]
    pub fn head(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Returns the chain without its head (empty if the chain is atomic).
    #[must_use]
    pub fn tail(&self) -> Part {
        let mut segments = self.segments.clone();
        segments.pop();
        Part { segments }
    }

    /// Returns the outermost segment.
    #[must_use]
    pub fn root(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Iterates over the segments head-first.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().rev()
    }

    /// Returns the index (counted from the root) of the first segment of the
    /// given kind, scanning from the head.
    fn locate(&self, kind: SegmentKind) -> Option<usize> {
        self.segments.iter().rposition(|s| s.kind() == kind)
    }

    /// Returns the first segment of the given kind, scanning from the head.
    #[must_use]
    pub fn find(&self, kind: SegmentKind) -> Option<&Segment> {
        self.locate(kind).map(|i| &self.segments[i])
    }

    /// Substitutes the first segment of the given kind, keeping every other
    /// segment and the chain length unchanged.
    ///
    /// Returns `None` if the chain has no segment of that kind.
    #[must_use]
    pub fn replace(&self, kind: SegmentKind, segment: Segment) -> Option<Part> {
        let index = self.locate(kind)?;
        let mut segments = self.segments.clone();
        segments[index] = segment;
        Some(Part { segments })
    }

    /// Returns the segments more specific than the first segment of the
    /// given kind: `below(Output)` of `cell B2 of output 0` is `cell B2`.
    #[must_use]
    pub fn below(&self, kind: SegmentKind) -> Option<Part> {
        let index = self.locate(kind)?;
        Some(Part {
            segments: self.segments[index + 1..].to_vec(),
        })
    }

    /// Returns the output pin this chain designates, if any.
    #[must_use]
    pub fn output_pin(&self) -> Option<usize> {
        match self.find(SegmentKind::Output) {
            Some(Segment::Output(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the input pin this chain designates, if any.
    #[must_use]
    pub fn input_pin(&self) -> Option<usize> {
        match self.find(SegmentKind::Input) {
            Some(Segment::Input(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the (column, row) of the first cell segment, if any.
    #[must_use]
    pub fn cell(&self) -> Option<(usize, usize)> {
        match self.find(SegmentKind::Cell) {
            Some(Segment::Cell { column, row }) => Some((*column, *row)),
            _ => None,
        }
    }

    /// Returns the first character range, if any.
    #[must_use]
    pub fn chars(&self) -> Option<CharRange> {
        match self.find(SegmentKind::Chars) {
            Some(Segment::Chars(range)) => Some(*range),
            _ => None,
        }
    }

    /// Rewrites an output-pin designator into the matching input-pin one.
    #[must_use]
    pub fn output_to_input(&self, input: usize) -> Option<Part> {
        self.replace(SegmentKind::Output, Segment::Input(input))
    }

    /// Returns true if the outermost segment applies to the given subject kind.
    ///
    /// The empty chain applies to everything.
    #[must_use]
    pub fn applies_to(&self, subject: SubjectKind) -> bool {
        self.root().is_none_or(|s| s.applies_to(subject))
    }
}

impl From<Segment> for Part {
    fn from(segment: Segment) -> Self {
        Self::of(segment)
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Part({self})")
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "everything");
        }
        for (i, segment) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " of ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

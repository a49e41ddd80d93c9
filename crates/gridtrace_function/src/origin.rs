//! Origin tables recorded during evaluation.
//!
//! While an operator fills its output it records, per output location, the
//! input location(s) the value came from. Explanation later reads these
//! tables instead of recomputing anything.

use std::collections::HashMap;

use gridtrace_explain::Connective;
use gridtrace_part::{CharRange, Part, Segment};

// =============================================================================
// Sources
// =============================================================================

/// One input location that contributed to an output location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// A cell of an input grid.
    Cell {
        /// Input pin.
        input: usize,
        /// Column in that input.
        column: usize,
        /// Row in that input.
        row: usize,
    },
    /// A whole row of an input grid.
    Row {
        /// Input pin.
        input: usize,
        /// Row in that input.
        row: usize,
    },
    /// An element of an input list.
    Index {
        /// Input pin.
        input: usize,
        /// List position.
        index: usize,
    },
    /// A character span of an input text.
    Span {
        /// Input pin.
        input: usize,
        /// The characters scanned.
        range: CharRange,
    },
}

impl Source {
    /// Shorthand for a cell source.
    #[must_use]
    pub const fn cell(input: usize, column: usize, row: usize) -> Self {
        Self::Cell { input, column, row }
    }

    /// Returns the input pin this source lives on.
    #[must_use]
    pub const fn input(&self) -> usize {
        match self {
            Self::Cell { input, .. }
            | Self::Row { input, .. }
            | Self::Index { input, .. }
            | Self::Span { input, .. } => *input,
        }
    }

    /// Returns the designator of this source, refined by `suffix` (the
    /// segments the query had below the output cell, e.g. a char range).
    ///
    /// A char range below a span source is shifted into the span and
    /// clamped to it.
    #[must_use]
    pub fn part(&self, suffix: &Part) -> Part {
        match self {
            Self::Cell { input, column, row } => {
                suffix.inside(&Part::input(*input).then(Segment::cell(*column, *row)))
            }
            Self::Row { input, row } => Part::input(*input).then(Segment::Row(*row)),
            Self::Index { input, index } => {
                suffix.inside(&Part::input(*input).then(Segment::Index(*index)))
            }
            Self::Span { input, range } => {
                let chars = suffix
                    .chars()
                    .and_then(|q| q.shifted(range.start).intersect(range))
                    .unwrap_or(*range);
                Part::input(*input).then(Segment::Chars(chars))
            }
        }
    }
}

// =============================================================================
// Origins
// =============================================================================

/// Where one output location came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Origins {
    /// No rule covers the location (padding, out-of-range, ...).
    #[default]
    Unknown,
    /// The value was produced by the operator itself (a constant, a
    /// zero count); it has no input origin.
    Intrinsic,
    /// One or more input locations, combined by a connective.
    Sources {
        /// How the sources combine when there are two or more.
        connective: Connective,
        /// The contributing locations, in first-seen order.
        sources: Vec<Source>,
    },
}

impl Origins {
    /// A single source.
    #[must_use]
    pub fn single(source: Source) -> Self {
        Self::Sources {
            connective: Connective::And,
            sources: vec![source],
        }
    }

    /// Sources that were all jointly necessary. Empty means unknown.
    #[must_use]
    pub fn all(sources: Vec<Source>) -> Self {
        Self::from_sources(Connective::And, sources)
    }

    /// Sources that each alone would justify the value. Empty means unknown.
    #[must_use]
    pub fn any(sources: Vec<Source>) -> Self {
        Self::from_sources(Connective::Or, sources)
    }

    fn from_sources(connective: Connective, sources: Vec<Source>) -> Self {
        if sources.is_empty() {
            Self::Unknown
        } else {
            Self::Sources {
                connective,
                sources,
            }
        }
    }

    /// Adds a source, turning unknown into a single source.
    ///
    /// Sources already present are not added twice.
    pub fn push(&mut self, source: Source) {
        match self {
            Self::Sources { sources, .. } => {
                if !sources.contains(&source) {
                    sources.push(source);
                }
            }
            Self::Unknown | Self::Intrinsic => *self = Self::single(source),
        }
    }

    /// Returns the recorded sources (empty for unknown/intrinsic).
    #[must_use]
    pub fn sources(&self) -> &[Source] {
        match self {
            Self::Sources { sources, .. } => sources,
            Self::Unknown | Self::Intrinsic => &[],
        }
    }

    /// Returns the connective, if there are sources.
    #[must_use]
    pub fn connective(&self) -> Option<Connective> {
        match self {
            Self::Sources { connective, .. } => Some(*connective),
            Self::Unknown | Self::Intrinsic => None,
        }
    }

    /// Returns true if no rule covers the location.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// A sub-range of an output text cell that came from somewhere else than
/// the rest of the cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mark {
    /// The marked characters.
    pub range: CharRange,
    /// Where the marked characters came from.
    pub origins: Origins,
    /// Length of the leading text copied verbatim from the cell's default
    /// origin; unmarked characters past it were added by the operator.
    pub base_len: usize,
}

// =============================================================================
// Origin Grid
// =============================================================================

/// Per-cell origins of one output grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OriginGrid {
    width: usize,
    height: usize,
    cells: Vec<Origins>,
    marks: HashMap<(usize, usize), Mark>,
}

impl OriginGrid {
    /// Creates a table with every cell unknown.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Origins::Unknown; width * height],
            marks: HashMap::new(),
        }
    }

    /// Creates a table by asking `origin` for every (column, row).
    #[must_use]
    pub fn from_fn(
        width: usize,
        height: usize,
        mut origin: impl FnMut(usize, usize) -> Origins,
    ) -> Self {
        let mut grid = Self::new(width, height);
        for row in 0..height {
            for column in 0..width {
                grid.cells[row * width + column] = origin(column, row);
            }
        }
        grid
    }

    /// Returns the table width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the table height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the origins of a cell, or `None` outside the table.
    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> Option<&Origins> {
        (column < self.width && row < self.height).then(|| &self.cells[row * self.width + column])
    }

    /// Replaces the origins of a cell. Writes outside the table are ignored.
    pub fn set(&mut self, column: usize, row: usize, origins: Origins) {
        if column < self.width && row < self.height {
            self.cells[row * self.width + column] = origins;
        }
    }

    /// Returns a mutable reference to a cell's origins.
    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Origins> {
        (column < self.width && row < self.height)
            .then(|| &mut self.cells[row * self.width + column])
    }

    /// Marks a character range of a cell as having separate origins.
    pub fn mark(&mut self, column: usize, row: usize, mark: Mark) {
        self.marks.insert((column, row), mark);
    }

    /// Returns the mark of a cell, if any.
    #[must_use]
    pub fn mark_at(&self, column: usize, row: usize) -> Option<&Mark> {
        self.marks.get(&(column, row))
    }

    /// Returns the distinct input pins referenced anywhere in the table.
    #[must_use]
    pub fn inputs(&self) -> Vec<usize> {
        let mut pins: Vec<usize> = self
            .cells
            .iter()
            .chain(self.marks.values().map(|m| &m.origins))
            .flat_map(Origins::sources)
            .map(Source::input)
            .collect();
        pins.sort_unstable();
        pins.dedup();
        pins
    }
}

// =============================================================================
// Row Trace
// =============================================================================

/// Row-level origins of a relational operator's output.
///
/// `rows[0]` describes the label row; every other entry describes the data
/// row at the same output index. Sources are [`Source::Row`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowTrace {
    /// Origins of each output row.
    pub rows: Vec<Origins>,
    /// Source column of each output column.
    pub columns: Vec<usize>,
}

impl RowTrace {
    /// Creates a trace with the given column mapping and no rows.
    #[must_use]
    pub fn new(columns: Vec<usize>) -> Self {
        Self {
            rows: Vec::new(),
            columns,
        }
    }

    /// Returns the origins of an output row.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&Origins> {
        self.rows.get(row)
    }

    /// Returns the source column of an output column.
    #[must_use]
    pub fn column(&self, column: usize) -> Option<usize> {
        self.columns.get(column).copied()
    }
}

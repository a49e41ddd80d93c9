//! Designator segments: one level of structure each.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use gridtrace_foundation::CellName;

use crate::range::CharRange;
use crate::subject::SubjectKind;

/// A chart axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// The horizontal axis.
    X,
    /// The vertical axis.
    Y,
}

/// A chart element addressed by position or by name (e.g. a legend entry).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElementId {
    /// The Nth element.
    Numbered(usize),
    /// The element with this name.
    Named(Arc<str>),
}

/// A heat-map cell, addressed either by position or by a plotted value.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeatCoord {
    /// The cell `x`-th from the left and `y`-th from the bottom.
    Ordinal {
        /// Horizontal bucket position.
        x: usize,
        /// Vertical bucket position.
        y: usize,
    },
    /// The cell whose buckets contain the point (x, y).
    Cardinal {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
}

impl PartialEq for HeatCoord {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Ordinal { x: a, y: b }, Self::Ordinal { x: c, y: d }) => a == c && b == d,
            (Self::Cardinal { x: a, y: b }, Self::Cardinal { x: c, y: d }) => {
                a.to_bits() == c.to_bits() && b.to_bits() == d.to_bits()
            }
            _ => false,
        }
    }
}

impl Eq for HeatCoord {}

impl Hash for HeatCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Ordinal { x, y } => {
                x.hash(state);
                y.hash(state);
            }
            Self::Cardinal { x, y } => {
                x.to_bits().hash(state);
                y.to_bits().hash(state);
            }
        }
    }
}

/// One level of a designator chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Segment {
    /// The Nth input pin of a transformation.
    Input(usize),
    /// The Nth output pin of a transformation.
    Output(usize),
    /// The transformation's own subject, before pin selection.
    SelfRef,
    /// A grid cell.
    Cell {
        /// Zero-based column.
        column: usize,
        /// Zero-based row.
        row: usize,
    },
    /// A whole grid row.
    Row(usize),
    /// A whole grid column.
    Column(usize),
    /// A character range inside a text value.
    Chars(CharRange),
    /// The Nth element of a list.
    Index(usize),
    /// A whole chart axis.
    Axis(Axis),
    /// The caption of a chart axis.
    AxisCaption(Axis),
    /// A chart's whole legend.
    Legend,
    /// A numbered or named chart element.
    Element(ElementId),
    /// A heat-map cell.
    HeatCell(HeatCoord),
    /// The `index`-th point of the `series`-th series of a scatterplot.
    Point {
        /// Series position.
        series: usize,
        /// Point position within the series.
        index: usize,
    },
}

/// The kind of a segment, for `find`/`replace` queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// [`Segment::Input`]
    Input,
    /// [`Segment::Output`]
    Output,
    /// [`Segment::SelfRef`]
    SelfRef,
    /// [`Segment::Cell`]
    Cell,
    /// [`Segment::Row`]
    Row,
    /// [`Segment::Column`]
    Column,
    /// [`Segment::Chars`]
    Chars,
    /// [`Segment::Index`]
    Index,
    /// [`Segment::Axis`]
    Axis,
    /// [`Segment::AxisCaption`]
    AxisCaption,
    /// [`Segment::Legend`]
    Legend,
    /// [`Segment::Element`]
    Element,
    /// [`Segment::HeatCell`]
    HeatCell,
    /// [`Segment::Point`]
    Point,
}

impl Segment {
    /// Shorthand for a cell segment.
    #[must_use]
    pub const fn cell(column: usize, row: usize) -> Self {
        Self::Cell { column, row }
    }

    /// Shorthand for a character-range segment.
    #[must_use]
    pub fn chars(start: usize, end: usize) -> Self {
        Self::Chars(CharRange::new(start, end))
    }

    /// Returns the kind of this segment.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        match self {
            Self::Input(_) => SegmentKind::Input,
            Self::Output(_) => SegmentKind::Output,
            Self::SelfRef => SegmentKind::SelfRef,
            Self::Cell { .. } => SegmentKind::Cell,
            Self::Row(_) => SegmentKind::Row,
            Self::Column(_) => SegmentKind::Column,
            Self::Chars(_) => SegmentKind::Chars,
            Self::Index(_) => SegmentKind::Index,
            Self::Axis(_) => SegmentKind::Axis,
            Self::AxisCaption(_) => SegmentKind::AxisCaption,
            Self::Legend => SegmentKind::Legend,
            Self::Element(_) => SegmentKind::Element,
            Self::HeatCell(_) => SegmentKind::HeatCell,
            Self::Point { .. } => SegmentKind::Point,
        }
    }

    /// Returns true if this segment makes sense for a subject of the given kind.
    #[must_use]
    pub fn applies_to(&self, subject: SubjectKind) -> bool {
        match self {
            Self::Input(_) | Self::Output(_) | Self::SelfRef => subject == SubjectKind::Function,
            Self::Cell { .. } | Self::Row(_) | Self::Column(_) => subject == SubjectKind::Grid,
            Self::Chars(_) => subject == SubjectKind::Text,
            Self::Index(_) => subject == SubjectKind::List,
            Self::HeatCell(_) => subject == SubjectKind::HeatMap,
            Self::Point { .. } => subject == SubjectKind::Scatterplot,
            Self::Axis(_) | Self::AxisCaption(_) | Self::Legend | Self::Element(_) => {
                matches!(subject, SubjectKind::HeatMap | SubjectKind::Scatterplot)
            }
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(n) => write!(f, "input {n}"),
            Self::Output(n) => write!(f, "output {n}"),
            Self::SelfRef => write!(f, "self"),
            Self::Cell { column, row } => write!(f, "cell {}", CellName::new(*column, *row)),
            Self::Row(r) => write!(f, "row {r}"),
            Self::Column(c) => write!(f, "column {c}"),
            Self::Chars(range) => write!(f, "chars {range}"),
            Self::Index(i) => write!(f, "element {i}"),
            Self::Axis(axis) => write!(f, "{axis:?} axis"),
            Self::AxisCaption(axis) => write!(f, "{axis:?} axis caption"),
            Self::Legend => write!(f, "legend"),
            Self::Element(ElementId::Numbered(n)) => write!(f, "element #{n}"),
            Self::Element(ElementId::Named(name)) => write!(f, "element {name:?}"),
            Self::HeatCell(HeatCoord::Ordinal { x, y }) => write!(f, "heat cell #({x}, {y})"),
            Self::HeatCell(HeatCoord::Cardinal { x, y }) => write!(f, "heat cell at ({x}, {y})"),
            Self::Point { series, index } => write!(f, "point {index} of series {series}"),
        }
    }
}

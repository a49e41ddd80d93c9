//! Designators ("parts") addressing sub-locations of values for gridtrace.
//!
//! This crate provides:
//! - [`Segment`] - One level of structure (pin, cell, character range, chart element)
//! - [`Part`] - A composable chain of segments, read head-first
//! - [`CharRange`] - Character intervals and their fragmentation
//! - [`SubjectId`] / [`SubjectKind`] - What a designator is applied to

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod part;
pub mod range;
pub mod segment;
pub mod subject;

pub use part::Part;
pub use range::{CharRange, Fragments};
pub use segment::{Axis, ElementId, HeatCoord, Segment, SegmentKind};
pub use subject::{SubjectId, SubjectKind};

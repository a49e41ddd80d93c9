//! Reshaping transformations with per-cell lineage for gridtrace.
//!
//! Every operator here records, while it fills its output grid, where each
//! output cell came from, and explains through the shared rules in
//! [`gridtrace_function::rules`]:
//! - [`Transpose`], [`Resize`], [`CopyFrom`], [`PasteAt`] - Moving cells around
//! - [`Union`] - Stacking grids vertically
//! - [`Sort`] - Stable row ordering by key columns
//! - [`ExpandAsColumns`] - Pivoting a column's values into new columns
//! - [`ApplyFormula`] - Cell formulas, explained through their dependencies
//! - [`GetFrequencies`] - Two-dimensional binning of (x, y) pairs
//! - [`MoveUnitsToHeader`] - Units of measure moved into column labels
//! - [`ColumnSum`] - Per-column totals
//! - [`ReadGrid`] - Text to grid, with character spans as origins

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod support;

pub mod column_sum;
pub mod expand;
pub mod formula;
pub mod frequencies;
pub mod read;
pub mod region;
pub mod resize;
pub mod sort;
pub mod stack;
pub mod transpose;
pub mod units;

pub use column_sum::ColumnSum;
pub use expand::ExpandAsColumns;
pub use formula::ApplyFormula;
pub use frequencies::{Bins, GetFrequencies};
pub use read::ReadGrid;
pub use region::{CopyFrom, PasteAt};
pub use resize::Resize;
pub use sort::{Direction, Sort};
pub use stack::Union;
pub use transpose::Transpose;
pub use units::MoveUnitsToHeader;

//! Core values, grids, cell names, and errors for gridtrace.
//!
//! This crate provides:
//! - [`Value`] - Dynamically-typed scalar stored in a grid cell
//! - [`Grid`] - Fixed-dimension grid of values with O(1) cloning
//! - [`Datum`] - Anything passed between transformations
//! - [`CellName`] - Spreadsheet-style cell names
//! - [`Error`] - Rich error types with context
//! - [`read_grid`] - Text ingestion that remembers where each cell came from

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cell_name;
pub mod datum;
pub mod error;
pub mod figure;
pub mod grid;
pub mod same;
pub mod text;
pub mod types;
pub mod unit;
pub mod value;

pub use cell_name::{CellName, column_index, column_letters};
pub use datum::Datum;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use figure::{Figure, HeatMapFigure, ScatterFigure, Series};
pub use grid::Grid;
pub use same::SameKey;
pub use text::{ReadOptions, Scan, Separator, Span, read_grid};
pub use types::Type;
pub use unit::{Dimension, Quantity, Unit};
pub use value::Value;

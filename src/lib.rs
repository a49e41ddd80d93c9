//! Gridtrace - Cell-level lineage for spreadsheet transformation pipelines
//!
//! This crate re-exports all layers of the gridtrace system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: gridtrace_chart       — Heat maps, scatterplots, DrawChart
//! Layer 4: gridtrace_reshape     — Transpose, Sort, formulas, binning, units
//!          gridtrace_relational  — Union, Intersection, Projection, Selection
//! Layer 3: gridtrace_function    — Evaluate/explain contract, origin tables, circuits
//! Layer 2: gridtrace_explain     — Explanation graph, node factory, rendering
//! Layer 1: gridtrace_part        — Designators (segments and parts)
//! Layer 0: gridtrace_foundation  — Core types (Value, Grid, Datum, Error)
//! ```
//!
//! The two `Union` operators live in their own layers: [`reshape::Union`]
//! stacks grids, [`relational::Union`] merges relations without duplicates.

pub use gridtrace_chart as chart;
pub use gridtrace_explain as explain;
pub use gridtrace_foundation as foundation;
pub use gridtrace_function as function;
pub use gridtrace_part as part;
pub use gridtrace_relational as relational;
pub use gridtrace_reshape as reshape;

//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Grid, CellName, Error, and text ingestion.

mod errors;
mod grids;
mod text;
mod values;

//! Integration tests for Layer 6: Charts
//!
//! Tests that every feature a chart draws explains back to the grid cells
//! it was drawn from, through DrawChart and through wired circuits.

mod heat_map;
mod scatter;

//! Integration tests for Layer 4: Reshaping Transformations
//!
//! Tests the literal operator scenarios, grid-level properties such as the
//! transpose round-trip, and determinism of evaluation and explanation.

mod properties;
mod scenarios;

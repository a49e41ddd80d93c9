//! Integration tests for Layer 3: Circuits
//!
//! Tests wiring operators from different layers into one transformation,
//! and following explanations back through the wiring.

mod wiring;

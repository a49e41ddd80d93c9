//! Integration tests for whole pipelines
//!
//! Tests circuits that read text, reshape or filter it, and draw it, and
//! explain the result all the way back to characters of the source text.

mod inventory;
mod lengths;

//! Integration tests for Layers 1-2: Designators and Explanation Graphs
//!
//! Tests part composition laws, leaf interning, connector rules, and
//! explanation queries.

mod graphs;
mod parts;

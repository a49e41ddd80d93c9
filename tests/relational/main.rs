//! Integration tests for Layer 5: Relational Operators
//!
//! Tests duplicate elimination, row lineage through disjunctions and
//! conjunctions, signature checks, and selection predicates.

mod dedup;
mod lineage;

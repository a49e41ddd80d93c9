//! Explanation graphs for gridtrace.
//!
//! This crate provides:
//! - [`ExplanationGraph`] - Arena of AND/OR/leaf/unknown nodes with per-output child links
//! - [`NodeFactory`] - Leaf interning, connector construction, recursion guard
//! - [`Explanation`] - A finished, rooted graph with queries and text rendering
//! - [`ExplainConfig`] / [`PrettyOptions`] - Configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod factory;
pub mod graph;
pub mod node;
pub mod render;

pub use config::{ExplainConfig, PrettyOptions};
pub use factory::NodeFactory;
pub use graph::ExplanationGraph;
pub use node::{Connective, Node, NodeId, NodeKind};
pub use render::Explanation;

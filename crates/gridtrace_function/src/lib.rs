//! The transformation contract and circuits for gridtrace.
//!
//! This crate provides:
//! - [`Evaluable`] / [`Explainable`] / [`Function`] - The evaluate/explain contract
//! - [`Evaluation`] / [`Trace`] - Immutable result bundles carrying origin tables
//! - [`OriginGrid`] / [`RowTrace`] / [`Origins`] - What operators record while evaluating
//! - [`rules`] - Explanation rules shared by every operator that records origins
//! - [`Circuit`] / [`Fork`] - Wiring transformations into larger transformations
//! - Scalar functions: [`Constant`], [`ValueOf`], [`Sum`], [`Product`], [`Compare`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod circuit;
pub mod evaluation;
pub mod fork;
pub mod function;
mod macros;
pub mod origin;
pub mod rules;
pub mod scalar;

pub use circuit::{Circuit, Endpoint};
pub use evaluation::{Evaluation, Trace, expect_bool};
pub use fork::Fork;
pub use function::{
    Evaluable, Explainable, Function, check_arity, enter, explain, explain_with, grid_input,
    scalar_input,
};
pub use origin::{Mark, OriginGrid, Origins, RowTrace, Source};
pub use scalar::{Compare, CompareOp, Constant, Product, Sum, ValueOf};

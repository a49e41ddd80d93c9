//! The transformation contract.
//!
//! A transformation computes outputs from inputs ([`Evaluable`]) and, given
//! the [`Evaluation`] it produced, explains any designated output location
//! ([`Explainable`]). The two halves communicate only through the
//! evaluation bundle, so one instance can be evaluated and explained any
//! number of times, from any number of threads.

use std::fmt;

use gridtrace_explain::{ExplainConfig, Explanation, NodeFactory, NodeId};
use gridtrace_foundation::{Datum, Error, Grid, Result, Value};
use gridtrace_part::{Part, SubjectId};

use crate::evaluation::Evaluation;

// =============================================================================
// Traits
// =============================================================================

/// The forward half of a transformation.
pub trait Evaluable {
    /// Identity used to intern this instance's explanation leaves.
    fn subject(&self) -> SubjectId;

    /// Human-readable operator name.
    fn name(&self) -> &str;

    /// Number of inputs `evaluate` expects.
    fn input_arity(&self) -> usize;

    /// Number of outputs `evaluate` produces.
    fn output_arity(&self) -> usize;

    /// Computes the outputs and records how each was derived.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if `inputs.len()` differs from
    /// [`input_arity`](Self::input_arity), `TypeMismatch` if an input has
    /// the wrong shape, and operator-specific errors otherwise.
    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation>;
}

/// The explaining half of a transformation.
pub trait Explainable: Evaluable {
    /// Explains `part` (a designator rooted at one of this transformation's
    /// output pins) of the given evaluation.
    ///
    /// Returns the leaf for (`self`, `part`) with its causes linked below it.
    /// Never fails: locations no rule covers link to the unknown sentinel.
    fn explain(&self, run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId;
}

/// A complete, boxable transformation.
pub trait Function: Explainable + fmt::Debug + Send + Sync {
    /// Returns an independent instance with the same configuration and a
    /// fresh identity.
    fn duplicate(&self) -> Box<dyn Function>;
}

// =============================================================================
// Entry Points
// =============================================================================

/// Explains `part` of `run` with the default configuration.
#[must_use]
pub fn explain<F>(function: &F, run: &Evaluation, part: &Part) -> Explanation
where
    F: Explainable + ?Sized,
{
    explain_with(function, run, part, ExplainConfig::default())
}

/// Explains `part` of `run` with the given configuration.
#[must_use]
pub fn explain_with<F>(
    function: &F,
    run: &Evaluation,
    part: &Part,
    config: ExplainConfig,
) -> Explanation
where
    F: Explainable + ?Sized,
{
    let mut factory = NodeFactory::with_config(config);
    let root = function.explain(run, part, &mut factory);
    factory.finish(root)
}

// =============================================================================
// Helpers for Implementors
// =============================================================================

/// Fails with `ArityMismatch` unless exactly `input_arity` inputs were given.
///
/// # Errors
///
/// See above.
pub fn check_arity<F>(function: &F, inputs: &[Datum]) -> Result<()>
where
    F: Evaluable + ?Sized,
{
    if inputs.len() == function.input_arity() {
        Ok(())
    } else {
        Err(Error::arity_mismatch(function.input_arity(), inputs.len())
            .in_operation(function.name()))
    }
}

/// Returns input `pin` as a grid.
///
/// # Errors
///
/// Returns `ArityMismatch` for a missing pin and `TypeMismatch` if the
/// input is not a grid.
pub fn grid_input<'a, F>(function: &F, inputs: &'a [Datum], pin: usize) -> Result<&'a Grid>
where
    F: Evaluable + ?Sized,
{
    inputs
        .get(pin)
        .ok_or_else(|| Error::arity_mismatch(pin + 1, inputs.len()))
        .and_then(Datum::as_grid)
        .map_err(|e| e.in_operation(function.name()))
}

/// Returns input `pin` as a scalar.
///
/// # Errors
///
/// Returns `ArityMismatch` for a missing pin and `TypeMismatch` if the
/// input is not a scalar.
pub fn scalar_input<'a, F>(function: &F, inputs: &'a [Datum], pin: usize) -> Result<&'a Value>
where
    F: Evaluable + ?Sized,
{
    inputs
        .get(pin)
        .ok_or_else(|| Error::arity_mismatch(pin + 1, inputs.len()))
        .and_then(Datum::as_scalar)
        .map_err(|e| e.in_operation(function.name()))
}

/// Returns the leaf for `part` of `function`, and whether it has already
/// been explained (has children) in this factory.
pub fn enter<F>(function: &F, part: &Part, factory: &mut NodeFactory) -> (NodeId, bool)
where
    F: Evaluable + ?Sized,
{
    let subject = function.subject();
    factory.label(subject, function.name());
    let root = factory.part_node(subject, part);
    let done = factory.graph().has_children(root);
    (root, done)
}

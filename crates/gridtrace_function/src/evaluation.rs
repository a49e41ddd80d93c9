//! The result bundle of one evaluation.

use gridtrace_foundation::{Datum, Error, Grid, Result, Type, Value};

use crate::origin::{OriginGrid, RowTrace};

/// What an operator recorded while computing its outputs.
#[derive(Clone, Debug, PartialEq)]
pub enum Trace {
    /// Nothing: the operator explains from its configuration alone.
    Direct,
    /// The operator's inputs, kept for explanation rules that inspect them.
    Inputs(Vec<Datum>),
    /// Per-cell origins of a single output grid.
    Cells(OriginGrid),
    /// Per-row origins of a single output grid.
    Rows(RowTrace),
    /// Per-row origins plus, for each output row, the evaluation of the
    /// predicate that admitted it (`None` for the label row).
    Filtered {
        /// Row origins.
        rows: RowTrace,
        /// Predicate runs aligned with `rows.rows`.
        witnesses: Vec<Option<Evaluation>>,
    },
    /// Evaluations of contained transformations, by position (`None` for
    /// those that did not need to run).
    Nested(Vec<Option<Evaluation>>),
}

/// Outputs of one `evaluate` call together with its trace.
///
/// Evaluations are immutable; cloning one copies the state needed to
/// explain it later.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    outputs: Vec<Datum>,
    trace: Trace,
}

impl Evaluation {
    /// Creates an evaluation.
    #[must_use]
    pub fn new(outputs: Vec<Datum>, trace: Trace) -> Self {
        Self { outputs, trace }
    }

    /// Creates an evaluation with a single output.
    #[must_use]
    pub fn single(output: impl Into<Datum>, trace: Trace) -> Self {
        Self::new(vec![output.into()], trace)
    }

    /// Returns every output, by pin.
    #[must_use]
    pub fn outputs(&self) -> &[Datum] {
        &self.outputs
    }

    /// Returns one output.
    #[must_use]
    pub fn output(&self, pin: usize) -> Option<&Datum> {
        self.outputs.get(pin)
    }

    /// Consumes the evaluation, returning its outputs.
    #[must_use]
    pub fn into_outputs(self) -> Vec<Datum> {
        self.outputs
    }

    /// Returns the recorded trace.
    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Returns an output grid.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if there is no such output and `TypeMismatch`
    /// if it is not a grid.
    pub fn grid(&self, pin: usize) -> Result<&Grid> {
        self.output(pin)
            .ok_or_else(|| Error::arity_mismatch(pin + 1, self.outputs.len()))?
            .as_grid()
    }

    /// Returns an output scalar.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if there is no such output and `TypeMismatch`
    /// if it is not a scalar.
    pub fn scalar(&self, pin: usize) -> Result<&Value> {
        self.output(pin)
            .ok_or_else(|| Error::arity_mismatch(pin + 1, self.outputs.len()))?
            .as_scalar()
    }

    /// Returns the evaluation of the `index`-th contained transformation,
    /// if the trace is nested and it ran.
    #[must_use]
    pub fn nested(&self, index: usize) -> Option<&Evaluation> {
        match &self.trace {
            Trace::Nested(runs) => runs.get(index).and_then(Option::as_ref),
            _ => None,
        }
    }
}

/// Checks a datum is a boolean scalar.
///
/// # Errors
///
/// Returns `TypeMismatch` otherwise.
pub fn expect_bool(datum: &Datum) -> Result<bool> {
    let value = datum.as_scalar()?;
    value
        .as_bool()
        .ok_or_else(|| Error::type_mismatch(Type::Bool, value.value_type()))
}

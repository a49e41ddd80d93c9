//! Fork: one input replicated to many outputs.

use tracing::debug;

use gridtrace_explain::{NodeFactory, NodeId};
use gridtrace_foundation::{Datum, Result};
use gridtrace_part::{Part, SubjectId};

use crate::evaluation::{Evaluation, Trace};
use crate::function::{Evaluable, Explainable, Function, check_arity};
use crate::rules::explain_pass_through;

/// Replicates its single input onto `outputs` output pins.
#[derive(Clone, Debug)]
pub struct Fork {
    subject: SubjectId,
    outputs: usize,
}

impl Fork {
    /// Creates a fork with the given number of outputs.
    #[must_use]
    pub fn new(outputs: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            outputs,
        }
    }
}

impl Evaluable for Fork {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Fork"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        self.outputs
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        debug!(operator = "Fork", outputs = self.outputs, "evaluated");
        Ok(Evaluation::new(
            vec![inputs[0].clone(); self.outputs],
            Trace::Direct,
        ))
    }
}

impl Explainable for Fork {
    fn explain(&self, _run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        explain_pass_through(self, part, 0, factory)
    }
}

impl Function for Fork {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self::new(self.outputs))
    }
}

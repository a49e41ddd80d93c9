//! Union: the distinct rows of every input, in first-seen order.

use gridtrace_foundation::{Datum, Result};
use gridtrace_function::{Evaluable, Evaluation, Source, check_arity};
use gridtrace_part::SubjectId;

use crate::signature::common_signature;
use crate::support::{Relation, grid_inputs, label_origins};

/// Relational union of N grids sharing one signature.
///
/// Rows are emitted input by input, skipping any row "same"-equal to one
/// already emitted. A row that several inputs supplied explains as the
/// disjunction of all of them.
#[derive(Clone, Debug)]
pub struct Union {
    subject: SubjectId,
    arity: usize,
}

impl Union {
    /// Creates a union of `arity` inputs.
    #[must_use]
    pub fn new(arity: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            arity,
        }
    }
}

impl Evaluable for Union {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Union"
    }

    fn input_arity(&self) -> usize {
        self.arity
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let grids = grid_inputs(self, inputs)?;
        let signature = common_signature(&grids).map_err(|e| e.in_operation("Union"))?;

        let mut relation = Relation::new(
            (0..signature.width()).collect(),
            signature.labels().to_vec(),
            label_origins(grids.len()),
        );
        for (input, grid) in grids.iter().enumerate() {
            for row in 1..grid.height() {
                relation.add(grid.row_values(row), Source::Row { input, row });
            }
        }
        Ok(relation.finish("Union"))
    }
}

gridtrace_function::traced_function!(Union);

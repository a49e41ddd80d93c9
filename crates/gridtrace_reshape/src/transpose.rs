//! Transpose: swap columns and rows.

use gridtrace_foundation::{Datum, Grid, Result};
use gridtrace_function::{
    Evaluable, Evaluation, OriginGrid, Origins, Source, check_arity, grid_input,
};
use gridtrace_part::SubjectId;

use crate::support::finish;

/// Mirrors a grid along its main diagonal: output (c, r) is input (r, c).
#[derive(Clone, Debug)]
pub struct Transpose {
    subject: SubjectId,
}

impl Transpose {
    /// Creates a transpose.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: SubjectId::fresh(),
        }
    }
}

impl Default for Transpose {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluable for Transpose {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Transpose"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let input = grid_input(self, inputs, 0)?;
        let (width, height) = (input.height(), input.width());

        let mut output = Grid::new(width, height);
        for row in 0..height {
            for column in 0..width {
                output.set(column, row, input.get(row, column)?.clone())?;
            }
        }
        let origins = OriginGrid::from_fn(width, height, |column, row| {
            Origins::single(Source::cell(0, row, column))
        });
        Ok(finish("Transpose", output, origins))
    }
}

gridtrace_function::traced_function!(Transpose);

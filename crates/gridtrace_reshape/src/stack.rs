//! Spreadsheet union: stack grids vertically.

use gridtrace_foundation::{Datum, Grid, Result};
use gridtrace_function::{
    Evaluable, Evaluation, OriginGrid, Origins, Source, check_arity, grid_input,
};
use gridtrace_part::SubjectId;

use crate::support::finish;

/// Stacks its inputs top to bottom in argument order.
///
/// There is no header handling and no deduplication (see the relational
/// union for that). Short rows are right-padded with nil; padding has no
/// origin.
#[derive(Clone, Debug)]
pub struct Union {
    subject: SubjectId,
    inputs: usize,
}

impl Union {
    /// Creates a union of `inputs` grids.
    #[must_use]
    pub fn new(inputs: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            inputs,
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
        self.inputs
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let grids = (0..self.inputs)
            .map(|pin| grid_input(self, inputs, pin))
            .collect::<Result<Vec<&Grid>>>()?;
        let width = grids.iter().map(|g| g.width()).max().unwrap_or(0);
        let height = grids.iter().map(|g| g.height()).sum();

        let mut output = Grid::new(width, height);
        let mut origins = OriginGrid::new(width, height);
        let mut top = 0;
        for (pin, grid) in grids.iter().enumerate() {
            for row in 0..grid.height() {
                for column in 0..grid.width() {
                    output.set(column, top + row, grid.get(column, row)?.clone())?;
                    origins.set(
                        column,
                        top + row,
                        Origins::single(Source::cell(pin, column, row)),
                    );
                }
            }
            top += grid.height();
        }
        Ok(finish("Union", output, origins))
    }
}

gridtrace_function::traced_function!(Union);

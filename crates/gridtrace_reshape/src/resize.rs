//! Resize: crop or pad a grid to fixed dimensions.

use gridtrace_foundation::{Datum, Grid, Result};
use gridtrace_function::{
    Evaluable, Evaluation, OriginGrid, Origins, Source, check_arity, grid_input,
};
use gridtrace_part::SubjectId;

use crate::support::finish;

/// Copies the top-left overlap of its input into a `width` x `height`
/// grid. Cells added by padding are nil and have no origin.
#[derive(Clone, Debug)]
pub struct Resize {
    subject: SubjectId,
    width: usize,
    height: usize,
}

impl Resize {
    /// Creates a resize to the given dimensions.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            width,
            height,
        }
    }

    /// Returns the target (width, height).
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

impl Evaluable for Resize {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Resize"
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

        let mut output = Grid::new(self.width, self.height);
        let mut origins = OriginGrid::new(self.width, self.height);
        for row in 0..self.height.min(input.height()) {
            for column in 0..self.width.min(input.width()) {
                output.set(column, row, input.get(column, row)?.clone())?;
                origins.set(column, row, Origins::single(Source::cell(0, column, row)));
            }
        }
        Ok(finish("Resize", output, origins))
    }
}

gridtrace_function::traced_function!(Resize);

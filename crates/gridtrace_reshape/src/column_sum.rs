//! ColumnSum: one row of per-column totals under the label row.

use gridtrace_foundation::{Datum, Grid, Result, Value};
use gridtrace_function::{
    Evaluable, Evaluation, OriginGrid, Origins, Source, check_arity, grid_input,
};
use gridtrace_part::SubjectId;

use crate::support::finish;

/// Keeps the label row and replaces the data rows by their column sums.
///
/// Nil cells count as nothing. Each sum explains as the conjunction of the
/// column's data cells.
#[derive(Clone, Debug)]
pub struct ColumnSum {
    subject: SubjectId,
}

impl ColumnSum {
    /// Creates the transformation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: SubjectId::fresh(),
        }
    }
}

impl Default for ColumnSum {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluable for ColumnSum {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "ColumnSum"
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
        let width = input.width();

        let mut output = Grid::new(width, 2);
        let mut origins = OriginGrid::new(width, 2);
        for column in 0..width {
            output.set(column, 0, input.get(column, 0)?.clone())?;
            origins.set(column, 0, Origins::single(Source::cell(0, column, 0)));

            let mut total = Value::Nil;
            for row in 1..input.height() {
                total = total
                    .plus(input.get(column, row)?)
                    .map_err(|e| e.in_operation("ColumnSum"))?;
            }
            output.set(column, 1, total)?;
            origins.set(
                column,
                1,
                Origins::all(
                    (1..input.height())
                        .map(|row| Source::cell(0, column, row))
                        .collect(),
                ),
            );
        }
        Ok(finish("ColumnSum", output, origins))
    }
}

gridtrace_function::traced_function!(ColumnSum);

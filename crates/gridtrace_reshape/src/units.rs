//! MoveUnitsToHeader: strip units from values into column labels.

use gridtrace_foundation::{Datum, Grid, Quantity, Result, Value};
use gridtrace_function::{
    Evaluable, Evaluation, Mark, OriginGrid, Origins, Source, check_arity, grid_input,
};
use gridtrace_part::{CharRange, SubjectId};

use crate::support::finish;

/// Moves units of measure out of data cells and into the label row.
///
/// For each column holding quantities, the unit of the first one becomes
/// the column's reference unit: every quantity in the column is converted
/// to it and stored as a plain number, and the label `name` becomes
/// `name (unit)`. The unit's characters in the new label are attributed
/// to the cell the reference unit was taken from; the rest of the label
/// to the original label cell.
#[derive(Clone, Debug)]
pub struct MoveUnitsToHeader {
    subject: SubjectId,
}

impl MoveUnitsToHeader {
    /// Creates the transformation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: SubjectId::fresh(),
        }
    }
}

impl Default for MoveUnitsToHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// The first quantity below the label row, with its row.
fn reference(input: &Grid, column: usize) -> Option<(usize, &Quantity)> {
    (1..input.height()).find_map(|row| {
        input
            .try_get(column, row)
            .and_then(Value::as_quantity)
            .map(|q| (row, q))
    })
}

impl Evaluable for MoveUnitsToHeader {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "MoveUnitsToHeader"
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
        let mut output = input.clone();
        let mut origins = OriginGrid::from_fn(input.width(), input.height(), |column, row| {
            Origins::single(Source::cell(0, column, row))
        });

        for column in 0..input.width() {
            let Some((reference_row, unit)) =
                reference(input, column).map(|(row, q)| (row, q.unit.clone()))
            else {
                continue;
            };
            let reference_cell = Source::cell(0, column, reference_row);

            let label = input.get(column, 0)?.to_string();
            let base_len = label.chars().count();
            let header = if label.is_empty() {
                format!("({unit})")
            } else {
                format!("{label} ({unit})")
            };
            let end = header.chars().count() - 1;
            let start = end - unit.name().chars().count();
            output.set(column, 0, header)?;
            origins.mark(
                column,
                0,
                Mark {
                    range: CharRange::new(start, end),
                    origins: Origins::single(reference_cell.clone()),
                    base_len,
                },
            );

            for row in 1..input.height() {
                let Some(quantity) = input.try_get(column, row).and_then(Value::as_quantity)
                else {
                    continue;
                };
                let converted = quantity
                    .convert_to(&unit)
                    .map_err(|e| e.in_operation("MoveUnitsToHeader"))?;
                output.set(column, row, Value::number(converted.magnitude))?;
                if quantity.unit != unit {
                    origins.set(
                        column,
                        row,
                        Origins::all(vec![Source::cell(0, column, row), reference_cell.clone()]),
                    );
                }
            }
        }
        Ok(finish("MoveUnitsToHeader", output, origins))
    }
}

gridtrace_function::traced_function!(MoveUnitsToHeader);

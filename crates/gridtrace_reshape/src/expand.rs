//! ExpandAsColumns: pivot a header column and a value column into columns.

use std::collections::HashMap;

use gridtrace_foundation::{Datum, Error, Grid, Result, SameKey, Value};
use gridtrace_function::{
    Evaluable, Evaluation, OriginGrid, Origins, Source, check_arity, grid_input,
};
use gridtrace_part::SubjectId;

use crate::support::finish;

/// Turns the distinct values of one column into new columns.
///
/// Row 0 holds labels. Data rows that agree (by [`Value::same`]) on every
/// column other than the header and value columns form one group and
/// collapse into one output row. The output keeps those other columns,
/// then adds one column per distinct header value in first-seen order,
/// holding the value-column entry of the group's row with that header.
///
/// Group cells explain as alternatives over the group's rows; value cells
/// need both the value cell and the header cell that named the column;
/// the new labels come from the row that first introduced them.
#[derive(Clone, Debug)]
pub struct ExpandAsColumns {
    subject: SubjectId,
    header_column: usize,
    value_column: usize,
}

/// Rows of one group, plus the row holding each header's value.
struct Group {
    rows: Vec<usize>,
    cells: HashMap<usize, usize>,
}

impl ExpandAsColumns {
    /// Pivots `header_column` into labels holding `value_column` entries.
    #[must_use]
    pub fn new(header_column: usize, value_column: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            header_column,
            value_column,
        }
    }

    fn check(&self, input: &Grid) -> Result<()> {
        let width = input.width();
        if self.header_column == self.value_column {
            return Err(Error::configuration(
                "header and value columns must differ",
            ));
        }
        if self.header_column >= width || self.value_column >= width {
            return Err(Error::configuration(format!(
                "columns {} and {} must lie inside a grid of width {width}",
                self.header_column, self.value_column
            )));
        }
        if input.height() == 0 {
            return Err(Error::configuration("a label row is required"));
        }
        Ok(())
    }
}

impl Evaluable for ExpandAsColumns {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "ExpandAsColumns"
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
        self.check(input).map_err(|e| e.in_operation("ExpandAsColumns"))?;

        let kept: Vec<usize> = (0..input.width())
            .filter(|&c| c != self.header_column && c != self.value_column)
            .collect();
        let cell = |column: usize, row: usize| input.try_get(column, row).cloned().unwrap_or(Value::Nil);

        // distinct header values, each with the row that introduced it
        let mut headers: Vec<(Value, usize)> = Vec::new();
        let mut header_index: HashMap<SameKey, usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();
        let mut group_index: HashMap<SameKey, usize> = HashMap::new();

        for row in 1..input.height() {
            let header = cell(self.header_column, row);
            let h = *header_index
                .entry(SameKey::new([header.clone()]))
                .or_insert_with(|| {
                    headers.push((header, row));
                    headers.len() - 1
                });
            let key = SameKey::new(kept.iter().map(|&c| cell(c, row)));
            let g = *group_index.entry(key).or_insert_with(|| {
                groups.push(Group {
                    rows: Vec::new(),
                    cells: HashMap::new(),
                });
                groups.len() - 1
            });
            groups[g].rows.push(row);
            groups[g].cells.entry(h).or_insert(row);
        }

        let width = kept.len() + headers.len();
        let height = groups.len() + 1;
        let mut output = Grid::new(width, height);
        let mut origins = OriginGrid::new(width, height);

        for (column, &source) in kept.iter().enumerate() {
            output.set(column, 0, cell(source, 0))?;
            origins.set(column, 0, Origins::single(Source::cell(0, source, 0)));
        }
        for (h, (header, introduced)) in headers.iter().enumerate() {
            let column = kept.len() + h;
            output.set(column, 0, header.clone())?;
            origins.set(
                column,
                0,
                Origins::single(Source::cell(0, self.header_column, *introduced)),
            );
        }

        for (g, group) in groups.iter().enumerate() {
            let row = g + 1;
            let first = group.rows[0];
            for (column, &source) in kept.iter().enumerate() {
                output.set(column, row, cell(source, first))?;
                origins.set(
                    column,
                    row,
                    Origins::any(group.rows.iter().map(|&r| Source::cell(0, source, r)).collect()),
                );
            }
            for (&h, &source_row) in &group.cells {
                let column = kept.len() + h;
                output.set(column, row, cell(self.value_column, source_row))?;
                origins.set(
                    column,
                    row,
                    Origins::all(vec![
                        Source::cell(0, self.value_column, source_row),
                        Source::cell(0, self.header_column, source_row),
                    ]),
                );
            }
        }
        Ok(finish("ExpandAsColumns", output, origins))
    }
}

gridtrace_function::traced_function!(ExpandAsColumns);

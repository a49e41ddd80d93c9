//! Output accumulation shared by the relational operators.

use tracing::debug;

use gridtrace_foundation::{Datum, Grid, Result, SameKey, Value};
use gridtrace_function::{Evaluable, Evaluation, Origins, RowTrace, Source, Trace, grid_input};

use crate::index::RowIndex;

/// Output rows under construction, deduplicated by content.
pub(crate) struct Relation {
    rows: Vec<Vec<Value>>,
    merged: usize,
    trace: RowTrace,
    index: RowIndex,
}

impl Relation {
    /// Starts an output whose columns come from `columns` of the source
    /// rows, with its label row.
    pub(crate) fn new(columns: Vec<usize>, labels: Vec<Value>, origins: Origins) -> Self {
        let mut trace = RowTrace::new(columns);
        trace.rows.push(origins);
        Self {
            rows: vec![labels],
            merged: 0,
            trace,
            index: RowIndex::new(),
        }
    }

    /// Adds a data row unless a same-valued row was added before, in
    /// which case `source` joins that row's origins.
    pub(crate) fn add(&mut self, values: Vec<Value>, source: Source) -> bool {
        let (slot, inserted) = self
            .index
            .insert(SameKey::new(values.iter().cloned()), self.rows.len());
        if inserted {
            self.rows.push(values);
            self.trace.rows.push(Origins::any(vec![source]));
        } else if let Some(origins) = self.trace.rows.get_mut(slot) {
            origins.push(source);
            self.merged += 1;
        }
        inserted
    }

    /// Adds a data row with the given origins, skipping it if a same-valued
    /// row was added before.
    pub(crate) fn add_with(&mut self, values: Vec<Value>, origins: Origins) -> bool {
        let (_, inserted) = self
            .index
            .insert(SameKey::new(values.iter().cloned()), self.rows.len());
        if inserted {
            self.rows.push(values);
            self.trace.rows.push(origins);
        } else {
            self.merged += 1;
        }
        inserted
    }

    /// Bundles the rows with their trace, logging the shape.
    pub(crate) fn finish(self, operator: &str) -> Evaluation {
        let grid = Grid::from_rows(self.rows);
        debug!(
            operator,
            width = grid.width(),
            height = grid.height(),
            merged = self.merged,
            "evaluated"
        );
        Evaluation::single(grid, Trace::Rows(self.trace))
    }
}

/// The label row of every input, any one of which justifies it.
pub(crate) fn label_origins(inputs: usize) -> Origins {
    Origins::any((0..inputs).map(|input| Source::Row { input, row: 0 }).collect())
}

/// Every input as a grid.
pub(crate) fn grid_inputs<'a, F>(function: &F, inputs: &'a [Datum]) -> Result<Vec<&'a Grid>>
where
    F: Evaluable + ?Sized,
{
    (0..inputs.len())
        .map(|pin| grid_input(function, inputs, pin))
        .collect()
}

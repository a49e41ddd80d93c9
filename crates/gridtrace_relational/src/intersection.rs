//! Intersection: rows of the first input found in every other input.

use gridtrace_foundation::{Datum, Error, Result};
use gridtrace_function::{Evaluable, Evaluation, Origins, Source, check_arity};
use gridtrace_part::SubjectId;

use crate::index::{RowIndex, row_key};
use crate::signature::common_signature;
use crate::support::{Relation, grid_inputs, label_origins};

/// Relational intersection of N grids sharing one signature.
///
/// A data row of the first input is kept when every other input has a row
/// with the same values in the key columns (all columns unless
/// [`on`](Self::on) says otherwise). The kept row explains as the
/// conjunction of itself and the first matching row of each other input.
#[derive(Clone, Debug)]
pub struct Intersection {
    subject: SubjectId,
    arity: usize,
    keys: Option<Vec<usize>>,
}

impl Intersection {
    /// Creates an intersection of `arity` inputs matched on all columns.
    #[must_use]
    pub fn new(arity: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            arity,
            keys: None,
        }
    }

    /// Matches rows on the given columns only.
    #[must_use]
    pub fn on(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.keys = Some(columns.into_iter().collect());
        self
    }

    /// Returns the key columns, if restricted.
    #[must_use]
    pub fn keys(&self) -> Option<&[usize]> {
        self.keys.as_deref()
    }
}

impl Evaluable for Intersection {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Intersection"
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
        let signature = common_signature(&grids).map_err(|e| e.in_operation("Intersection"))?;
        let width = signature.width();
        let keys: Vec<usize> = match &self.keys {
            Some(keys) => keys.clone(),
            None => (0..width).collect(),
        };
        if let Some(column) = keys.iter().find(|&&column| column >= width) {
            return Err(Error::configuration(format!(
                "key column {column} is outside a relation of width {width}"
            ))
            .in_operation("Intersection"));
        }

        let others: Vec<RowIndex> = grids
            .iter()
            .skip(1)
            .map(|grid| RowIndex::of_rows(grid, &keys))
            .collect();
        let mut relation = Relation::new(
            (0..width).collect(),
            signature.labels().to_vec(),
            label_origins(grids.len()),
        );
        let first = grids[0];
        for row in 1..first.height() {
            let key = row_key(first, row, &keys);
            let matches: Option<Vec<Source>> = others
                .iter()
                .enumerate()
                .map(|(i, index)| {
                    index.get(&key).map(|found| Source::Row {
                        input: i + 1,
                        row: found,
                    })
                })
                .collect();
            let Some(matches) = matches else {
                continue;
            };
            let mut sources = vec![Source::Row { input: 0, row }];
            sources.extend(matches);
            relation.add_with(first.row_values(row), Origins::all(sources));
        }
        Ok(relation.finish("Intersection"))
    }
}

gridtrace_function::traced_function!(Intersection);

//! Projection: named columns, reordered, duplicates collapsed.

use gridtrace_foundation::{Datum, Error, Result, Value};
use gridtrace_function::{Evaluable, Evaluation, Origins, Source, check_arity, grid_input};
use gridtrace_part::SubjectId;

use crate::support::Relation;

/// Keeps only the named columns, in the order given.
///
/// Data rows that become "same"-equal once projected collapse into one,
/// which explains as the disjunction of every input row that produced it.
/// Cells (and character ranges of cells) map straight to the projected
/// column of the source row.
///
/// ```
/// use gridtrace_relational::Projection;
///
/// let projection = Projection::new(["A", "C"]);
/// assert_eq!(projection.columns(), &["A".to_string(), "C".to_string()]);
/// ```
#[derive(Clone, Debug)]
pub struct Projection {
    subject: SubjectId,
    columns: Vec<String>,
}

impl Projection {
    /// Creates a projection onto the columns with the given labels.
    #[must_use]
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            subject: SubjectId::fresh(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the projected labels.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Evaluable for Projection {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Projection"
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
        if input.height() == 0 {
            return Err(
                Error::incompatible_signature("input has no label row").in_operation("Projection")
            );
        }
        let resolved = self
            .columns
            .iter()
            .map(|label| {
                input.column_of(label).ok_or_else(|| {
                    Error::configuration(format!("no column is labelled '{label}'"))
                        .in_operation("Projection")
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        let pick = |row: usize| -> Vec<Value> {
            resolved
                .iter()
                .filter_map(|&column| input.try_get(column, row).cloned())
                .collect()
        };
        let mut relation = Relation::new(
            resolved.clone(),
            pick(0),
            Origins::single(Source::Row { input: 0, row: 0 }),
        );
        for row in 1..input.height() {
            relation.add(pick(row), Source::Row { input: 0, row });
        }
        Ok(relation.finish("Projection"))
    }
}

gridtrace_function::traced_function!(Projection);

#[cfg(test)]
mod tests {
    use super::*;
    use gridtrace_explain::NodeKind;
    use gridtrace_foundation::{ErrorKind, Grid, grid};
    use gridtrace_function::explain;
    use gridtrace_part::{Part, Segment};

    fn people() -> Grid {
        grid![
            ["A", "B", "C"],
            ["ann", 1, "x"],
            ["bob", 2, "y"],
            ["ann", 3, "x"],
            ["cat", 4, "x"]
        ]
    }

    #[test]
    fn keeps_named_columns_in_order() {
        let projection = Projection::new(["C", "A"]);
        let run = projection.evaluate(&[people().into()]).unwrap();
        assert_eq!(
            run.grid(0).unwrap(),
            &grid![["C", "A"], ["x", "ann"], ["y", "bob"], ["x", "cat"]]
        );
    }

    #[test]
    fn collapsed_rows_explain_as_a_disjunction() {
        let projection = Projection::new(["A", "C"]);
        let run = projection.evaluate(&[people().into()]).unwrap();
        let e = explain(&projection, &run, &Part::output(0).then(Segment::Row(1)));
        assert_eq!(e.kind(e.children(e.root())[0]), &NodeKind::Or);
        let sources: Vec<&Part> = e.sources().into_iter().map(|(_, p)| p).collect();
        assert_eq!(
            sources,
            vec![
                &Part::input(0).then(Segment::Row(1)),
                &Part::input(0).then(Segment::Row(3))
            ]
        );
    }

    #[test]
    fn character_ranges_map_through_the_column() {
        let projection = Projection::new(["C", "A"]);
        let run = projection.evaluate(&[people().into()]).unwrap();
        let part = Part::output(0)
            .then(Segment::cell(1, 2))
            .then(Segment::chars(0, 2));
        let e = explain(&projection, &run, &part);
        assert_eq!(
            e.sources()[0].1,
            &Part::input(0)
                .then(Segment::cell(0, 2))
                .then(Segment::chars(0, 2))
        );
        let label = explain(&projection, &run, &Part::output(0).then(Segment::cell(0, 0)));
        assert_eq!(label.sources()[0].1, &Part::input(0).then(Segment::cell(2, 0)));
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let projection = Projection::new(["A", "Z"]);
        let err = projection.evaluate(&[people().into()]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Configuration(_)));
    }
}

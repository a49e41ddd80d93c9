//! Selection: rows admitted by a boolean predicate.

use tracing::{debug, trace};

use gridtrace_explain::{Connective, NodeFactory, NodeId};
use gridtrace_foundation::{Datum, Error, Grid, Result};
use gridtrace_function::rules::{explain_rows, explain_traced, output_rest, rewrite_leaves};
use gridtrace_function::{
    Evaluable, Evaluation, Explainable, Function, Origins, RowTrace, Source, Trace, check_arity,
    enter, expect_bool, grid_input,
};
use gridtrace_part::{Part, Segment, SegmentKind, SubjectId};

/// Keeps the data rows for which a predicate returns true.
///
/// The predicate is any transformation with one grid input and a boolean
/// first output. It is run once per data row on a two-row grid: the label
/// row, then the candidate row. A kept row explains as the conjunction of
/// its source row and the predicate's own explanation, with the cells the
/// predicate read mapped back onto that source row.
#[derive(Debug)]
pub struct Selection {
    subject: SubjectId,
    predicate: Box<dyn Function>,
}

impl Selection {
    /// Creates a selection with the given predicate.
    #[must_use]
    pub fn new(predicate: impl Function + 'static) -> Self {
        Self::boxed(Box::new(predicate))
    }

    /// Creates a selection with a boxed predicate.
    #[must_use]
    pub fn boxed(predicate: Box<dyn Function>) -> Self {
        Self {
            subject: SubjectId::fresh(),
            predicate,
        }
    }

    /// Returns the predicate.
    #[must_use]
    pub fn predicate(&self) -> &dyn Function {
        self.predicate.as_ref()
    }

    fn check_predicate(&self) -> Result<()> {
        if self.predicate.input_arity() == 1 && self.predicate.output_arity() > 0 {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "predicate '{}' takes {} inputs and gives {} outputs, expected one grid and a boolean",
                self.predicate.name(),
                self.predicate.input_arity(),
                self.predicate.output_arity()
            ))
            .in_operation("Selection"))
        }
    }

    fn explain_selected(
        &self,
        rows: &RowTrace,
        witnesses: &[Option<Evaluation>],
        row: usize,
        part: &Part,
        factory: &mut NodeFactory,
    ) -> NodeId {
        let (root, done) = enter(self, part, factory);
        if done {
            return root;
        }
        let source = rows.row(row).and_then(|origins| match origins.sources() {
            [Source::Row { row, .. }] => Some(*row),
            _ => None,
        });
        let (Some(source), Some(Some(witness))) = (source, witnesses.get(row)) else {
            factory.link_unknown(root);
            return root;
        };
        let source_row = factory.part_node(self.subject, &Part::input(0).then(Segment::Row(source)));
        if !factory.descend() {
            factory.link_unknown(root);
            return root;
        }
        trace!(row, source, predicate = self.predicate.name(), "explaining selection");

        // leaves are interned per subject, so a second row needs its own copy
        let copy;
        let predicate: &dyn Function =
            if factory.has_part_node(self.predicate.subject(), &Part::output(0)) {
                copy = self.predicate.duplicate();
                copy.as_ref()
            } else {
                self.predicate.as_ref()
            };
        let reason = predicate.explain(witness, &Part::output(0), factory);
        rewrite_leaves(factory, reason, predicate.subject(), |factory, leaf, part| {
            let Some(&Segment::Input(0)) = part.root() else {
                return;
            };
            let below = part.below(SegmentKind::Input).unwrap_or_default();
            // predicate row 0 is the label row, row 1 the candidate
            let cause = match below.cell() {
                Some((column, predicate_row)) => {
                    let mapped = if predicate_row == 0 { 0 } else { source };
                    below
                        .replace(SegmentKind::Cell, Segment::cell(column, mapped))
                        .map_or(source_row, |cell| {
                            factory.part_node(self.subject, &cell.inside(&Part::input(0)))
                        })
                }
                None => source_row,
            };
            factory.link(leaf, cause);
        });
        factory.ascend();
        factory.connect(root, &[source_row, reason], Connective::And);
        root
    }
}

impl Evaluable for Selection {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Selection"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        self.check_predicate()?;
        let input = grid_input(self, inputs, 0)?;
        if input.height() == 0 {
            return Err(
                Error::incompatible_signature("input has no label row").in_operation("Selection")
            );
        }

        let labels = input.row_values(0);
        let mut kept = vec![labels.clone()];
        let mut rows = RowTrace::new((0..input.width()).collect());
        rows.rows.push(Origins::single(Source::Row { input: 0, row: 0 }));
        let mut witnesses = vec![None];
        for row in 1..input.height() {
            let candidate = Grid::from_rows(vec![labels.clone(), input.row_values(row)]);
            let run = self
                .predicate
                .evaluate(&[candidate.into()])
                .map_err(|e| e.in_operation("Selection"))?;
            let admitted = run
                .output(0)
                .ok_or_else(|| Error::arity_mismatch(1, 0))
                .and_then(expect_bool)
                .map_err(|e| e.in_operation("Selection"))?;
            if admitted {
                kept.push(input.row_values(row));
                rows.rows.push(Origins::single(Source::Row { input: 0, row }));
                witnesses.push(Some(run));
            }
        }

        let output = Grid::from_rows(kept);
        debug!(
            operator = "Selection",
            width = output.width(),
            height = output.height(),
            rejected = input.height() - output.height(),
            "evaluated"
        );
        Ok(Evaluation::single(output, Trace::Filtered { rows, witnesses }))
    }
}

impl Explainable for Selection {
    fn explain(&self, run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        let Trace::Filtered { rows, witnesses } = run.trace() else {
            return explain_traced(self, run, part, factory);
        };
        match output_rest(part, 0).as_ref().and_then(Part::root) {
            Some(&Segment::Row(row)) if row > 0 => {
                self.explain_selected(rows, witnesses, row, part, factory)
            }
            _ => explain_rows(self, rows, part, factory),
        }
    }
}

impl Function for Selection {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self {
            subject: SubjectId::fresh(),
            predicate: self.predicate.duplicate(),
        })
    }
}

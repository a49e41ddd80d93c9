//! ApplyFormula: compute cells from other cells of the same grid.
//!
//! Each target cell carries a transformation that reads the grid as it
//! stands when the target's turn comes, so a formula may depend on the
//! results of formulas declared before it. Explanation follows those
//! dependencies: a formula's reference to an earlier target is explained
//! by explaining that target in turn.

use tracing::{debug, trace};

use gridtrace_explain::{Connective, NodeFactory, NodeId};
use gridtrace_foundation::{CellName, Datum, Error, Result};
use gridtrace_function::rules::{cell_part, output_rest, rewrite_leaves};
use gridtrace_function::{
    Evaluable, Evaluation, Explainable, Function, Trace, check_arity, enter, grid_input,
};
use gridtrace_part::{Part, Segment, SegmentKind, SubjectId};

/// One target cell and the transformation computing it.
#[derive(Debug)]
struct Formula {
    column: usize,
    row: usize,
    function: Box<dyn Function>,
}

/// Writes the results of cell formulas into a copy of its input grid.
///
/// Formulas run in declaration order. A formula takes the current grid
/// (or nothing, if its arity is 0) and its first output becomes the
/// target cell's value.
///
/// ```
/// use gridtrace_function::{Evaluable, ValueOf};
/// use gridtrace_foundation::grid;
/// use gridtrace_reshape::ApplyFormula;
///
/// let formula = ApplyFormula::new().set(0, 1, ValueOf::new(0, 0)).unwrap();
/// let run = formula.evaluate(&[grid![[-3], [1]].into()]).unwrap();
/// assert_eq!(run.grid(0).unwrap(), &grid![[-3], [-3]]);
/// ```
#[derive(Debug)]
pub struct ApplyFormula {
    subject: SubjectId,
    formulas: Vec<Formula>,
}

impl ApplyFormula {
    /// Creates an instance with no formulas.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: SubjectId::fresh(),
            formulas: Vec::new(),
        }
    }

    /// Adds a formula for the cell at (column, row).
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the function takes more than one input
    /// or produces no output, or if the cell already has a formula.
    pub fn set(self, column: usize, row: usize, function: impl Function + 'static) -> Result<Self> {
        self.set_boxed(column, row, Box::new(function))
    }

    /// Adds a formula for a named cell, e.g. `"B3"`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCellName` for a malformed name, otherwise as
    /// [`set`](Self::set).
    pub fn set_named(self, name: &str, function: impl Function + 'static) -> Result<Self> {
        let cell = CellName::parse(name)?;
        self.set(cell.column, cell.row, function)
    }

    /// Adds an already boxed formula.
    ///
    /// # Errors
    ///
    /// See [`set`](Self::set).
    pub fn set_boxed(
        mut self,
        column: usize,
        row: usize,
        function: Box<dyn Function>,
    ) -> Result<Self> {
        if function.input_arity() > 1 || function.output_arity() == 0 {
            return Err(Error::configuration(format!(
                "formula {} for {} must take at most one grid and produce a value",
                function.name(),
                CellName::new(column, row)
            )));
        }
        if self.target_before(column, row, self.formulas.len()).is_some() {
            return Err(Error::configuration(format!(
                "{} already has a formula",
                CellName::new(column, row)
            )));
        }
        self.formulas.push(Formula {
            column,
            row,
            function,
        });
        Ok(self)
    }

    /// Returns the number of formulas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    /// Returns true if there are no formulas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Position of the formula targeting (column, row), if it comes
    /// before `limit`.
    fn target_before(&self, column: usize, row: usize, limit: usize) -> Option<usize> {
        self.formulas[..limit]
            .iter()
            .position(|f| f.column == column && f.row == row)
    }

    fn explain_target(
        &self,
        run: &Evaluation,
        index: usize,
        suffix: &Part,
        root: NodeId,
        factory: &mut NodeFactory,
    ) {
        let formula = &self.formulas[index];
        let Some(sub_run) = run.nested(index) else {
            factory.link_unknown(root);
            return;
        };
        if !factory.descend() {
            factory.link_unknown(root);
            return;
        }
        trace!(
            cell = %CellName::new(formula.column, formula.row),
            formula = formula.function.name(),
            "explaining formula"
        );
        let sub_root = formula
            .function
            .explain(sub_run, &suffix.inside(&Part::output(0)), factory);
        factory.link(root, sub_root);
        rewrite_leaves(factory, sub_root, formula.function.subject(), |factory, leaf, part| {
            let Some(&Segment::Input(0)) = part.root() else {
                return;
            };
            let below = part.below(SegmentKind::Input).unwrap_or_default();
            let earlier = below
                .cell()
                .and_then(|(column, row)| self.target_before(column, row, index));
            let cause = match earlier {
                // the formula read a value an earlier formula wrote
                Some(_) => self.explain(run, &below.inside(&Part::output(0)), factory),
                None => factory.part_node(self.subject, &below.inside(&Part::input(0))),
            };
            factory.link(leaf, cause);
        });
        factory.ascend();
    }
}

impl Default for ApplyFormula {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluable for ApplyFormula {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "ApplyFormula"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let mut grid = grid_input(self, inputs, 0)?.clone();
        let mut runs = Vec::with_capacity(self.formulas.len());
        for formula in &self.formulas {
            let args = if formula.function.input_arity() == 1 {
                vec![Datum::Grid(grid.clone())]
            } else {
                Vec::new()
            };
            let sub_run = formula
                .function
                .evaluate(&args)
                .map_err(|e| e.in_operation("ApplyFormula"))?;
            let value = sub_run.scalar(0)?.clone();
            grid.set(formula.column, formula.row, value)
                .map_err(|e| e.in_operation("ApplyFormula"))?;
            runs.push(Some(sub_run));
        }
        debug!(
            operator = "ApplyFormula",
            formulas = self.formulas.len(),
            width = grid.width(),
            height = grid.height(),
            "evaluated"
        );
        Ok(Evaluation::single(grid, Trace::Nested(runs)))
    }
}

impl Explainable for ApplyFormula {
    fn explain(&self, run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        let (root, done) = enter(self, part, factory);
        if done {
            return root;
        }
        let Some(rest) = output_rest(part, 0) else {
            factory.link_unknown(root);
            return root;
        };
        match rest.root() {
            None => {
                let input = factory.part_node(self.subject, &Part::input(0));
                factory.link(root, input);
            }
            Some(&Segment::Cell { column, row }) => {
                let suffix = rest.below(SegmentKind::Cell).unwrap_or_default();
                let inside = run.grid(0).is_ok_and(|grid| grid.contains(column, row));
                match self.target_before(column, row, self.formulas.len()) {
                    Some(index) if inside => {
                        self.explain_target(run, index, &suffix, root, factory);
                    }
                    None if inside => {
                        let cell = Part::input(0).then(Segment::cell(column, row));
                        let leaf = factory.part_node(self.subject, &suffix.inside(&cell));
                        factory.link(root, leaf);
                    }
                    _ => factory.link_unknown(root),
                }
            }
            Some(&Segment::Row(row)) => {
                let (width, height) = run.grid(0).map_or((0, 0), |g| (g.width(), g.height()));
                if row >= height {
                    factory.link_unknown(root);
                    return root;
                }
                let cells: Vec<NodeId> = (0..width)
                    .map(|column| self.explain(run, &cell_part(column, row), factory))
                    .collect();
                factory.connect(root, &cells, Connective::And);
            }
            Some(&Segment::Column(column)) => {
                let (width, height) = run.grid(0).map_or((0, 0), |g| (g.width(), g.height()));
                if column >= width {
                    factory.link_unknown(root);
                    return root;
                }
                let cells: Vec<NodeId> = (0..height)
                    .map(|row| self.explain(run, &cell_part(column, row), factory))
                    .collect();
                factory.connect(root, &cells, Connective::And);
            }
            Some(_) => factory.link_unknown(root),
        }
        root
    }
}

impl Function for ApplyFormula {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self {
            subject: SubjectId::fresh(),
            formulas: self
                .formulas
                .iter()
                .map(|f| Formula {
                    column: f.column,
                    row: f.row,
                    function: f.function.duplicate(),
                })
                .collect(),
        })
    }
}

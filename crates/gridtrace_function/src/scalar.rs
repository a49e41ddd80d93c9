//! Scalar transformations used inside formulas and predicates.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use gridtrace_explain::{Connective, NodeFactory, NodeId};
use gridtrace_foundation::{CellName, Datum, Result, Value};
use gridtrace_part::{Part, Segment, SegmentKind, SubjectId};

use crate::evaluation::{Evaluation, Trace};
use crate::function::{
    Evaluable, Explainable, Function, check_arity, enter, grid_input, scalar_input,
};

/// Links, in conjunction, every input pin of `function` below its leaf.
fn explain_all_inputs<F>(function: &F, part: &Part, factory: &mut NodeFactory) -> NodeId
where
    F: Evaluable + ?Sized,
{
    let (root, done) = enter(function, part, factory);
    if done || function.input_arity() == 0 {
        return root;
    }
    if part.output_pin() != Some(0) {
        factory.link_unknown(root);
        return root;
    }
    let ids: Vec<NodeId> = (0..function.input_arity())
        .map(|pin| factory.part_node(function.subject(), &Part::input(pin)))
        .collect();
    factory.connect(root, &ids, Connective::And);
    root
}

// =============================================================================
// Constant
// =============================================================================

/// Produces a fixed value from no inputs. Its output has no cause.
#[derive(Clone, Debug)]
pub struct Constant {
    subject: SubjectId,
    value: Value,
}

impl Constant {
    /// Creates a constant.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            subject: SubjectId::fresh(),
            value: value.into(),
        }
    }
}

impl Evaluable for Constant {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Constant"
    }

    fn input_arity(&self) -> usize {
        0
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        Ok(Evaluation::single(self.value.clone(), Trace::Direct))
    }
}

impl Explainable for Constant {
    fn explain(&self, _run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        explain_all_inputs(self, part, factory)
    }
}

impl Function for Constant {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self::new(self.value.clone()))
    }
}

// =============================================================================
// ValueOf
// =============================================================================

/// Reads one cell of its input grid.
#[derive(Clone, Debug)]
pub struct ValueOf {
    subject: SubjectId,
    column: usize,
    row: usize,
}

impl ValueOf {
    /// Reads the cell at (column, row).
    #[must_use]
    pub fn new(column: usize, row: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            column,
            row,
        }
    }

    /// Reads the cell with the given spreadsheet name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCellName` if `name` is malformed.
    pub fn named(name: &str) -> Result<Self> {
        let cell = CellName::parse(name)?;
        Ok(Self::new(cell.column, cell.row))
    }

    /// Returns the (column, row) read.
    #[must_use]
    pub fn cell(&self) -> (usize, usize) {
        (self.column, self.row)
    }
}

impl Evaluable for ValueOf {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "ValueOf"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let grid = grid_input(self, inputs, 0)?;
        let value = grid
            .get(self.column, self.row)
            .map_err(|e| e.in_operation("ValueOf"))?
            .clone();
        Ok(Evaluation::single(value, Trace::Direct))
    }
}

impl Explainable for ValueOf {
    fn explain(&self, _run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        let (root, done) = enter(self, part, factory);
        if done {
            return root;
        }
        // a char range of the value is the same char range of the cell
        match part.below(SegmentKind::Output) {
            Some(rest) if part.output_pin() == Some(0) => {
                let cell = Part::input(0).then(Segment::cell(self.column, self.row));
                let leaf = factory.part_node(self.subject, &rest.inside(&cell));
                factory.link(root, leaf);
            }
            _ => factory.link_unknown(root),
        }
        root
    }
}

impl Function for ValueOf {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self::new(self.column, self.row))
    }
}

// =============================================================================
// Sum / Product
// =============================================================================

fn fold<F>(
    function: &F,
    inputs: &[Datum],
    op: fn(&Value, &Value) -> Result<Value>,
) -> Result<Evaluation>
where
    F: Evaluable + ?Sized,
{
    check_arity(function, inputs)?;
    let mut acc = Value::Nil;
    for pin in 0..inputs.len() {
        let value = scalar_input(function, inputs, pin)?;
        acc = op(&acc, value).map_err(|e| e.in_operation(function.name()))?;
    }
    debug!(operator = function.name(), result = %acc, "evaluated");
    Ok(Evaluation::single(acc, Trace::Direct))
}

/// Adds its scalar inputs. Every input is a jointly necessary cause.
#[derive(Clone, Debug)]
pub struct Sum {
    subject: SubjectId,
    arity: usize,
}

impl Sum {
    /// Creates a sum of `arity` inputs.
    #[must_use]
    pub fn new(arity: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            arity,
        }
    }
}

impl Evaluable for Sum {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Sum"
    }

    fn input_arity(&self) -> usize {
        self.arity
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        fold(self, inputs, Value::plus)
    }
}

impl Explainable for Sum {
    fn explain(&self, _run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        explain_all_inputs(self, part, factory)
    }
}

impl Function for Sum {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self::new(self.arity))
    }
}

/// Multiplies its scalar inputs. Every input is a jointly necessary cause.
#[derive(Clone, Debug)]
pub struct Product {
    subject: SubjectId,
    arity: usize,
}

impl Product {
    /// Creates a product of `arity` inputs.
    #[must_use]
    pub fn new(arity: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            arity,
        }
    }
}

impl Evaluable for Product {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Product"
    }

    fn input_arity(&self) -> usize {
        self.arity
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        fold(self, inputs, Value::multiply)
    }
}

impl Explainable for Product {
    fn explain(&self, _run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        explain_all_inputs(self, part, factory)
    }
}

impl Function for Product {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self::new(self.arity))
    }
}

// =============================================================================
// Compare
// =============================================================================

/// A comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal by the cross-type "same" rule.
    Eq,
    /// Not equal by the cross-type "same" rule.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

impl CompareOp {
    /// Applies the operator.
    #[must_use]
    pub fn apply(self, a: &Value, b: &Value) -> bool {
        match self {
            Self::Eq => a.same(b),
            Self::Ne => !a.same(b),
            Self::Lt => a.compare(b) == Ordering::Less,
            Self::Le => a.compare(b) != Ordering::Greater,
            Self::Gt => a.compare(b) == Ordering::Greater,
            Self::Ge => a.compare(b) != Ordering::Less,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        })
    }
}

/// Compares two scalars, producing a boolean. Both sides are causes.
#[derive(Clone, Debug)]
pub struct Compare {
    subject: SubjectId,
    op: CompareOp,
}

impl Compare {
    /// Creates a comparison.
    #[must_use]
    pub fn new(op: CompareOp) -> Self {
        Self {
            subject: SubjectId::fresh(),
            op,
        }
    }

    /// Returns the operator.
    #[must_use]
    pub fn op(&self) -> CompareOp {
        self.op
    }
}

impl Evaluable for Compare {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Compare"
    }

    fn input_arity(&self) -> usize {
        2
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let a = scalar_input(self, inputs, 0)?;
        let b = scalar_input(self, inputs, 1)?;
        let result = self.op.apply(a, b);
        debug!(operator = "Compare", op = %self.op, result, "evaluated");
        Ok(Evaluation::single(Value::Bool(result), Trace::Direct))
    }
}

impl Explainable for Compare {
    fn explain(&self, _run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        explain_all_inputs(self, part, factory)
    }
}

impl Function for Compare {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self::new(self.op))
    }
}

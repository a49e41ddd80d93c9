//! Sort: stable row ordering by key columns.

use std::cmp::Ordering;

use tracing::debug;

use gridtrace_foundation::{Datum, Error, Grid, Result, Value};
use gridtrace_function::{
    Evaluable, Evaluation, Origins, RowTrace, Source, Trace, check_arity, grid_input,
};
use gridtrace_part::SubjectId;

/// Order of one sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Reorders rows by one or more key columns.
///
/// Keys are compared with the cross-type [`Value::compare`]; ties fall
/// through to the next key, then to the original order. Without keys,
/// rows compare column by column, ascending.
///
/// ```
/// use gridtrace_reshape::{Direction, Sort};
///
/// let sort = Sort::new().by(0, Direction::Descending).exclude_first();
/// assert!(sort.excludes_first());
/// ```
#[derive(Clone, Debug)]
pub struct Sort {
    subject: SubjectId,
    keys: Vec<(usize, Direction)>,
    exclude_first: bool,
}

impl Sort {
    /// Creates a sort with no keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: SubjectId::fresh(),
            keys: Vec::new(),
            exclude_first: false,
        }
    }

    /// Adds a key column. Earlier keys take precedence.
    #[must_use]
    pub fn by(mut self, column: usize, direction: Direction) -> Self {
        self.keys.push((column, direction));
        self
    }

    /// Keeps the first (label) row in place.
    #[must_use]
    pub fn exclude_first(mut self) -> Self {
        self.exclude_first = true;
        self
    }

    /// Returns true if the first row is kept in place.
    #[must_use]
    pub fn excludes_first(&self) -> bool {
        self.exclude_first
    }

    fn compare_rows(&self, input: &Grid, a: usize, b: usize) -> Ordering {
        let cell = |column: usize, row: usize| input.try_get(column, row).unwrap_or(&Value::Nil);
        if self.keys.is_empty() {
            return (0..input.width())
                .map(|column| cell(column, a).compare(cell(column, b)))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal);
        }
        self.keys
            .iter()
            .map(|&(column, direction)| direction.apply(cell(column, a).compare(cell(column, b))))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluable for Sort {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Sort"
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
        if let Some(&(column, _)) = self.keys.iter().find(|(c, _)| *c >= input.width()) {
            return Err(Error::configuration(format!(
                "sort key column {column} is outside a grid of width {}",
                input.width()
            ))
            .in_operation("Sort"));
        }

        let first = usize::from(self.exclude_first).min(input.height());
        let mut order: Vec<usize> = (first..input.height()).collect();
        order.sort_by(|&a, &b| self.compare_rows(input, a, b));

        let mut rows: Vec<Vec<Value>> = (0..first).map(|r| input.row_values(r)).collect();
        let mut trace = RowTrace::new((0..input.width()).collect());
        trace
            .rows
            .extend((0..first).map(|r| Origins::single(Source::Row { input: 0, row: r })));
        for &source in &order {
            rows.push(input.row_values(source));
            trace
                .rows
                .push(Origins::single(Source::Row { input: 0, row: source }));
        }

        let output = if rows.is_empty() {
            Grid::new(input.width(), 0)
        } else {
            Grid::from_rows(rows)
        };
        debug!(
            operator = "Sort",
            keys = self.keys.len(),
            rows = output.height(),
            "evaluated"
        );
        Ok(Evaluation::single(output, Trace::Rows(trace)))
    }
}

gridtrace_function::traced_function!(Sort);

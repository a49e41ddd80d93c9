//! GetFrequencies: two-dimensional binning of (x, y) pairs.

use gridtrace_foundation::{Datum, Error, Grid, Result, Type, Value};
use gridtrace_function::{Evaluable, Evaluation, OriginGrid, Origins, Source, check_arity};
use gridtrace_part::SubjectId;

use crate::support::finish;

/// Equal-width buckets over the closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bins {
    /// Lower bound of the first bucket.
    pub min: f64,
    /// Upper bound of the last bucket (inclusive).
    pub max: f64,
    /// Number of buckets.
    pub count: usize,
}

impl Bins {
    /// Creates `count` buckets over `[min, max]`.
    #[must_use]
    pub const fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    fn is_valid(&self) -> bool {
        self.count > 0 && self.min < self.max
    }

    fn check(&self) -> Result<()> {
        if !self.is_valid() {
            return Err(Error::configuration(format!(
                "cannot bin [{}, {}] into {} buckets",
                self.min, self.max, self.count
            )));
        }
        Ok(())
    }

    /// Returns the bucket of `v`, or `None` if it lies outside the range
    /// or the bins are empty. The upper bound belongs to the last bucket.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bucket(&self, v: f64) -> Option<usize> {
        if !self.is_valid() || v.is_nan() || v < self.min || v > self.max {
            return None;
        }
        let scaled = ((v - self.min) / (self.max - self.min) * self.count as f64).floor();
        Some((scaled as usize).min(self.count - 1))
    }

    /// Returns the lower bound of bucket `i`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn lower_bound(&self, i: usize) -> f64 {
        self.min + (self.max - self.min) * i as f64 / self.count as f64
    }
}

/// Counts (x, y) pairs into a two-dimensional histogram.
///
/// The input is a list of `[x, y]` or `[x, y, increment]` lists. The output
/// has one row per y bucket and one column per x bucket, plus a first row
/// of x lower bounds and a first column of y lower bounds. Each count
/// explains as the conjunction of the list entries that fell into it;
/// pairs outside either range are ignored.
#[derive(Clone, Debug)]
pub struct GetFrequencies {
    subject: SubjectId,
    x: Bins,
    y: Bins,
}

impl GetFrequencies {
    /// Creates a binning over the given x and y buckets.
    #[must_use]
    pub fn new(x: Bins, y: Bins) -> Self {
        Self {
            subject: SubjectId::fresh(),
            x,
            y,
        }
    }

    /// Returns the x buckets.
    #[must_use]
    pub fn x_bins(&self) -> Bins {
        self.x
    }

    /// Returns the y buckets.
    #[must_use]
    pub fn y_bins(&self) -> Bins {
        self.y
    }
}

/// Reads one `[x, y]` or `[x, y, increment]` entry.
fn entry(datum: &Datum) -> Result<(f64, f64, Value)> {
    let items = datum.as_list()?;
    if !(2..=3).contains(&items.len()) {
        return Err(Error::arity_mismatch(2, items.len()));
    }
    let number = |d: &Datum| -> Result<f64> {
        let v = d.as_scalar()?;
        v.as_number()
            .ok_or_else(|| Error::type_mismatch(Type::Number, v.value_type()))
    };
    let increment = match items.get(2) {
        Some(d) => d.as_scalar()?.clone(),
        None => Value::Int(1),
    };
    Ok((number(&items[0])?, number(&items[1])?, increment))
}

impl Evaluable for GetFrequencies {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "GetFrequencies"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let in_op = |e: Error| e.in_operation("GetFrequencies");
        self.x.check().map_err(in_op)?;
        self.y.check().map_err(in_op)?;
        let pairs = inputs[0].as_list().map_err(in_op)?;

        let width = self.x.count + 1;
        let height = self.y.count + 1;
        let mut output = Grid::new(width, height);
        let mut origins = OriginGrid::from_fn(width, height, |_, _| Origins::Intrinsic);
        for i in 0..self.x.count {
            output.set(i + 1, 0, Value::number(self.x.lower_bound(i)))?;
        }
        for j in 0..self.y.count {
            output.set(0, j + 1, Value::number(self.y.lower_bound(j)))?;
        }
        for column in 1..width {
            for row in 1..height {
                output.set(column, row, Value::Int(0))?;
            }
        }

        for (index, datum) in pairs.iter().enumerate() {
            let (x, y, increment) = entry(datum).map_err(in_op)?;
            let (Some(bx), Some(by)) = (self.x.bucket(x), self.y.bucket(y)) else {
                continue;
            };
            let (column, row) = (bx + 1, by + 1);
            let count = output.get(column, row)?.plus(&increment).map_err(in_op)?;
            output.set(column, row, count)?;
            if let Some(cell) = origins.get_mut(column, row) {
                cell.push(Source::Index { input: 0, index });
            }
        }
        Ok(finish("GetFrequencies", output, origins))
    }
}

gridtrace_function::traced_function!(GetFrequencies);

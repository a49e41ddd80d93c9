//! Relation signatures: the label row plus per-column types.

use std::fmt;

use gridtrace_foundation::{Error, Grid, Result, Type, Value};

/// The shape a grid must have to take part in a relational operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    labels: Vec<Value>,
    types: Vec<Type>,
}

impl Signature {
    /// Reads the signature of a grid: its first row, and for each column
    /// the type its data cells share.
    ///
    /// A column with no data has type nil; ints and floats share
    /// `Number`; any other mix is `Scalar`.
    #[must_use]
    pub fn of(grid: &Grid) -> Self {
        let labels = grid.row_values(0);
        let types = (0..grid.width())
            .map(|column| {
                (1..grid.height())
                    .filter_map(|row| grid.try_get(column, row))
                    .map(Value::value_type)
                    .fold(Type::Nil, unify)
            })
            .collect();
        Self { labels, types }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.labels.len()
    }

    /// Returns the labels.
    #[must_use]
    pub fn labels(&self) -> &[Value] {
        &self.labels
    }

    /// Returns the column types.
    #[must_use]
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Checks that `other` describes the same relation.
    ///
    /// # Errors
    ///
    /// Returns `IncompatibleSignature` if the widths, labels, or column
    /// types disagree.
    pub fn check(&self, other: &Signature) -> Result<()> {
        match self.mismatch(other) {
            Some(message) => Err(Error::incompatible_signature(message)),
            None => Ok(()),
        }
    }

    fn mismatch(&self, other: &Signature) -> Option<String> {
        if self.width() != other.width() {
            return Some(format!(
                "width {} against width {}",
                self.width(),
                other.width()
            ));
        }
        let labels = self.labels.iter().zip(&other.labels).enumerate();
        if let Some((column, (a, b))) = labels.into_iter().find(|(_, (a, b))| !a.same(b)) {
            return Some(format!("column {column} is labelled '{a}' and '{b}'"));
        }
        let types = self.types.iter().zip(&other.types).enumerate();
        if let Some((column, (a, b))) = types.into_iter().find(|(_, (a, b))| !compatible(**a, **b)) {
            return Some(format!("column {column} holds {a} and {b}"));
        }
        None
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (label, ty)) in self.labels.iter().zip(&self.types).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{label}: {ty}")?;
        }
        write!(f, ")")
    }
}

fn unify(acc: Type, next: Type) -> Type {
    match (acc, next) {
        (Type::Nil, t) | (t, Type::Nil) => t,
        (a, b) if a == b => a,
        (a, b) if a.is_numeric() && b.is_numeric() => Type::Number,
        _ => Type::Scalar,
    }
}

fn compatible(a: Type, b: Type) -> bool {
    a == Type::Scalar || b == Type::Scalar || a.compatible_with(b)
}

/// Checks that every grid has a label row and the signature of the first,
/// and returns that signature.
///
/// # Errors
///
/// Returns `IncompatibleSignature` naming the first offending input.
pub fn common_signature(grids: &[&Grid]) -> Result<Signature> {
    if let Some(i) = grids.iter().position(|grid| grid.height() == 0) {
        return Err(Error::incompatible_signature(format!(
            "input {i} has no label row"
        )));
    }
    let Some((first, rest)) = grids.split_first() else {
        return Err(Error::incompatible_signature("no inputs"));
    };
    let signature = Signature::of(first);
    for (i, grid) in rest.iter().enumerate() {
        if let Some(message) = signature.mismatch(&Signature::of(grid)) {
            return Err(Error::incompatible_signature(format!(
                "input {}: {message}",
                i + 1
            )));
        }
    }
    Ok(signature)
}

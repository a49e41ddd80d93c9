//! Data passed between transformations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::grid::Grid;
use crate::types::Type;
use crate::value::Value;

/// Anything a transformation can take as input or produce as output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Datum {
    /// A single scalar value.
    Scalar(Value),
    /// A grid of scalars.
    Grid(Grid),
    /// An ordered list of data.
    List(Vec<Datum>),
    /// A drawn chart.
    Figure(Figure),
}

impl Datum {
    /// Returns the shape of this datum.
    #[must_use]
    pub fn datum_type(&self) -> Type {
        match self {
            Self::Scalar(v) => v.value_type(),
            Self::Grid(_) => Type::Grid,
            Self::List(_) => Type::List,
            Self::Figure(_) => Type::Figure,
        }
    }

    /// Builds a list of two-element lists from (x, y) pairs.
    #[must_use]
    pub fn pairs<X, Y>(pairs: impl IntoIterator<Item = (X, Y)>) -> Self
    where
        X: Into<Value>,
        Y: Into<Value>,
    {
        Self::List(
            pairs
                .into_iter()
                .map(|(x, y)| Self::List(vec![Self::Scalar(x.into()), Self::Scalar(y.into())]))
                .collect(),
        )
    }

    /// Returns the grid, or a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if this datum is not a grid.
    pub fn as_grid(&self) -> Result<&Grid> {
        match self {
            Self::Grid(g) => Ok(g),
            other => Err(Error::type_mismatch(Type::Grid, other.datum_type())),
        }
    }

    /// Returns the scalar, or a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if this datum is not a scalar.
    pub fn as_scalar(&self) -> Result<&Value> {
        match self {
            Self::Scalar(v) => Ok(v),
            other => Err(Error::type_mismatch(Type::Scalar, other.datum_type())),
        }
    }

    /// Returns the list items, or a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if this datum is not a list.
    pub fn as_list(&self) -> Result<&[Datum]> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(Error::type_mismatch(Type::List, other.datum_type())),
        }
    }

    /// Returns the figure, or a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if this datum is not a figure.
    pub fn as_figure(&self) -> Result<&Figure> {
        match self {
            Self::Figure(f) => Ok(f),
            other => Err(Error::type_mismatch(Type::Figure, other.datum_type())),
        }
    }
}

impl From<Grid> for Datum {
    fn from(g: Grid) -> Self {
        Self::Grid(g)
    }
}

impl From<Value> for Datum {
    fn from(v: Value) -> Self {
        Self::Scalar(v)
    }
}

impl From<Figure> for Datum {
    fn from(f: Figure) -> Self {
        Self::Figure(f)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Grid(g) => write!(f, "{g}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Figure(fig) => write!(f, "<{}>", fig.kind()),
        }
    }
}

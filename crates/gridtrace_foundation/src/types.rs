//! Type descriptors for values and data shapes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type descriptor for scalar values and the data shapes transformations consume.
///
/// Used to report type mismatches and to build relational signatures.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The absent type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Text.
    String,
    /// A magnitude with a unit of measure.
    Quantity,
    /// Any numeric scalar (int or float).
    Number,
    /// Any scalar value.
    Scalar,
    /// A rectangular grid of scalars.
    Grid,
    /// An ordered list of data.
    List,
    /// A drawable figure.
    Figure,
    /// Any type (accepts any value).
    Any,
}

impl Type {
    /// Returns true if this type is a scalar type.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Nil
                | Self::Bool
                | Self::Int
                | Self::Float
                | Self::String
                | Self::Quantity
                | Self::Number
                | Self::Scalar
        )
    }

    /// Returns true if this type is numeric.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Number)
    }

    /// Checks if a value of type `actual` is accepted where `self` is expected.
    ///
    /// - `Any` accepts everything
    /// - `Scalar` accepts every scalar type
    /// - `Number` accepts ints and floats
    /// - `Float` accepts ints (numeric promotion)
    #[must_use]
    pub fn accepts(self, actual: Type) -> bool {
        match (self, actual) {
            (Self::Any, _) => true,
            (Self::Scalar, t) => t.is_scalar(),
            (Self::Number, t) => t.is_numeric(),
            (Self::Float, Self::Int) => true,
            (expected, actual) => expected == actual,
        }
    }

    /// Checks whether two column types can live in the same relational column.
    ///
    /// Nil is compatible with anything (an empty column has no type yet),
    /// and numeric types are compatible with each other.
    #[must_use]
    pub fn compatible_with(self, other: Type) -> bool {
        match (self, other) {
            (Self::Nil, _) | (_, Self::Nil) => true,
            (a, b) if a.is_numeric() && b.is_numeric() => true,
            (a, b) => a == b,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Quantity => "quantity",
            Self::Number => "number",
            Self::Scalar => "scalar",
            Self::Grid => "grid",
            Self::List => "list",
            Self::Figure => "figure",
            Self::Any => "any",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

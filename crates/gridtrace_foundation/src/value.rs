//! Scalar value type stored in grid cells.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Type;
use crate::unit::Quantity;

/// Dynamically-typed scalar stored in a grid cell.
///
/// Values are immutable and cheaply cloneable. Structural equality
/// (`PartialEq`) distinguishes `Int(1)` from `Float(1.0)`; the relational and
/// sorting operators use [`Value::same`] and [`Value::compare`] instead, which
/// treat numbers by value regardless of representation.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// The absent value (an empty cell).
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Text value.
    String(Arc<str>),
    /// Magnitude with a unit of measure.
    Quantity(Quantity),
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Nil => Type::Nil,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::String,
            Self::Quantity(_) => Type::Quantity,
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns true if this value is an int or a float.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    ///
    /// Note: Converting large i64 values to f64 may lose precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a quantity reference.
    #[must_use]
    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Self::Quantity(q) => Some(q),
            _ => None,
        }
    }

    /// Builds the most compact numeric value for `n`: an int when `n` is
    /// integral and in range, a float otherwise.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
            Self::Int(n as i64)
        } else {
            Self::Float(n)
        }
    }

    /// Cross-type equality: numbers are compared by value regardless of
    /// representation, quantities by their magnitude in base units.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Quantity(a), Self::Quantity(b)) => {
                a.unit.dimension() == b.unit.dimension()
                    && base_magnitude(a) == base_magnitude(b)
            }
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x == y || (x.is_nan() && y.is_nan()),
                _ => false,
            },
        }
    }

    /// Hashes this value consistently with [`Value::same`].
    ///
    /// Ints beyond the exact range of `f64` hash like the float they round
    /// to, so distinct huge ints may collide.
    #[allow(clippy::cast_precision_loss)]
    pub fn hash_same<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Nil => 0u8.hash(state),
            Self::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            Self::Int(n) => {
                2u8.hash(state);
                hash_float(*n as f64, state);
            }
            Self::Float(f) => {
                2u8.hash(state);
                hash_float(*f, state);
            }
            Self::String(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            Self::Quantity(q) => {
                4u8.hash(state);
                q.unit.dimension().hash(state);
                hash_float(base_magnitude(q), state);
            }
        }
    }

    /// Total cross-type ordering used by sorting.
    ///
    /// Values of different kinds order as nil < bool < number < quantity < text.
    /// Numbers compare by value; NaN sorts after every other number.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Quantity(a), Self::Quantity(b)) => {
                match a.unit.dimension().cmp(&b.unit.dimension()) {
                    Ordering::Equal => base_magnitude(a).total_cmp(&base_magnitude(b)),
                    ord => ord,
                }
            }
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.kind_rank().cmp(&b.kind_rank()),
            },
        }
    }

    /// Adds two values. Nil is the identity; ints stay ints unless they
    /// overflow; quantities are converted to the left operand's unit.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for non-numeric operands and `UnitMismatch`
    /// for quantities of different dimensions.
    #[allow(clippy::cast_precision_loss)]
    pub fn plus(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Nil, v) | (v, Self::Nil) => numeric_or_nil(v).cloned(),
            (Self::Int(a), Self::Int(b)) => Ok(a
                .checked_add(*b)
                .map_or_else(|| Self::Float(*a as f64 + *b as f64), Self::Int)),
            (Self::Quantity(a), Self::Quantity(b)) => {
                let b = b.convert_to(&a.unit)?;
                Ok(Self::Quantity(Quantity::new(
                    a.magnitude + b.magnitude,
                    a.unit.clone(),
                )))
            }
            (a, b) => Ok(Self::number(numeric(a)? + numeric(b)?)),
        }
    }

    /// Multiplies two numeric values. Nil is the identity.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if either operand is not a number.
    #[allow(clippy::cast_precision_loss)]
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Nil, v) | (v, Self::Nil) => numeric_or_nil(v).cloned(),
            (Self::Int(a), Self::Int(b)) => Ok(a
                .checked_mul(*b)
                .map_or_else(|| Self::Float(*a as f64 * *b as f64), Self::Int)),
            (a, b) => Ok(Self::number(numeric(a)? * numeric(b)?)),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Nil => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Quantity(_) => 3,
            Self::String(_) => 4,
        }
    }
}

fn numeric(v: &Value) -> Result<f64> {
    v.as_number()
        .ok_or_else(|| Error::type_mismatch(Type::Number, v.value_type()))
}

fn numeric_or_nil(v: &Value) -> Result<&Value> {
    match v {
        Value::Nil | Value::Int(_) | Value::Float(_) | Value::Quantity(_) => Ok(v),
        other => Err(Error::type_mismatch(Type::Number, other.value_type())),
    }
}

fn base_magnitude(q: &Quantity) -> f64 {
    q.magnitude * q.unit.factor()
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn hash_float<H: Hasher>(f: f64, state: &mut H) {
    // Integral floats hash like the equal int so that `same` values collide.
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        (f as i64).hash(state);
    } else if f.is_nan() {
        u64::MAX.hash(state);
    } else {
        f.to_bits().hash(state);
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Quantity(a), Self::Quantity(b)) => {
                a.unit == b.unit && a.magnitude.to_bits() == b.magnitude.to_bits()
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::Quantity(q) => {
                q.unit.hash(state);
                q.magnitude.to_bits().hash(state);
            }
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Quantity(q) => write!(f, "{q}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Quantity(q) => write!(f, "{q}"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Self::Quantity(q)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}

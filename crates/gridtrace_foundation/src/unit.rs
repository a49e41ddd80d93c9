//! Units of measure for dimensioned values.
//!
//! Only what header normalization needs: a unit knows its dimension and its
//! scale relative to the base unit of that dimension.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Physical dimension of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimension {
    /// Length (base: metre).
    Length,
    /// Mass (base: gram).
    Mass,
    /// Time (base: second).
    Time,
    /// Volume (base: litre).
    Volume,
    /// Digital storage (base: byte).
    Storage,
}

/// A unit of measure.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    name: Arc<str>,
    dimension: Dimension,
    factor: f64,
}

const KNOWN_UNITS: &[(&str, Dimension, f64)] = &[
    ("mm", Dimension::Length, 0.001),
    ("cm", Dimension::Length, 0.01),
    ("m", Dimension::Length, 1.0),
    ("km", Dimension::Length, 1000.0),
    ("mg", Dimension::Mass, 0.001),
    ("g", Dimension::Mass, 1.0),
    ("kg", Dimension::Mass, 1000.0),
    ("ms", Dimension::Time, 0.001),
    ("s", Dimension::Time, 1.0),
    ("min", Dimension::Time, 60.0),
    ("h", Dimension::Time, 3600.0),
    ("ml", Dimension::Volume, 0.001),
    ("l", Dimension::Volume, 1.0),
    ("B", Dimension::Storage, 1.0),
    ("kB", Dimension::Storage, 1000.0),
    ("MB", Dimension::Storage, 1_000_000.0),
];

impl Unit {
    /// Creates a unit with an explicit scale relative to its dimension's base unit.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, dimension: Dimension, factor: f64) -> Self {
        Self {
            name: name.into(),
            dimension,
            factor,
        }
    }

    /// Looks up one of the built-in units by its symbol.
    #[must_use]
    pub fn lookup(symbol: &str) -> Option<Self> {
        KNOWN_UNITS
            .iter()
            .find(|(name, _, _)| *name == symbol)
            .map(|&(name, dimension, factor)| Self::new(name, dimension, factor))
    }

    /// Returns the unit symbol.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit's dimension.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Returns the unit's scale relative to the base unit.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.dimension == other.dimension
    }
}

impl Eq for Unit {}

impl std::hash::Hash for Unit {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.dimension.hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A magnitude expressed in some unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quantity {
    /// The numeric magnitude.
    pub magnitude: f64,
    /// The unit of the magnitude.
    pub unit: Unit,
}

impl Quantity {
    /// Creates a new quantity.
    #[must_use]
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// Converts this quantity to another unit of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns `UnitMismatch` if the dimensions differ.
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity> {
        if self.unit.dimension != target.dimension {
            return Err(Error::unit_mismatch(self.unit.name(), target.name()));
        }
        let magnitude = self.magnitude * self.unit.factor / target.factor;
        Ok(Quantity::new(magnitude, target.clone()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

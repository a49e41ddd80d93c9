//! Hash keys that compare values with the cross-type "same" rule.

use std::hash::{Hash, Hasher};

use crate::value::Value;

/// A row of values usable as a hash key under [`Value::same`] equality.
///
/// Two keys are equal when their values are pairwise "same", so a row of
/// `Int(1)` and a row of `Float(1.0)` land in the same bucket.
#[derive(Clone, Debug)]
pub struct SameKey(pub Vec<Value>);

impl SameKey {
    /// Builds a key from the given values.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self(values.into_iter().collect())
    }

    /// Returns the values in the key.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl PartialEq for SameKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a.same(b))
    }
}

impl Eq for SameKey {}

impl Hash for SameKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for value in &self.0 {
            value.hash_same(state);
        }
    }
}

//! Hashed row index under "same" equality.
//!
//! Relational operators must detect rows that are content-equal by the
//! cross-type "same" rule while keeping first-seen order. The index maps a
//! row key to the slot (output row) it was first assigned.

use std::collections::HashMap;

use gridtrace_foundation::{Grid, SameKey, Value};

/// First-seen slots of row keys.
#[derive(Clone, Debug, Default)]
pub struct RowIndex {
    slots: HashMap<SameKey, usize>,
}

impl RowIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` at `slot` unless it is already present.
    ///
    /// Returns the slot the key is recorded at and whether it was new.
    pub fn insert(&mut self, key: SameKey, slot: usize) -> (usize, bool) {
        match self.slots.get(&key) {
            Some(&existing) => (existing, false),
            None => {
                self.slots.insert(key, slot);
                (slot, true)
            }
        }
    }

    /// Returns the slot of `key`, if recorded.
    #[must_use]
    pub fn get(&self, key: &SameKey) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no key has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Indexes the data rows (row 1 onwards) of `grid` by `columns`,
    /// keeping the first row of each key.
    #[must_use]
    pub fn of_rows(grid: &Grid, columns: &[usize]) -> Self {
        let mut index = Self::new();
        for row in 1..grid.height() {
            index.insert(row_key(grid, row, columns), row);
        }
        index
    }
}

/// The key of `row` restricted to `columns`.
#[must_use]
pub fn row_key(grid: &Grid, row: usize, columns: &[usize]) -> SameKey {
    SameKey::new(
        columns
            .iter()
            .map(|&column| grid.try_get(column, row).cloned().unwrap_or(Value::Nil)),
    )
}

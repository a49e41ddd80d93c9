//! Fixed-dimension two-dimensional grid of scalar values.
//!
//! Cells are stored row-major in a persistent vector, so cloning a grid is
//! O(1) and operators that "modify in place" can work on a private copy
//! without touching the caller's grid.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell_name::CellName;
use crate::error::{Error, Result};
use crate::value::Value;

/// A rectangular grid of values addressed by zero-based (column, row).
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    width: usize,
    height: usize,
    cells: im::Vector<Value>,
}

impl Grid {
    /// Creates a grid of the given size filled with nil.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: std::iter::repeat_n(Value::Nil, width * height).collect(),
        }
    }

    /// Creates a grid from rows; short rows are right-padded with nil.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = im::Vector::new();
        for row in rows {
            let len = row.len();
            cells.extend(row);
            cells.extend(std::iter::repeat_n(Value::Nil, width - len));
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if (column, row) lies inside the grid.
    #[must_use]
    pub fn contains(&self, column: usize, row: usize) -> bool {
        column < self.width && row < self.height
    }

    /// Gets the value of a cell, or `None` outside the grid.
    #[must_use]
    pub fn try_get(&self, column: usize, row: usize) -> Option<&Value> {
        if self.contains(column, row) {
            self.cells.get(row * self.width + column)
        } else {
            None
        }
    }

    /// Gets the value of a cell.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the cell lies outside the grid.
    pub fn get(&self, column: usize, row: usize) -> Result<&Value> {
        self.try_get(column, row)
            .ok_or_else(|| Error::out_of_bounds(column, row, self.width, self.height))
    }

    /// Gets the value of a cell by spreadsheet name (e.g. `"B3"`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidCellName` for a malformed name and `OutOfBounds` if the
    /// cell lies outside the grid.
    pub fn get_named(&self, name: &str) -> Result<&Value> {
        let cell = CellName::parse(name)?;
        self.get(cell.column, cell.row)
    }

    /// Sets the value of a cell.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the cell lies outside the grid.
    pub fn set(&mut self, column: usize, row: usize, value: impl Into<Value>) -> Result<()> {
        if !self.contains(column, row) {
            return Err(Error::out_of_bounds(column, row, self.width, self.height));
        }
        self.cells.set(row * self.width + column, value.into());
        Ok(())
    }

    /// Returns an iterator over the values of a row (empty past the last row).
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Value> {
        let (start, end) = if row < self.height {
            (row * self.width, (row + 1) * self.width)
        } else {
            (0, 0)
        };
        self.cells.iter().skip(start).take(end - start)
    }

    /// Returns a copy of the values of a row.
    #[must_use]
    pub fn row_values(&self, row: usize) -> Vec<Value> {
        self.row(row).cloned().collect()
    }

    /// Returns the values of a column.
    #[must_use]
    pub fn column_values(&self, column: usize) -> Vec<Value> {
        (0..self.height)
            .filter_map(|row| self.try_get(column, row).cloned())
            .collect()
    }

    /// Returns the index of the column whose first-row label displays as `label`.
    #[must_use]
    pub fn column_of(&self, label: &str) -> Option<usize> {
        (0..self.width).find(|&column| {
            self.try_get(column, 0)
                .is_some_and(|value| value.to_string() == label)
        })
    }

    /// Returns the grid's rows as vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        (0..self.height).map(|row| self.row_values(row)).collect()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.height).map(|row| self.row_values(row)))
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for (column, value) in self.row(row).enumerate() {
                if column > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds a [`Grid`] from row literals.
///
/// ```
/// use gridtrace_foundation::{grid, Value};
///
/// let g = grid![["A", "B"], [3, Value::Nil]];
/// assert_eq!(g.width(), 2);
/// assert_eq!(g.height(), 2);
/// ```
#[macro_export]
macro_rules! grid {
    ($([$($cell:expr),* $(,)?]),* $(,)?) => {
        $crate::Grid::from_rows(vec![$(vec![$($crate::Value::from($cell)),*]),*])
    };
}

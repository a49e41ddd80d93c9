//! Spreadsheet-style cell names (`A1`, `AB12`, ...).
//!
//! Column letters form a bijective base-26 numeral: `A`..`Z` are the digits
//! 1..26, and the zero-based column index is the numeral's value minus one
//! (`Z` = 25, `AA` = 26, `ABF` = 733). Row numbers are 1-based in text and
//! 0-based internally.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed cell name: zero-based column and row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellName {
    /// Zero-based column index.
    pub column: usize,
    /// Zero-based row index.
    pub row: usize,
}

impl CellName {
    /// Creates a cell name from zero-based coordinates.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Parses a name such as `"B3"` or `"ABF12"` (letters are case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `InvalidCellName` if the text is not letters followed by a
    /// positive row number.
    pub fn parse(name: &str) -> Result<Self> {
        let split = name
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(|| Error::invalid_cell_name(name))?;
        let (letters, digits) = name.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_cell_name(name));
        }
        let column = column_index(letters).ok_or_else(|| Error::invalid_cell_name(name))?;
        let row: usize = digits.parse().map_err(|_| Error::invalid_cell_name(name))?;
        if row == 0 {
            return Err(Error::invalid_cell_name(name));
        }
        Ok(Self::new(column, row - 1))
    }
}

impl FromStr for CellName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.column), self.row + 1)
    }
}

/// Converts column letters to a zero-based column index.
///
/// Returns `None` for an empty string, a non-letter, or an index that does
/// not fit in `usize`.
#[must_use]
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut value: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }
    Some(value - 1)
}

/// Converts a zero-based column index to column letters.
#[must_use]
pub fn column_letters(column: usize) -> String {
    let mut n = column + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + u8::try_from(rem).unwrap_or(0));
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

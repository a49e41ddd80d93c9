//! Rectangular copy and paste.

use gridtrace_foundation::{CellName, Datum, Error, Grid, Result, Value};
use gridtrace_function::{
    Evaluable, Evaluation, OriginGrid, Origins, Source, check_arity, grid_input,
};
use gridtrace_part::SubjectId;

use crate::support::finish;

// =============================================================================
// CopyFrom
// =============================================================================

/// Extracts the rectangle between two corners (both inclusive).
///
/// Cells of the rectangle that fall outside the input are nil and have no
/// origin.
#[derive(Clone, Debug)]
pub struct CopyFrom {
    subject: SubjectId,
    top_left: (usize, usize),
    bottom_right: (usize, usize),
}

impl CopyFrom {
    /// Creates a copy of the rectangle spanned by the (column, row) corners.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if `bottom_right` lies above or left of
    /// `top_left`.
    pub fn new(top_left: (usize, usize), bottom_right: (usize, usize)) -> Result<Self> {
        if bottom_right.0 < top_left.0 || bottom_right.1 < top_left.1 {
            return Err(Error::configuration(format!(
                "CopyFrom corner {} lies before {}",
                CellName::new(bottom_right.0, bottom_right.1),
                CellName::new(top_left.0, top_left.1)
            )));
        }
        Ok(Self {
            subject: SubjectId::fresh(),
            top_left,
            bottom_right,
        })
    }

    /// Creates a copy of a rectangle given by spreadsheet names, e.g.
    /// `CopyFrom::named("B2", "C4")`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCellName` for malformed names and `Configuration`
    /// for inverted corners.
    pub fn named(top_left: &str, bottom_right: &str) -> Result<Self> {
        let tl = CellName::parse(top_left)?;
        let br = CellName::parse(bottom_right)?;
        Self::new((tl.column, tl.row), (br.column, br.row))
    }

    /// Returns the size of the copied rectangle.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (
            self.bottom_right.0 - self.top_left.0 + 1,
            self.bottom_right.1 - self.top_left.1 + 1,
        )
    }
}

impl Evaluable for CopyFrom {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "CopyFrom"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let input = grid_input(self, inputs, 0)?;
        let (width, height) = self.dimensions();
        let (left, top) = self.top_left;

        let mut output = Grid::new(width, height);
        let mut origins = OriginGrid::new(width, height);
        for row in 0..height {
            for column in 0..width {
                if let Some(value) = input.try_get(left + column, top + row) {
                    output.set(column, row, value.clone())?;
                    origins.set(
                        column,
                        row,
                        Origins::single(Source::cell(0, left + column, top + row)),
                    );
                }
            }
        }
        Ok(finish("CopyFrom", output, origins))
    }
}

gridtrace_function::traced_function!(CopyFrom);

// =============================================================================
// PasteAt
// =============================================================================

/// Overlays input 1 onto input 0 with its top-left corner at a fixed cell,
/// enlarging the result as needed.
///
/// Covered cells come from the pasted grid, the rest from the base grid;
/// cells added by enlarging that neither grid covers are nil with no
/// origin.
#[derive(Clone, Debug)]
pub struct PasteAt {
    subject: SubjectId,
    column: usize,
    row: usize,
}

impl PasteAt {
    /// Pastes with the top-left corner at (column, row).
    #[must_use]
    pub fn new(column: usize, row: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            column,
            row,
        }
    }

    /// Pastes with the top-left corner at a named cell.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCellName` if `name` is malformed.
    pub fn named(name: &str) -> Result<Self> {
        let cell = CellName::parse(name)?;
        Ok(Self::new(cell.column, cell.row))
    }
}

impl Evaluable for PasteAt {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "PasteAt"
    }

    fn input_arity(&self) -> usize {
        2
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let base = grid_input(self, inputs, 0)?;
        let pasted = grid_input(self, inputs, 1)?;
        let width = base.width().max(self.column + pasted.width());
        let height = base.height().max(self.row + pasted.height());

        let mut output = Grid::new(width, height);
        let mut origins = OriginGrid::new(width, height);
        for row in 0..height {
            for column in 0..width {
                let covering = column
                    .checked_sub(self.column)
                    .zip(row.checked_sub(self.row))
                    .filter(|&(c, r)| pasted.contains(c, r));
                let (value, source): (&Value, Source) = match covering {
                    Some((c, r)) => (pasted.get(c, r)?, Source::cell(1, c, r)),
                    None => match base.try_get(column, row) {
                        Some(value) => (value, Source::cell(0, column, row)),
                        None => continue,
                    },
                };
                output.set(column, row, value.clone())?;
                origins.set(column, row, Origins::single(source));
            }
        }
        Ok(finish("PasteAt", output, origins))
    }
}

gridtrace_function::traced_function!(PasteAt);

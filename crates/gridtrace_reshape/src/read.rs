//! ReadGrid: text to grid, remembering where each cell was read.

use gridtrace_foundation::{Datum, Error, ReadOptions, Result, Type, read_grid};
use gridtrace_function::{
    Evaluable, Evaluation, OriginGrid, Origins, Source, check_arity, scalar_input,
};
use gridtrace_part::SubjectId;

use crate::support::finish;

/// Parses its text input into a grid.
///
/// Every cell explains to the character span of the input it was scanned
/// from; a character range of a cell maps to the same range within that
/// span.
#[derive(Clone, Debug)]
pub struct ReadGrid {
    subject: SubjectId,
    options: ReadOptions,
}

impl ReadGrid {
    /// Creates a reader with the given options.
    #[must_use]
    pub fn new(options: ReadOptions) -> Self {
        Self {
            subject: SubjectId::fresh(),
            options,
        }
    }

    /// Returns the reader's options.
    #[must_use]
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }
}

impl Default for ReadGrid {
    fn default() -> Self {
        Self::new(ReadOptions::default())
    }
}

impl Evaluable for ReadGrid {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "ReadGrid"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let value = scalar_input(self, inputs, 0)?;
        let text = value.as_str().ok_or_else(|| {
            Error::type_mismatch(Type::String, value.value_type()).in_operation("ReadGrid")
        })?;

        let scan = read_grid(text, &self.options);
        let origins = OriginGrid::from_fn(scan.grid.width(), scan.grid.height(), |column, row| {
            scan.span(column, row).map_or(Origins::Unknown, |span| {
                Origins::single(Source::Span {
                    input: 0,
                    range: span.into(),
                })
            })
        });
        Ok(finish("ReadGrid", scan.grid, origins))
    }
}

gridtrace_function::traced_function!(ReadGrid);

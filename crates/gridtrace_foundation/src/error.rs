//! Error types for gridtrace.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Only forward computation fails; explanation queries never return errors.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// Result type alias using the gridtrace error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for gridtrace operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame naming the operation that was running, creating the
    /// context if needed.
    #[must_use]
    pub fn in_operation(mut self, operation: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(operation));
        self
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an out-of-bounds error for a cell coordinate.
    #[must_use]
    pub fn out_of_bounds(column: usize, row: usize, width: usize, height: usize) -> Self {
        Self::new(ErrorKind::OutOfBounds {
            column,
            row,
            width,
            height,
        })
    }

    /// Creates an invalid cell name error.
    #[must_use]
    pub fn invalid_cell_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCellName(name.into()))
    }

    /// Creates an incompatible signature error.
    #[must_use]
    pub fn incompatible_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompatibleSignature(message.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration(message.into()))
    }

    /// Creates a unit mismatch error.
    #[must_use]
    pub fn unit_mismatch(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnitMismatch {
            from: from.into(),
            to: to.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Wrong number of inputs given to a transformation.
    #[error("arity mismatch: expected {expected} inputs, got {actual}")]
    ArityMismatch {
        /// Declared input arity.
        expected: usize,
        /// Number of inputs actually supplied.
        actual: usize,
    },

    /// An input did not have the shape the transformation expects.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// Cell coordinates outside the grid dimensions.
    #[error("cell ({column}, {row}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        /// The column that was accessed.
        column: usize,
        /// The row that was accessed.
        row: usize,
        /// The grid width.
        width: usize,
        /// The grid height.
        height: usize,
    },

    /// Malformed spreadsheet-style cell name.
    #[error("invalid cell name: {0:?}")]
    InvalidCellName(String),

    /// Relational inputs whose label rows do not agree.
    #[error("incompatible signature: {0}")]
    IncompatibleSignature(String),

    /// A transformation was configured with something that does not exist.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Two units of different dimensions cannot be converted.
    #[error("cannot convert {from} to {to}")]
    UnitMismatch {
        /// Source unit name.
        from: String,
        /// Target unit name.
        to: String,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Stack of operations that were running, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.stack {
            writeln!(f, "  in {frame}")?;
        }
        Ok(())
    }
}

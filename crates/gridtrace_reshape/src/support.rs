//! Plumbing shared by the reshape operators.

use tracing::debug;

use gridtrace_foundation::Grid;
use gridtrace_function::{Evaluation, OriginGrid, Trace};

/// Bundles an output grid with its origin table, logging the shape.
pub(crate) fn finish(operator: &str, grid: Grid, origins: OriginGrid) -> Evaluation {
    debug!(
        operator,
        width = grid.width(),
        height = grid.height(),
        "evaluated"
    );
    Evaluation::single(grid, Trace::Cells(origins))
}

//! The chart contract.
//!
//! A chart is a configuration that turns a grid into a [`Figure`] and can
//! translate every feature it draws back into cells of that grid. Chart
//! explanations are rooted at the chart's own segments (a heat-map cell,
//! a point, an axis) and end in leaves of the form `self / cell`, which
//! [`DrawChart`](crate::DrawChart) rewrites onto its input.

use std::fmt;

use gridtrace_explain::{Connective, NodeFactory, NodeId};
use gridtrace_foundation::{Error, Figure, Grid, Result, Type, Value};
use gridtrace_part::{Part, Segment, SubjectId, SubjectKind};

/// A chart configuration.
pub trait Chart: fmt::Debug + Send + Sync {
    /// Identity used to intern this chart's explanation leaves.
    fn subject(&self) -> SubjectId;

    /// Human-readable chart name.
    fn name(&self) -> &str;

    /// The kind of subject the chart's designators apply to.
    fn kind(&self) -> SubjectKind;

    /// Builds the figure for `data`.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if a plotted cell is not numeric and
    /// `OutOfBounds` if the grid is too small for the chart.
    fn draw(&self, data: &Grid) -> Result<Figure>;

    /// Explains `part` (a designator rooted at one of the chart's own
    /// segments) of the figure drawn from `data`.
    fn explain(&self, data: &Grid, part: &Part, factory: &mut NodeFactory) -> NodeId;

    /// Returns an independent chart with the same configuration and a
    /// fresh identity.
    fn duplicate(&self) -> Box<dyn Chart>;
}

/// Designator of a cell of the charted grid.
#[must_use]
pub fn data_cell(column: usize, row: usize) -> Part {
    Part::self_ref().then(Segment::cell(column, row))
}

/// Returns the leaf for `part` of `chart`, and whether it already has
/// children in this factory.
pub fn enter<C>(chart: &C, part: &Part, factory: &mut NodeFactory) -> (NodeId, bool)
where
    C: Chart + ?Sized,
{
    let subject = chart.subject();
    factory.label(subject, chart.name());
    let root = factory.part_node(subject, part);
    let done = factory.graph().has_children(root);
    (root, done)
}

/// Links under `root` the conjunction of the given cells of the charted
/// grid, each refined by `suffix`.
pub fn link_cells<C>(
    chart: &C,
    root: NodeId,
    cells: &[(usize, usize)],
    suffix: &Part,
    factory: &mut NodeFactory,
) where
    C: Chart + ?Sized,
{
    let ids = cell_nodes(chart, cells, suffix, factory);
    factory.connect(root, &ids, Connective::And);
}

/// Leaves for the given cells of the charted grid.
pub fn cell_nodes<C>(
    chart: &C,
    cells: &[(usize, usize)],
    suffix: &Part,
    factory: &mut NodeFactory,
) -> Vec<NodeId>
where
    C: Chart + ?Sized,
{
    cells
        .iter()
        .map(|&(column, row)| {
            factory.part_node(chart.subject(), &suffix.inside(&data_cell(column, row)))
        })
        .collect()
}

/// Reads a plotted number.
///
/// # Errors
///
/// Returns `OutOfBounds` for a missing cell and `TypeMismatch` for a
/// non-numeric one.
pub fn number_at(data: &Grid, column: usize, row: usize) -> Result<f64> {
    let value = data.get(column, row)?;
    value
        .as_number()
        .ok_or_else(|| Error::type_mismatch(Type::Number, value.value_type()))
}

/// Reads a caption; nil reads as the empty string.
#[must_use]
pub fn caption_at(data: &Grid, column: usize, row: usize) -> String {
    data.try_get(column, row)
        .map(Value::to_string)
        .unwrap_or_default()
}

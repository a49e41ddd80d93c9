//! Heat maps of binned counts.

use gridtrace_explain::{NodeFactory, NodeId};
use gridtrace_foundation::{Error, Figure, Grid, HeatMapFigure, Result, Value};
use gridtrace_part::{Axis, HeatCoord, Part, Segment, SegmentKind, SubjectId, SubjectKind};

use crate::chart::{Chart, enter, link_cells, number_at};

/// Draws a grid laid out like a frequency table: the first row holds the
/// lower bound of each horizontal bucket, the first column the lower
/// bound of each vertical bucket (bottom first), and cell `(x + 1, y + 1)`
/// the value of bucket `(x, y)`.
///
/// A drawn cell explains to the grid cell it was read from, whether it is
/// addressed by position or by a plotted coordinate.
#[derive(Clone, Debug)]
pub struct HeatMap {
    subject: SubjectId,
}

impl HeatMap {
    /// Creates a heat map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: SubjectId::fresh(),
        }
    }

    /// Resolves a heat-map cell to the grid cell holding its value.
    ///
    /// A coordinate falls in the bucket whose lower bound is the largest
    /// one not above it; coordinates below the first bound have no cell.
    #[must_use]
    pub fn locate(&self, data: &Grid, coord: HeatCoord) -> Option<(usize, usize)> {
        let (column, row) = match coord {
            HeatCoord::Ordinal { x, y } => (x + 1, y + 1),
            HeatCoord::Cardinal { x, y } => {
                let column = bracket(&bounds(data, Axis::X), x)? + 1;
                let row = bracket(&bounds(data, Axis::Y), y)? + 1;
                (column, row)
            }
        };
        (column < data.width() && row < data.height()).then_some((column, row))
    }
}

impl Default for HeatMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket bounds along one axis, by bucket position.
fn bounds(data: &Grid, axis: Axis) -> Vec<Option<f64>> {
    match axis {
        Axis::X => (1..data.width())
            .map(|column| data.try_get(column, 0).and_then(Value::as_number))
            .collect(),
        Axis::Y => (1..data.height())
            .map(|row| data.try_get(0, row).and_then(Value::as_number))
            .collect(),
    }
}

fn bracket(bounds: &[Option<f64>], v: f64) -> Option<usize> {
    if v.is_nan() {
        return None;
    }
    bounds
        .iter()
        .rposition(|bound| bound.is_some_and(|b| b <= v))
}

impl Chart for HeatMap {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "HeatMap"
    }

    fn kind(&self) -> SubjectKind {
        SubjectKind::HeatMap
    }

    fn draw(&self, data: &Grid) -> Result<Figure> {
        if data.width() < 2 || data.height() < 2 {
            return Err(Error::out_of_bounds(1, 1, data.width(), data.height())
                .in_operation("HeatMap"));
        }
        let in_op = |e: Error| e.in_operation("HeatMap");
        let x_bounds = (1..data.width())
            .map(|column| number_at(data, column, 0))
            .collect::<Result<Vec<f64>>>()
            .map_err(in_op)?;
        let y_bounds = (1..data.height())
            .map(|row| number_at(data, 0, row))
            .collect::<Result<Vec<f64>>>()
            .map_err(in_op)?;
        let values = (1..data.height())
            .map(|row| {
                (1..data.width())
                    .map(|column| match data.try_get(column, row) {
                        Some(Value::Nil) | None => Ok(0.0),
                        Some(_) => number_at(data, column, row),
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<Vec<f64>>>>()
            .map_err(in_op)?;
        Ok(Figure::HeatMap(HeatMapFigure {
            x_bounds,
            y_bounds,
            values,
        }))
    }

    fn explain(&self, data: &Grid, part: &Part, factory: &mut NodeFactory) -> NodeId {
        let (root, done) = enter(self, part, factory);
        if done {
            return root;
        }
        let (width, height) = (data.width(), data.height());
        match part.root() {
            None => {
                let whole = factory.part_node(self.subject, &Part::self_ref());
                factory.link(root, whole);
            }
            Some(&Segment::HeatCell(coord)) => match self.locate(data, coord) {
                Some(cell) => {
                    let suffix = part.below(SegmentKind::HeatCell).unwrap_or_default();
                    link_cells(self, root, &[cell], &suffix, factory);
                }
                None => factory.link_unknown(root),
            },
            Some(Segment::Axis(Axis::X)) => {
                let cells: Vec<(usize, usize)> = (1..width).map(|column| (column, 0)).collect();
                link_cells(self, root, &cells, &Part::nothing(), factory);
            }
            Some(Segment::Axis(Axis::Y)) => {
                let cells: Vec<(usize, usize)> = (1..height).map(|row| (0, row)).collect();
                link_cells(self, root, &cells, &Part::nothing(), factory);
            }
            Some(Segment::Legend) => {
                let cells: Vec<(usize, usize)> = (1..height)
                    .flat_map(|row| (1..width).map(move |column| (column, row)))
                    .collect();
                link_cells(self, root, &cells, &Part::nothing(), factory);
            }
            Some(_) => factory.link_unknown(root),
        }
        root
    }

    fn duplicate(&self) -> Box<dyn Chart> {
        Box::new(Self::new())
    }
}

//! Scatterplots of one x column against one or more y columns.

use gridtrace_explain::{Connective, NodeFactory, NodeId};
use gridtrace_foundation::{Error, Figure, Grid, Result, ScatterFigure, Series, Value};
use gridtrace_part::{Axis, ElementId, Part, Segment, SegmentKind, SubjectId, SubjectKind};

use crate::chart::{Chart, caption_at, cell_nodes, enter, link_cells, number_at};

/// Plots column 0 (x) against every other column (one series each).
///
/// Row 0 holds captions: the x caption, then one legend entry per series.
/// A data row is plotted in a series when both its x cell and that
/// series' cell are numeric, so point `i` of a series is its `i`-th
/// plotted row.
#[derive(Clone, Debug)]
pub struct Scatterplot {
    subject: SubjectId,
}

impl Scatterplot {
    /// Creates a scatterplot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: SubjectId::fresh(),
        }
    }

    /// Returns the grid rows plotted in `series`, in plotting order.
    #[must_use]
    pub fn plotted_rows(data: &Grid, series: usize) -> Vec<usize> {
        (1..data.height())
            .filter(|&row| is_number(data, 0, row) && is_number(data, series + 1, row))
            .collect()
    }

    /// Series whose point in `row` is drawn on top of `series`' point.
    fn coincident(data: &Grid, series: usize, row: usize) -> Vec<usize> {
        let Some(y) = data.try_get(series + 1, row) else {
            return Vec::new();
        };
        (0..series_count(data))
            .filter(|&other| {
                is_number(data, other + 1, row)
                    && data.try_get(other + 1, row).is_some_and(|v| v.same(y))
            })
            .collect()
    }

    fn explain_point(
        &self,
        data: &Grid,
        series: usize,
        index: usize,
        root: NodeId,
        factory: &mut NodeFactory,
    ) {
        let Some(&row) = Self::plotted_rows(data, series).get(index) else {
            factory.link_unknown(root);
            return;
        };
        let candidates = Self::coincident(data, series, row);
        if candidates.len() <= 1 {
            link_cells(self, root, &[(0, row), (series + 1, row)], &Part::nothing(), factory);
            return;
        }
        // the same mark could belong to any of these pairings
        let pairings: Vec<NodeId> = candidates
            .into_iter()
            .map(|other| {
                let cells = cell_nodes(self, &[(0, row), (other + 1, row)], &Part::nothing(), factory);
                factory.combine(&cells, Connective::And)
            })
            .collect();
        factory.connect(root, &pairings, Connective::Or);
    }
}

impl Default for Scatterplot {
    fn default() -> Self {
        Self::new()
    }
}

fn is_number(data: &Grid, column: usize, row: usize) -> bool {
    data.try_get(column, row)
        .and_then(Value::as_number)
        .is_some()
}

fn series_count(data: &Grid) -> usize {
    data.width().saturating_sub(1)
}

impl Chart for Scatterplot {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "Scatterplot"
    }

    fn kind(&self) -> SubjectKind {
        SubjectKind::Scatterplot
    }

    fn draw(&self, data: &Grid) -> Result<Figure> {
        if data.width() < 2 || data.height() == 0 {
            return Err(Error::out_of_bounds(1, 0, data.width(), data.height())
                .in_operation("Scatterplot"));
        }
        let series = (0..series_count(data))
            .map(|s| {
                let points = Self::plotted_rows(data, s)
                    .into_iter()
                    .map(|row| Ok((number_at(data, 0, row)?, number_at(data, s + 1, row)?)))
                    .collect::<Result<Vec<(f64, f64)>>>()?;
                Ok(Series {
                    name: caption_at(data, s + 1, 0),
                    points,
                })
            })
            .collect::<Result<Vec<Series>>>()
            .map_err(|e| e.in_operation("Scatterplot"))?;
        let y_caption = if series.len() == 1 {
            caption_at(data, 1, 0)
        } else {
            String::new()
        };
        Ok(Figure::Scatter(ScatterFigure {
            x_caption: caption_at(data, 0, 0),
            y_caption,
            series,
        }))
    }

    fn explain(&self, data: &Grid, part: &Part, factory: &mut NodeFactory) -> NodeId {
        let (root, done) = enter(self, part, factory);
        if done {
            return root;
        }
        let count = series_count(data);
        let labels: Vec<(usize, usize)> = (1..=count).map(|column| (column, 0)).collect();
        match part.root() {
            None => {
                let whole = factory.part_node(self.subject, &Part::self_ref());
                factory.link(root, whole);
            }
            Some(&Segment::Point { series, index }) if series < count => {
                self.explain_point(data, series, index, root, factory);
            }
            Some(Segment::Axis(Axis::X)) => {
                let cells: Vec<(usize, usize)> = (1..data.height()).map(|row| (0, row)).collect();
                link_cells(self, root, &cells, &Part::nothing(), factory);
            }
            Some(Segment::Axis(Axis::Y)) => {
                let cells: Vec<(usize, usize)> = (1..data.height())
                    .flat_map(|row| (1..=count).map(move |column| (column, row)))
                    .collect();
                link_cells(self, root, &cells, &Part::nothing(), factory);
            }
            Some(Segment::AxisCaption(axis)) => {
                let suffix = part.below(SegmentKind::AxisCaption).unwrap_or_default();
                match axis {
                    Axis::X if data.width() > 0 => {
                        link_cells(self, root, &[(0, 0)], &suffix, factory);
                    }
                    Axis::Y if count == 1 => link_cells(self, root, &labels, &suffix, factory),
                    Axis::Y => link_cells(self, root, &labels, &Part::nothing(), factory),
                    Axis::X => factory.link_unknown(root),
                }
            }
            Some(Segment::Legend) => link_cells(self, root, &labels, &Part::nothing(), factory),
            Some(Segment::Element(element)) => {
                let column = match element {
                    ElementId::Numbered(s) => Some(s + 1),
                    ElementId::Named(name) => data.column_of(name),
                };
                match column.filter(|&c| c >= 1 && c <= count) {
                    Some(column) => {
                        let suffix = part.below(SegmentKind::Element).unwrap_or_default();
                        link_cells(self, root, &[(column, 0)], &suffix, factory);
                    }
                    None => factory.link_unknown(root),
                }
            }
            Some(_) => factory.link_unknown(root),
        }
        root
    }

    fn duplicate(&self) -> Box<dyn Chart> {
        Box::new(Self::new())
    }
}

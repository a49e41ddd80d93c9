//! In-memory description of drawn charts.
//!
//! A figure is what a drawing transformation hands to a rendering backend.
//! It records what is drawn (bucket boundaries, points, captions), never how.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A drawable chart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Figure {
    /// A two-dimensional heat map of bucket counts.
    HeatMap(HeatMapFigure),
    /// A scatterplot with one or more series.
    Scatter(ScatterFigure),
}

impl Figure {
    /// Returns a short name for the figure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::HeatMap(_) => "heat-map",
            Self::Scatter(_) => "scatterplot",
        }
    }
}

/// A heat map: lower bucket boundaries along each axis and one value per bucket.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeatMapFigure {
    /// Lower boundary of each horizontal bucket, left to right.
    pub x_bounds: Vec<f64>,
    /// Lower boundary of each vertical bucket, bottom to top.
    pub y_bounds: Vec<f64>,
    /// Bucket values indexed `[y][x]`.
    pub values: Vec<Vec<f64>>,
}

impl HeatMapFigure {
    /// Returns the smallest and largest bucket values, if any.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// A scatterplot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScatterFigure {
    /// Caption of the horizontal axis.
    pub x_caption: String,
    /// Caption of the vertical axis.
    pub y_caption: String,
    /// Plotted series, in legend order.
    pub series: Vec<Series>,
}

/// One named series of (x, y) points.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Series {
    /// Legend entry for the series.
    pub name: String,
    /// Points in plotting order.
    pub points: Vec<(f64, f64)>,
}

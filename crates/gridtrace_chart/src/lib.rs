//! Charts whose drawn features explain back to grid cells.
//!
//! A [`Chart`] turns a grid into a [`Figure`](gridtrace_foundation::Figure)
//! and translates chart designators (heat-map cells, points, axes,
//! captions, legend entries) into cells of that grid. [`DrawChart`] wraps
//! a chart as a transformation so figures can sit at the end of a circuit.
//! - [`HeatMap`] - Binned counts, addressed by position or coordinate
//! - [`Scatterplot`] - One x column against one or more series

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chart;
pub mod draw;
pub mod heat_map;
pub mod scatter;

pub use chart::Chart;
pub use draw::DrawChart;
pub use heat_map::HeatMap;
pub use scatter::Scatterplot;

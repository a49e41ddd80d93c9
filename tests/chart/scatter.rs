//! Scatterplots drawn through DrawChart

use gridtrace_chart::{DrawChart, Scatterplot};
use gridtrace_explain::NodeKind;
use gridtrace_foundation::{Datum, Figure, Grid, grid};
use gridtrace_function::{Evaluable, explain};
use gridtrace_part::{Axis, ElementId, Part, Segment};

fn readings() -> Grid {
    grid![["t", "a", "b"], [0, 1, 1], [1, 2, 5], ["x", 3, 3], [2, 4, 9]]
}

fn input_cell(column: usize, row: usize) -> Part {
    Part::input(0).then(Segment::cell(column, row))
}

fn sources(draw: &DrawChart, part: &Part) -> Vec<Part> {
    let run = draw.evaluate(&[readings().into()]).unwrap();
    explain(draw, &run, part)
        .sources()
        .into_iter()
        .filter(|(s, _)| *s == draw.subject())
        .map(|(_, p)| p.clone())
        .collect()
}

#[test]
fn skips_rows_without_numbers() {
    let draw = DrawChart::new(Scatterplot::new());
    let run = draw.evaluate(&[readings().into()]).unwrap();
    let Some(Datum::Figure(Figure::Scatter(figure))) = run.output(0) else {
        panic!("expected a scatterplot");
    };
    assert_eq!(figure.series[1].points, vec![(0.0, 1.0), (1.0, 5.0), (2.0, 9.0)]);
}

#[test]
fn points_explain_to_both_coordinates() {
    let draw = DrawChart::new(Scatterplot::new());
    let point = Part::output(0).then(Segment::Point { series: 1, index: 2 });
    assert_eq!(sources(&draw, &point), vec![input_cell(0, 4), input_cell(2, 4)]);
}

#[test]
fn overlapping_points_are_alternatives() {
    let draw = DrawChart::new(Scatterplot::new());
    let run = draw.evaluate(&[readings().into()]).unwrap();
    let point = Part::output(0).then(Segment::Point { series: 0, index: 0 });
    let e = explain(&draw, &run, &point);
    assert!(
        e.graph()
            .reachable(e.root())
            .into_iter()
            .any(|id| e.kind(id) == &NodeKind::Or)
    );
}

#[test]
fn captions_keep_their_character_ranges() {
    let draw = DrawChart::new(Scatterplot::new());
    let caption = Part::output(0)
        .then(Segment::Element(ElementId::Named("b".into())))
        .then(Segment::chars(0, 1));
    assert_eq!(
        sources(&draw, &caption),
        vec![input_cell(2, 0).then(Segment::chars(0, 1))]
    );
    let x = Part::output(0).then(Segment::AxisCaption(Axis::X));
    assert_eq!(sources(&draw, &x), vec![input_cell(0, 0)]);
}

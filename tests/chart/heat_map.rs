//! Heat maps drawn from frequency tables

use gridtrace_chart::{DrawChart, HeatMap};
use gridtrace_foundation::{Datum, Figure};
use gridtrace_function::{Circuit, Endpoint, Evaluable, explain};
use gridtrace_part::{Axis, HeatCoord, Part, Segment};
use gridtrace_reshape::{Bins, GetFrequencies};

/// Pairs binned into a 4 x 3 table, then drawn.
fn histogram() -> Circuit {
    let mut c = Circuit::new("histogram", 1);
    let bin = c.add(GetFrequencies::new(Bins::new(0.0, 12.0, 4), Bins::new(0.0, 6.0, 3)));
    let draw = c.add(DrawChart::new(HeatMap::new()));
    c.connect(Endpoint::Input(0), bin, 0).unwrap();
    c.connect(Endpoint::node(bin, 0), draw, 0).unwrap();
    c.expose(Endpoint::node(draw, 0)).unwrap();
    c
}

fn pairs() -> Datum {
    Datum::pairs([(1, 1), (3, 5), (2, 1), (7, 3)])
}

fn heat_cell(coord: HeatCoord) -> Part {
    Part::output(0).then(Segment::HeatCell(coord))
}

#[test]
fn draws_the_binned_counts() {
    let run = histogram().evaluate(&[pairs()]).unwrap();
    let Some(Datum::Figure(Figure::HeatMap(figure))) = run.output(0) else {
        panic!("expected a heat map");
    };
    assert_eq!(figure.x_bounds, vec![0.0, 3.0, 6.0, 9.0]);
    assert_eq!(figure.y_bounds, vec![0.0, 2.0, 4.0]);
    assert_eq!(figure.values[0], vec![2.0, 0.0, 0.0, 0.0]);
}

#[test]
fn heat_cells_explain_to_the_pairs_they_count() {
    let histogram = histogram();
    let run = histogram.evaluate(&[pairs()]).unwrap();
    let e = explain(&histogram, &run, &heat_cell(HeatCoord::Ordinal { x: 0, y: 0 }));
    assert_eq!(
        e.sources(),
        vec![
            (histogram.subject(), &Part::input(0).then(Segment::Index(0))),
            (histogram.subject(), &Part::input(0).then(Segment::Index(2)))
        ]
    );

    // (7.5, 2.5) lands in the bucket starting at (6, 2)
    let e = explain(&histogram, &run, &heat_cell(HeatCoord::Cardinal { x: 7.5, y: 2.5 }));
    assert_eq!(
        e.sources(),
        vec![(histogram.subject(), &Part::input(0).then(Segment::Index(3)))]
    );
}

#[test]
fn coordinates_outside_the_map_are_unknown() {
    let histogram = histogram();
    let run = histogram.evaluate(&[pairs()]).unwrap();
    let e = explain(&histogram, &run, &heat_cell(HeatCoord::Ordinal { x: 9, y: 0 }));
    assert!(e.is_partial());
    let e = explain(&histogram, &run, &heat_cell(HeatCoord::Cardinal { x: -1.0, y: 0.0 }));
    assert!(e.is_partial());
}

#[test]
fn axis_bounds_have_no_further_cause() {
    let histogram = histogram();
    let run = histogram.evaluate(&[pairs()]).unwrap();
    let e = explain(&histogram, &run, &Part::output(0).then(Segment::Axis(Axis::X)));
    assert!(!e.is_partial());
    assert!(e.sources().iter().all(|(s, _)| *s != histogram.subject()));
}

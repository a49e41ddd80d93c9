//! Text filtered and projected through relational operators

use gridtrace::explain::Explanation;
use gridtrace::foundation::{Datum, ReadOptions, grid};
use gridtrace::function::{
    Circuit, Compare, CompareOp, Constant, Endpoint, Evaluable, ValueOf, explain,
};
use gridtrace::part::{CharRange, Part, Segment};
use gridtrace::relational::{Projection, Selection};
use gridtrace::reshape::ReadGrid;

const TEXT: &str = "item,qty\nnut,5\nbolt,2\ngear,9\nnut,7\n";

/// qty of the candidate row is at least 5.
fn stocked() -> Circuit {
    let mut c = Circuit::new("stocked", 1);
    let read = c.add(ValueOf::new(1, 1));
    let bound = c.add(Constant::new(5));
    let ge = c.add(Compare::new(CompareOp::Ge));
    c.connect(Endpoint::Input(0), read, 0).unwrap();
    c.connect(Endpoint::node(read, 0), ge, 0).unwrap();
    c.connect(Endpoint::node(bound, 0), ge, 1).unwrap();
    c.expose(Endpoint::node(ge, 0)).unwrap();
    c
}

fn in_stock() -> Circuit {
    let mut c = Circuit::new("in stock", 1);
    let read = c.add(ReadGrid::new(ReadOptions::csv()));
    let select = c.add(Selection::new(stocked()));
    let project = c.add(Projection::new(["item"]));
    c.connect(Endpoint::Input(0), read, 0).unwrap();
    c.connect(Endpoint::node(read, 0), select, 0).unwrap();
    c.connect(Endpoint::node(select, 0), project, 0).unwrap();
    c.expose(Endpoint::node(project, 0)).unwrap();
    c
}

fn text_ranges(c: &Circuit, e: &Explanation) -> Vec<CharRange> {
    let mut ranges: Vec<CharRange> = e
        .sources()
        .into_iter()
        .filter(|(subject, _)| *subject == c.subject())
        .filter_map(|(_, part)| part.chars())
        .collect();
    ranges.sort_unstable();
    ranges
}

#[test]
fn lists_each_stocked_item_once() {
    let c = in_stock();
    let run = c.evaluate(&[Datum::Scalar(TEXT.into())]).unwrap();
    assert_eq!(run.grid(0).unwrap(), &grid![["item"], ["nut"], ["gear"]]);
}

#[test]
fn collapsed_items_trace_to_every_qualifying_line() {
    let c = in_stock();
    let run = c.evaluate(&[Datum::Scalar(TEXT.into())]).unwrap();
    let e = explain(&c, &run, &Part::output(0).then(Segment::Row(1)));
    assert!(!e.is_partial());
    let ranges = text_ranges(&c, &e);
    // both "nut" lines, and both quantities that let them through
    for expected in [(9, 12), (13, 14), (29, 32), (33, 34)] {
        assert!(ranges.contains(&CharRange::new(expected.0, expected.1)));
    }
    // only the two "nut" lines play a part
    assert!(ranges.iter().all(|r| (9..15).contains(&r.start) || r.start >= 29));
}

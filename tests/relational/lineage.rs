//! Row lineage through the relational operators

use gridtrace_explain::NodeKind;
use gridtrace_foundation::{ErrorKind, Grid, grid};
use gridtrace_function::{
    Circuit, Compare, CompareOp, Constant, Endpoint, Evaluable, ValueOf, explain,
};
use gridtrace_part::{Part, Segment};
use gridtrace_relational::{Intersection, Projection, Selection, Union};

fn people() -> Grid {
    grid![
        ["A", "B", "C"],
        ["ann", 1, "x"],
        ["bob", 2, "y"],
        ["ann", 3, "x"],
        ["cat", 4, "x"],
        ["ann", 5, "x"]
    ]
}

fn rows(e: &gridtrace_explain::Explanation) -> Vec<&Part> {
    e.sources().into_iter().map(|(_, p)| p).collect()
}

// =============================================================================
// Projection
// =============================================================================

#[test]
fn projection_collapses_into_a_disjunction() {
    let projection = Projection::new(["A", "C"]);
    let run = projection.evaluate(&[people().into()]).unwrap();
    assert_eq!(
        run.grid(0).unwrap(),
        &grid![["A", "C"], ["ann", "x"], ["bob", "y"], ["cat", "x"]]
    );

    let e = explain(&projection, &run, &Part::output(0).then(Segment::Row(1)));
    assert_eq!(e.kind(e.children(e.root())[0]), &NodeKind::Or);
    assert_eq!(
        rows(&e),
        vec![
            &Part::input(0).then(Segment::Row(1)),
            &Part::input(0).then(Segment::Row(3)),
            &Part::input(0).then(Segment::Row(5))
        ]
    );

    let single = explain(&projection, &run, &Part::output(0).then(Segment::Row(2)));
    assert_eq!(rows(&single), vec![&Part::input(0).then(Segment::Row(2))]);
}

#[test]
fn projection_of_an_unknown_label_fails() {
    let err = Projection::new(["Z"]).evaluate(&[people().into()]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Configuration(_)));
}

// =============================================================================
// Union and Intersection
// =============================================================================

#[test]
fn union_rows_seen_twice_have_two_explanations() {
    let union = Union::new(2);
    let a = grid![["k", "v"], [1, "p"], [2, "q"]];
    let b = grid![["k", "v"], [3, "r"], [1.0, "p"]];
    let run = union.evaluate(&[a.into(), b.into()]).unwrap();
    assert_eq!(
        run.grid(0).unwrap(),
        &grid![["k", "v"], [1, "p"], [2, "q"], [3, "r"]]
    );
    let e = explain(&union, &run, &Part::output(0).then(Segment::Row(1)));
    assert_eq!(
        rows(&e),
        vec![
            &Part::input(0).then(Segment::Row(1)),
            &Part::input(1).then(Segment::Row(2))
        ]
    );
}

#[test]
fn intersection_needs_every_input() {
    let intersection = Intersection::new(2);
    let a = grid![["k", "v"], [1, "p"], [2, "q"]];
    let b = grid![["k", "v"], [2, "q"], [9, "z"]];
    let run = intersection.evaluate(&[a.into(), b.into()]).unwrap();
    assert_eq!(run.grid(0).unwrap(), &grid![["k", "v"], [2, "q"]]);

    let e = explain(&intersection, &run, &Part::output(0).then(Segment::Row(1)));
    assert_eq!(e.kind(e.children(e.root())[0]), &NodeKind::And);
    assert_eq!(
        rows(&e),
        vec![
            &Part::input(0).then(Segment::Row(2)),
            &Part::input(1).then(Segment::Row(1))
        ]
    );
}

#[test]
fn mismatched_signatures_are_rejected() {
    let a = grid![["k", "v"], [1, "p"]];
    let b = grid![["k", "w"], [1, "p"]];
    let err = Union::new(2).evaluate(&[a.into(), b.into()]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IncompatibleSignature(_)));
}

// =============================================================================
// Selection
// =============================================================================

/// B of the candidate row is at least `limit`.
fn at_least(limit: i64) -> Circuit {
    let mut c = Circuit::new("at least", 1);
    let read = c.add(ValueOf::new(1, 1));
    let bound = c.add(Constant::new(limit));
    let ge = c.add(Compare::new(CompareOp::Ge));
    c.connect(Endpoint::Input(0), read, 0).unwrap();
    c.connect(Endpoint::node(read, 0), ge, 0).unwrap();
    c.connect(Endpoint::node(bound, 0), ge, 1).unwrap();
    c.expose(Endpoint::node(ge, 0)).unwrap();
    c
}

#[test]
fn selection_keeps_matching_rows_and_explains_why() {
    let selection = Selection::new(at_least(4));
    let run = selection.evaluate(&[people().into()]).unwrap();
    assert_eq!(
        run.grid(0).unwrap(),
        &grid![["A", "B", "C"], ["cat", 4, "x"], ["ann", 5, "x"]]
    );

    let e = explain(&selection, &run, &Part::output(0).then(Segment::Row(2)));
    assert!(!e.is_partial());
    let sources = rows(&e);
    assert!(sources.contains(&&Part::input(0).then(Segment::Row(5))));
    assert!(sources.contains(&&Part::input(0).then(Segment::cell(1, 5))));
}

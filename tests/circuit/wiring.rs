//! Circuits built from reshaping and relational operators

use gridtrace_explain::{ExplainConfig, NodeKind};
use gridtrace_foundation::{ErrorKind, Grid, grid};
use gridtrace_function::{Circuit, Endpoint, Evaluable, Function, explain, explain_with};
use gridtrace_part::{Part, Segment};
use gridtrace_relational::{Projection, Union};
use gridtrace_reshape::{CopyFrom, Direction, Sort, Transpose};

fn scores() -> Grid {
    grid![["name", "n"], ["a", 3], ["b", 9], ["c", 5]]
}

/// The two highest-scoring rows, without the label row.
fn top_two() -> Circuit {
    let mut c = Circuit::new("top two", 1);
    let sort = c.add(Sort::new().by(1, Direction::Descending).exclude_first());
    let copy = c.add(CopyFrom::new((0, 1), (1, 2)).unwrap());
    c.connect(Endpoint::Input(0), sort, 0).unwrap();
    c.connect(Endpoint::node(sort, 0), copy, 0).unwrap();
    c.expose(Endpoint::node(copy, 0)).unwrap();
    c
}

/// Distinct keys of two relations.
fn keys() -> Circuit {
    let mut c = Circuit::new("keys", 2);
    let union = c.add(Union::new(2));
    let project = c.add(Projection::new(["k"]));
    c.connect(Endpoint::Input(0), union, 0).unwrap();
    c.connect(Endpoint::Input(1), union, 1).unwrap();
    c.connect(Endpoint::node(union, 0), project, 0).unwrap();
    c.expose(Endpoint::node(project, 0)).unwrap();
    c
}

// =============================================================================
// Reshaping Chains
// =============================================================================

#[test]
fn copied_cells_explain_to_the_unsorted_input() {
    let c = top_two();
    let run = c.evaluate(&[scores().into()]).unwrap();
    assert_eq!(run.grid(0).unwrap(), &grid![["b", 9], ["c", 5]]);

    let e = explain(&c, &run, &Part::output(0).then(Segment::cell(1, 1)));
    assert_eq!(
        e.sources(),
        vec![(c.subject(), &Part::input(0).then(Segment::cell(1, 3)))]
    );
    assert!(e.label_of(c.subject()).is_some_and(|name| name == "top two"));
}

#[test]
fn explanations_are_repeatable() {
    let c = top_two();
    let first = c.evaluate(&[scores().into()]).unwrap();
    let second = c.evaluate(&[scores().into()]).unwrap();
    let part = Part::output(0).then(Segment::cell(0, 0));
    assert_eq!(explain(&c, &first, &part), explain(&c, &second, &part));
}

#[test]
fn shallow_queries_stop_early() {
    let c = top_two();
    let run = c.evaluate(&[scores().into()]).unwrap();
    let part = Part::output(0).then(Segment::cell(1, 1));
    let config = ExplainConfig::default().with_max_depth(1);
    let e = explain_with(&c, &run, &part, config);
    assert!(e.is_partial());
    assert!(!explain(&c, &run, &part).is_partial());
}

#[test]
fn nested_transposes_cancel_out() {
    let mut inner = Circuit::new("flip", 1);
    let t = inner.add(Transpose::new());
    inner.connect(Endpoint::Input(0), t, 0).unwrap();
    inner.expose(Endpoint::node(t, 0)).unwrap();

    let mut outer = Circuit::new("flip twice", 1);
    let first = outer.add_boxed(inner.duplicate());
    let second = outer.add(inner);
    outer.connect(Endpoint::Input(0), first, 0).unwrap();
    outer.connect(Endpoint::node(first, 0), second, 0).unwrap();
    outer.expose(Endpoint::node(second, 0)).unwrap();

    let run = outer.evaluate(&[scores().into()]).unwrap();
    assert_eq!(run.grid(0).unwrap(), &scores());
    let e = explain(&outer, &run, &Part::output(0).then(Segment::cell(0, 2)));
    assert_eq!(
        e.sources(),
        vec![(outer.subject(), &Part::input(0).then(Segment::cell(0, 2)))]
    );
}

// =============================================================================
// Relational Chains
// =============================================================================

#[test]
fn projected_keys_explain_to_every_contributing_row() {
    let c = keys();
    let a = grid![["k", "v"], [1, "p"], [2, "q"]];
    let b = grid![["k", "v"], [1, "z"]];
    let run = c.evaluate(&[a.into(), b.into()]).unwrap();
    assert_eq!(run.grid(0).unwrap(), &grid![["k"], [1], [2]]);

    let e = explain(&c, &run, &Part::output(0).then(Segment::Row(1)));
    assert_eq!(
        e.sources(),
        vec![
            (c.subject(), &Part::input(0).then(Segment::Row(1))),
            (c.subject(), &Part::input(1).then(Segment::Row(1)))
        ]
    );
    let root_child = e.children(e.root())[0];
    assert!(matches!(e.kind(root_child), NodeKind::Part { .. }));
}

#[test]
fn errors_name_the_circuit() {
    let c = keys();
    let a = grid![["k", "v"], [1, "p"]];
    let b = grid![["k"], [1]];
    let err = c.evaluate(&[a.into(), b.into()]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IncompatibleSignature(_)));
    assert!(err.context.unwrap().stack.contains(&"keys".to_string()));
}

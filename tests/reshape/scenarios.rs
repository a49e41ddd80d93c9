//! Literal scenarios for the reshaping operators

use gridtrace_explain::NodeKind;
use gridtrace_foundation::{Datum, Value, grid};
use gridtrace_function::{Evaluable, ValueOf, explain};
use gridtrace_part::{Part, Segment};
use gridtrace_reshape::{
    ApplyFormula, Bins, ColumnSum, Direction, GetFrequencies, Sort, Union,
};

fn cell(column: usize, row: usize) -> Part {
    Part::output(0).then(Segment::cell(column, row))
}

// =============================================================================
// ColumnSum
// =============================================================================

#[test]
fn column_sum_totals_under_labels() {
    let sum = ColumnSum::new();
    let run = sum
        .evaluate(&[grid![["A", "B", "C"], [3, 1, 4], [1, 5, 9]].into()])
        .unwrap();
    assert_eq!(run.grid(0).unwrap(), &grid![["A", "B", "C"], [4, 6, 13]]);

    let e = explain(&sum, &run, &cell(1, 1));
    assert_eq!(e.kind(e.children(e.root())[0]), &NodeKind::And);
    assert_eq!(e.sources().len(), 2);
}

// =============================================================================
// Sort
// =============================================================================

#[test]
fn sort_descending_keeps_the_header() {
    let sort = Sort::new().by(0, Direction::Descending).exclude_first();
    let input = grid![["A", "B"], [3, "a"], [1, "b"], [4, "c"], [2, "d"]];
    let run = sort.evaluate(&[input.into()]).unwrap();
    assert_eq!(
        run.grid(0).unwrap(),
        &grid![["A", "B"], [4, "c"], [3, "a"], [2, "d"], [1, "b"]]
    );

    // the 1 ends up in row 4 of the output, having started in row 2
    let e = explain(&sort, &run, &cell(0, 4));
    assert_eq!(e.sources()[0].1, &Part::input(0).then(Segment::cell(0, 2)));
    let e = explain(&sort, &run, &cell(0, 3));
    assert_eq!(e.sources()[0].1, &Part::input(0).then(Segment::cell(0, 4)));
}

// =============================================================================
// Union (stacking)
// =============================================================================

#[test]
fn union_stacks_and_pads_without_headers() {
    let union = Union::new(2);
    let run = union
        .evaluate(&[
            grid![[3, 1, 4], [1, 5, 9], [2, 6, 5]].into(),
            grid![[2, 7], [1, 8], [2, 8], [1, 8]].into(),
        ])
        .unwrap();
    let output = run.grid(0).unwrap();
    assert_eq!(output.height(), 7);
    assert_eq!(output.row_values(2), vec![2.into(), 6.into(), 5.into()]);
    assert_eq!(output.row_values(6), vec![1.into(), 8.into(), Value::Nil]);

    let e = explain(&union, &run, &cell(1, 3));
    assert_eq!(e.sources(), vec![(union.subject(), &Part::input(1).then(Segment::cell(1, 0)))]);
    assert!(explain(&union, &run, &cell(2, 4)).is_partial());
}

// =============================================================================
// GetFrequencies
// =============================================================================

#[test]
fn frequencies_bin_pairs() {
    let frequencies = GetFrequencies::new(Bins::new(0.0, 12.0, 4), Bins::new(0.0, 6.0, 3));
    let run = frequencies
        .evaluate(&[Datum::pairs([(1, 1), (3, 5), (2, 1), (7, 3)])])
        .unwrap();
    assert_eq!(
        run.grid(0).unwrap(),
        &grid![
            [Value::Nil, 0, 3, 6, 9],
            [0, 2, 0, 0, 0],
            [2, 0, 0, 1, 0],
            [4, 0, 1, 0, 0]
        ]
    );

    let e = explain(&frequencies, &run, &cell(2, 3));
    assert_eq!(e.sources()[0].1, &Part::input(0).then(Segment::Index(1)));
}

// =============================================================================
// ApplyFormula
// =============================================================================

#[test]
fn formula_explains_through_its_reference() {
    let formula = ApplyFormula::new().set(0, 1, ValueOf::new(0, 0)).unwrap();
    let run = formula.evaluate(&[grid![[-3], [1]].into()]).unwrap();
    assert_eq!(run.grid(0).unwrap().get(0, 1).unwrap(), &Value::Int(-3));

    let e = explain(&formula, &run, &cell(0, 1));
    assert_eq!(
        e.sources(),
        vec![(formula.subject(), &Part::input(0).then(Segment::cell(0, 0)))]
    );
    assert!(!e.is_partial());
}

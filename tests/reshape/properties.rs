//! Properties that hold for every grid

use gridtrace_foundation::{Datum, Grid, Value};
use gridtrace_function::{Constant, Evaluable, Function, explain};
use gridtrace_part::{Part, Segment};
use gridtrace_reshape::{
    ApplyFormula, ColumnSum, Direction, MoveUnitsToHeader, Resize, Sort, Transpose,
};
use proptest::prelude::*;

fn grids() -> impl Strategy<Value = Grid> {
    (1usize..6, 1usize..6).prop_flat_map(|(width, height)| {
        prop::collection::vec(prop::collection::vec(-5i64..5, width), height).prop_map(|rows| {
            Grid::from_rows(
                rows.into_iter()
                    .map(|row| row.into_iter().map(Value::Int).collect())
                    .collect(),
            )
        })
    })
}

proptest! {
    #[test]
    fn transposing_twice_is_identity(grid in grids()) {
        let transpose = Transpose::new();
        let once = transpose.evaluate(&[grid.clone().into()]).unwrap();
        let twice = transpose.evaluate(&[once.grid(0).unwrap().clone().into()]).unwrap();
        prop_assert_eq!(twice.grid(0).unwrap(), &grid);
    }

    #[test]
    fn transposed_cells_explain_to_their_mirror(grid in grids(), c in 0usize..6, r in 0usize..6) {
        let transpose = Transpose::new();
        let run = transpose.evaluate(&[grid.clone().into()]).unwrap();
        prop_assume!(c < grid.height() && r < grid.width());
        let e = explain(&transpose, &run, &Part::output(0).then(Segment::cell(c, r)));
        prop_assert_eq!(e.sources()[0].1, &Part::input(0).then(Segment::cell(r, c)));
    }

    #[test]
    fn sorting_is_deterministic(grid in grids(), row in 0usize..6) {
        let sort = Sort::new().by(0, Direction::Descending);
        let input: Datum = grid.clone().into();
        let first = sort.evaluate(std::slice::from_ref(&input)).unwrap();
        let second = sort.evaluate(std::slice::from_ref(&input)).unwrap();
        prop_assert_eq!(first.grid(0).unwrap(), second.grid(0).unwrap());

        prop_assume!(row < grid.height());
        let part = Part::output(0).then(Segment::Row(row));
        prop_assert_eq!(explain(&sort, &first, &part), explain(&sort, &second, &part));
    }

    #[test]
    fn sorting_keeps_every_row(grid in grids()) {
        let sort = Sort::new().by(0, Direction::Ascending);
        let run = sort.evaluate(&[grid.clone().into()]).unwrap();
        let output = run.grid(0).unwrap();
        prop_assert_eq!(output.height(), grid.height());
        let mut before = grid.column_values(0);
        let mut after = output.column_values(0);
        before.sort_by(Value::compare);
        after.sort_by(Value::compare);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn resized_padding_is_unexplained(grid in grids(), width in 1usize..8, height in 1usize..8) {
        let resize = Resize::new(width, height);
        let run = resize.evaluate(&[grid.clone().into()]).unwrap();
        let output = run.grid(0).unwrap();
        prop_assert_eq!((output.width(), output.height()), (width, height));
        let (c, r) = (width - 1, height - 1);
        let e = explain(&resize, &run, &Part::output(0).then(Segment::cell(c, r)));
        prop_assert_eq!(e.is_partial(), !grid.contains(c, r));
    }

    #[test]
    fn locations_past_the_output_are_unexplained(grid in grids()) {
        let operators: Vec<Box<dyn Function>> = vec![
            Box::new(Transpose::new()),
            Box::new(Resize::new(3, 2)),
            Box::new(Sort::new().by(0, Direction::Ascending)),
            Box::new(ColumnSum::new()),
            Box::new(MoveUnitsToHeader::new()),
            Box::new(ApplyFormula::new().set(0, 0, Constant::new(1)).unwrap()),
        ];
        for operator in &operators {
            let run = operator.evaluate(&[grid.clone().into()]).unwrap();
            let output = run.grid(0).unwrap();
            let (width, height) = (output.width(), output.height());
            for outside in [
                Segment::cell(width, 0),
                Segment::cell(0, height),
                Segment::Row(height),
                Segment::Column(width),
            ] {
                let e = explain(operator.as_ref(), &run, &Part::output(0).then(outside));
                prop_assert!(e.is_partial(), "{} explained {:?}", operator.name(), e.sources());
            }
        }
    }
}

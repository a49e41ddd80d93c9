//! Duplicate elimination holds for arbitrary inputs

use std::collections::HashSet;

use gridtrace_foundation::{Grid, SameKey, Value};
use gridtrace_function::Evaluable;
use gridtrace_relational::{Intersection, Projection, Union};
use proptest::prelude::*;

/// A relation labelled `a`, `b` with small values so duplicates are common.
fn relations() -> impl Strategy<Value = Grid> {
    prop::collection::vec((0i64..3, prop_oneof![Just(0.0f64), Just(1.0), Just(1.5)]), 0..12)
        .prop_map(|rows| {
            let mut all = vec![vec![Value::from("a"), Value::from("b")]];
            all.extend(rows.into_iter().map(|(a, b)| vec![Value::Int(a), Value::number(b)]));
            Grid::from_rows(all)
        })
}

fn data_keys(grid: &Grid) -> Vec<SameKey> {
    (1..grid.height())
        .map(|row| SameKey::new(grid.row_values(row)))
        .collect()
}

/// First-seen order of the distinct keys.
fn first_seen(keys: impl IntoIterator<Item = SameKey>) -> Vec<SameKey> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #[test]
    fn union_is_first_seen_distinct(a in relations(), b in relations()) {
        let run = Union::new(2).evaluate(&[a.clone().into(), b.clone().into()]).unwrap();
        let output = data_keys(run.grid(0).unwrap());
        let expected = first_seen(data_keys(&a).into_iter().chain(data_keys(&b)));
        prop_assert_eq!(output, expected);
    }

    #[test]
    fn intersection_has_no_duplicates(a in relations(), b in relations()) {
        let run = Intersection::new(2).evaluate(&[a.clone().into(), b.clone().into()]).unwrap();
        let output = data_keys(run.grid(0).unwrap());
        let distinct: HashSet<SameKey> = output.iter().cloned().collect();
        prop_assert_eq!(distinct.len(), output.len());

        let theirs: HashSet<SameKey> = data_keys(&b).into_iter().collect();
        let expected: Vec<SameKey> = first_seen(data_keys(&a))
            .into_iter()
            .filter(|k| theirs.contains(k))
            .collect();
        prop_assert_eq!(output, expected);
    }

    #[test]
    fn projection_has_no_duplicates(a in relations()) {
        let run = Projection::new(["a"]).evaluate(&[a.clone().into()]).unwrap();
        let output = data_keys(run.grid(0).unwrap());
        let expected = first_seen(
            (1..a.height()).map(|row| SameKey::new([a.get(0, row).unwrap().clone()])),
        );
        prop_assert_eq!(output, expected);
    }
}

//! Integration tests for Grid and CellName

use gridtrace_foundation::{CellName, ErrorKind, Grid, Value, column_letters, grid};
use proptest::prelude::*;

#[test]
fn named_access() {
    let g = grid![["A", "B"], [1, 2], [3, 4]];
    assert_eq!(g.get_named("B3").unwrap(), &Value::Int(4));
    assert!(matches!(
        g.get_named("C1").unwrap_err().kind,
        ErrorKind::OutOfBounds { .. }
    ));
    assert!(matches!(
        g.get_named("1A").unwrap_err().kind,
        ErrorKind::InvalidCellName(_)
    ));
}

#[test]
fn labels_find_columns() {
    let g = grid![["name", "size"], ["a", 1]];
    assert_eq!(g.column_of("size"), Some(1));
    assert_eq!(g.column_of("weight"), None);
}

#[test]
fn clones_are_independent() {
    let original = grid![[1, 2]];
    let mut copy = original.clone();
    copy.set(0, 0, 9).unwrap();
    assert_eq!(original.get(0, 0).unwrap(), &Value::Int(1));
    assert_eq!(copy.get(0, 0).unwrap(), &Value::Int(9));
}

#[test]
fn writes_out_of_bounds_fail() {
    let mut g = Grid::new(2, 2);
    assert!(g.set(2, 0, 1).is_err());
    assert!(g.try_get(0, 2).is_none());
}

#[test]
fn cell_names_round_trip_through_text() {
    let name = CellName::parse("ABF12").unwrap();
    assert_eq!(name, CellName::new(733, 11));
    assert_eq!(name.to_string(), "ABF12");
    assert!(CellName::parse("A0").is_err());
    assert!(CellName::parse("").is_err());
}

proptest! {
    #[test]
    fn column_letters_parse_back(column in 0usize..100_000, row in 0usize..1000) {
        let name = CellName::new(column, row);
        prop_assert_eq!(CellName::parse(&name.to_string()).unwrap(), name);
        prop_assert!(column_letters(column).chars().all(|c| c.is_ascii_uppercase()));
    }
}

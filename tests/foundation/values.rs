//! Integration tests for Value
//!
//! Tests "same" equality, cross-type ordering, arithmetic, and quantities.

use std::cmp::Ordering;
use std::collections::HashSet;

use gridtrace_foundation::{Quantity, SameKey, Type, Unit, Value};
use proptest::prelude::*;

fn q(magnitude: f64, unit: &str) -> Value {
    Value::Quantity(Quantity::new(magnitude, Unit::lookup(unit).unwrap()))
}

// =============================================================================
// Same Equality
// =============================================================================

#[test]
fn numbers_are_the_same_across_representations() {
    assert!(Value::Int(3).same(&Value::Float(3.0)));
    assert!(!Value::Int(3).same(&Value::from("3")));
    assert!(Value::Nil.same(&Value::Nil));
    assert!(!Value::Nil.same(&Value::Int(0)));
}

#[test]
fn quantities_compare_in_base_units() {
    assert!(q(1.0, "km").same(&q(1000.0, "m")));
    assert!(!q(1.0, "kg").same(&q(1000.0, "m")));
}

#[test]
fn same_keys_deduplicate_rows() {
    let mut seen = HashSet::new();
    assert!(seen.insert(SameKey::new([Value::Int(1), Value::from("a")])));
    assert!(!seen.insert(SameKey::new([Value::Float(1.0), Value::from("a")])));
    assert!(seen.insert(SameKey::new([Value::Float(1.5), Value::from("a")])));
}

// =============================================================================
// Ordering and Arithmetic
// =============================================================================

#[test]
fn kinds_order_before_values() {
    assert_eq!(Value::Nil.compare(&Value::Bool(false)), Ordering::Less);
    assert_eq!(Value::Int(9).compare(&Value::from("a")), Ordering::Less);
    assert_eq!(Value::Int(2).compare(&Value::Float(1.5)), Ordering::Greater);
}

#[test]
fn nil_is_the_identity_of_plus() {
    assert_eq!(Value::Nil.plus(&Value::Int(4)).unwrap(), Value::Int(4));
    assert_eq!(Value::Int(4).plus(&Value::Nil).unwrap(), Value::Int(4));
    assert!(Value::Int(1).plus(&Value::from("x")).is_err());
}

#[test]
fn number_prefers_integers() {
    assert_eq!(Value::number(2.0), Value::Int(2));
    assert_eq!(Value::number(0.5), Value::Float(0.5));
}

#[test]
fn types_display_lowercase() {
    assert_eq!(Value::Int(1).value_type(), Type::Int);
    assert_eq!(Type::Int.to_string(), "int");
    assert!(Type::Int.compatible_with(Type::Float));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn same_is_symmetric(a in -1000i64..1000, b in -1000i64..1000) {
        let (x, y) = (Value::Int(a), Value::Float(b as f64));
        prop_assert_eq!(x.same(&y), y.same(&x));
        prop_assert_eq!(x.same(&y), a == b);
    }

    #[test]
    fn compare_agrees_with_same_on_numbers(a in -1000i64..1000, b in -1000i64..1000) {
        let (x, y) = (Value::Int(a), Value::Float(b as f64));
        prop_assert_eq!(x.compare(&y) == Ordering::Equal, x.same(&y));
    }
}

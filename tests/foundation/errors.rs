//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use gridtrace_foundation::{Error, ErrorKind, Type};

#[test]
fn arity_mismatch_names_both_counts() {
    let err = Error::arity_mismatch(2, 3);
    assert!(matches!(err.kind, ErrorKind::ArityMismatch { expected: 2, actual: 3 }));
    let msg = err.to_string();
    assert!(msg.contains('2') && msg.contains('3'));
}

#[test]
fn type_mismatch_display() {
    let err = Error::type_mismatch(Type::Grid, Type::String);
    assert_eq!(err.to_string(), "type mismatch: expected grid, got string");
}

#[test]
fn configuration_and_signature_messages() {
    let err = Error::configuration("no column is labelled 'Z'");
    assert!(err.to_string().contains("'Z'"));
    let err = Error::incompatible_signature("width 2 against width 3");
    assert!(matches!(err.kind, ErrorKind::IncompatibleSignature(_)));
}

#[test]
fn operations_stack_innermost_first() {
    let err = Error::unit_mismatch("m", "kg")
        .in_operation("MoveUnitsToHeader")
        .in_operation("pipeline");
    let context = err.context.unwrap();
    assert_eq!(context.stack, vec!["MoveUnitsToHeader", "pipeline"]);
    assert_eq!(context.to_string(), "  in MoveUnitsToHeader\n  in pipeline\n");
}

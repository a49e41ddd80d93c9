//! Integration tests for text ingestion

use gridtrace_foundation::{
    Quantity, ReadOptions, Separator, Span, Unit, Value, grid, read_grid,
};

#[test]
fn csv_with_comments_and_types() {
    let scan = read_grid("# header\nname, len\nrope, 2 km\nflag, true\n", &ReadOptions::csv());
    assert_eq!(
        scan.grid,
        grid![
            ["name", "len"],
            ["rope", Value::Quantity(Quantity::new(2.0, Unit::lookup("km").unwrap()))],
            ["flag", true]
        ]
    );
}

#[test]
fn spans_point_into_the_source() {
    let text = "a,bb\nccc,d\n";
    let scan = read_grid(text, &ReadOptions::csv());
    assert_eq!(scan.span(1, 0), Some(Span::new(2, 4)));
    assert_eq!(scan.span(0, 1), Some(Span::new(5, 8)));
    let chars: Vec<char> = text.chars().collect();
    let Span { start, end } = scan.span(0, 1).unwrap();
    assert_eq!(chars[start..end].iter().collect::<String>(), "ccc");
}

#[test]
fn whitespace_and_raw_text() {
    let options = ReadOptions::whitespace().with_infer_types(false);
    let scan = read_grid("  1   2\n3\n", &options);
    assert_eq!(scan.grid, grid![["1", "2"], ["3", Value::Nil]]);
    assert_eq!(scan.span(1, 1), None);
    assert_eq!(options.separator, Separator::Whitespace);
}

#[test]
fn tsv_keeps_empty_fields() {
    let scan = read_grid("a\t\tc\n", &ReadOptions::tsv());
    assert_eq!(scan.grid, grid![["a", Value::Nil, "c"]]);
}

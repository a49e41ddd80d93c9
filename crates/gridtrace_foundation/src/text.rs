//! Line-oriented text ingestion.
//!
//! Turns delimited text into a [`Grid`] while remembering, for every cell,
//! the character span of the source text it was read from. Those spans let
//! a later lineage query walk from a cell back to raw text offsets.

use crate::grid::Grid;
use crate::unit::{Quantity, Unit};
use crate::value::Value;

/// How fields on a line are separated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separator {
    /// A single separator character.
    Char(char),
    /// Runs of whitespace.
    Whitespace,
}

/// Options for reading a grid from text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field separator.
    pub separator: Separator,
    /// Lines starting with this prefix (after leading whitespace) are skipped.
    pub comment_prefix: Option<String>,
    /// Whether surrounding whitespace is stripped from fields.
    pub trim: bool,
    /// Whether numbers, booleans, and quantities are recognized.
    pub infer_types: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::csv()
    }
}

impl ReadOptions {
    /// Comma-separated fields, `#` comments.
    #[must_use]
    pub fn csv() -> Self {
        Self {
            separator: Separator::Char(','),
            comment_prefix: Some("#".to_string()),
            trim: true,
            infer_types: true,
        }
    }

    /// Tab-separated fields, `#` comments.
    #[must_use]
    pub fn tsv() -> Self {
        Self {
            separator: Separator::Char('\t'),
            ..Self::csv()
        }
    }

    /// Whitespace-separated fields, `#` comments.
    #[must_use]
    pub fn whitespace() -> Self {
        Self {
            separator: Separator::Whitespace,
            ..Self::csv()
        }
    }

    /// Builder method to set the separator.
    #[must_use]
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Builder method to set (or clear) the comment prefix.
    #[must_use]
    pub fn with_comment_prefix(mut self, prefix: Option<&str>) -> Self {
        self.comment_prefix = prefix.map(str::to_string);
        self
    }

    /// Builder method to enable/disable trimming.
    #[must_use]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Builder method to enable/disable type inference.
    #[must_use]
    pub fn with_infer_types(mut self, infer: bool) -> Self {
        self.infer_types = infer;
        self
    }
}

/// Half-open character interval in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// First character (inclusive).
    pub start: usize,
    /// End character (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// A grid read from text together with the source span of each cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Scan {
    /// The values read.
    pub grid: Grid,
    spans: Vec<Vec<Span>>,
}

impl Scan {
    /// Returns the source span of a cell; padding cells have none.
    #[must_use]
    pub fn span(&self, column: usize, row: usize) -> Option<Span> {
        self.spans.get(row)?.get(column).copied()
    }
}

/// Reads a grid from text.
///
/// One row is produced per line that is neither blank nor a comment; rows
/// shorter than the widest are right-padded with nil.
#[must_use]
pub fn read_grid(text: &str, options: &ReadOptions) -> Scan {
    let mut rows = Vec::new();
    let mut spans = Vec::new();
    let mut line_start = 0;

    for raw_line in text.split_inclusive('\n') {
        let line = raw_line.trim_end_matches(['\n', '\r']);
        let offset = line_start;
        line_start += raw_line.chars().count();

        let content = line.trim_start();
        if content.is_empty() {
            continue;
        }
        if let Some(prefix) = &options.comment_prefix {
            if !prefix.is_empty() && content.starts_with(prefix.as_str()) {
                continue;
            }
        }

        let chars: Vec<char> = line.chars().collect();
        let mut row = Vec::new();
        let mut row_spans = Vec::new();
        for (start, end) in fields(&chars, options) {
            let field: String = chars[start..end].iter().collect();
            row.push(parse_field(&field, options.infer_types));
            row_spans.push(Span::new(offset + start, offset + end));
        }
        rows.push(row);
        spans.push(row_spans);
    }

    Scan {
        grid: Grid::from_rows(rows),
        spans,
    }
}

/// Splits a line into field character ranges.
fn fields(chars: &[char], options: &ReadOptions) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    match options.separator {
        Separator::Whitespace => {
            let mut start = None;
            for (i, c) in chars.iter().enumerate() {
                match (c.is_whitespace(), start) {
                    (false, None) => start = Some(i),
                    (true, Some(s)) => {
                        out.push((s, i));
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(s) = start {
                out.push((s, chars.len()));
            }
        }
        Separator::Char(sep) => {
            let mut start = 0;
            for (i, c) in chars.iter().enumerate() {
                if *c == sep {
                    out.push((start, i));
                    start = i + 1;
                }
            }
            out.push((start, chars.len()));
            if options.trim {
                for (s, e) in &mut out {
                    while *s < *e && chars[*s].is_whitespace() {
                        *s += 1;
                    }
                    while *e > *s && chars[*e - 1].is_whitespace() {
                        *e -= 1;
                    }
                }
            }
        }
    }
    out
}

/// Parses a field into a value.
fn parse_field(field: &str, infer: bool) -> Value {
    if field.is_empty() {
        return Value::Nil;
    }
    if !infer {
        return Value::from(field);
    }
    match field {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = field.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(f) = field.parse::<f64>() {
        return Value::Float(f);
    }
    if let Some((magnitude, unit)) = field.rsplit_once(' ') {
        if let (Ok(m), Some(u)) = (magnitude.trim().parse::<f64>(), Unit::lookup(unit)) {
            return Value::Quantity(Quantity::new(m, u));
        }
    }
    Value::from(field)
}

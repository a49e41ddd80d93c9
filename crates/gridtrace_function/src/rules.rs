//! Explanation rules shared by every operator that records origins.
//!
//! Operators whose outputs are grids rarely need their own explanation
//! logic: they record an [`OriginGrid`] or a [`RowTrace`] while evaluating
//! and delegate `explain` to the functions here.

use gridtrace_explain::{Connective, NodeFactory, NodeId, NodeKind};
use gridtrace_part::{CharRange, Part, Segment, SegmentKind, SubjectId};

use crate::evaluation::{Evaluation, Trace};
use crate::function::{Evaluable, enter};
use crate::origin::{OriginGrid, Origins, RowTrace, Source};

// =============================================================================
// Origin Linking
// =============================================================================

fn source_nodes(
    factory: &mut NodeFactory,
    subject: SubjectId,
    sources: &[Source],
    suffix: &Part,
) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = Vec::with_capacity(sources.len());
    for source in sources {
        let id = factory.part_node(subject, &source.part(suffix));
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Links `origins` (refined by `suffix`) under `parent`.
pub fn link_origins(
    factory: &mut NodeFactory,
    subject: SubjectId,
    parent: NodeId,
    origins: &Origins,
    suffix: &Part,
) {
    match origins {
        Origins::Unknown => factory.link_unknown(parent),
        Origins::Intrinsic => {}
        Origins::Sources {
            connective,
            sources,
        } => {
            let ids = source_nodes(factory, subject, sources, suffix);
            factory.connect(parent, &ids, *connective);
        }
    }
}

/// Returns a single node standing for `origins`, or `None` if there is
/// nothing to link (intrinsic values, or unknown when explicit unknowns
/// are disabled).
pub fn origin_node(
    factory: &mut NodeFactory,
    subject: SubjectId,
    origins: &Origins,
    suffix: &Part,
) -> Option<NodeId> {
    match origins {
        Origins::Unknown => factory.config().link_unknown.then(|| factory.unknown()),
        Origins::Intrinsic => None,
        Origins::Sources {
            connective,
            sources,
        } => {
            let ids = source_nodes(factory, subject, sources, suffix);
            Some(factory.combine(&ids, *connective))
        }
    }
}

// =============================================================================
// Cell Tables
// =============================================================================

/// Explains `part` of output 0 from a per-cell origin table.
///
/// Cells link to their recorded origins (keeping any char range of the
/// query); whole rows and columns link, in conjunction, to the
/// explanations of their cells; the whole output links to every input
/// the table references.
pub fn explain_cells<F>(
    function: &F,
    origins: &OriginGrid,
    part: &Part,
    factory: &mut NodeFactory,
) -> NodeId
where
    F: Evaluable + ?Sized,
{
    let (root, done) = enter(function, part, factory);
    if done {
        return root;
    }
    let subject = function.subject();
    let Some(rest) = output_rest(part, 0) else {
        factory.link_unknown(root);
        return root;
    };
    match rest.root() {
        None => link_inputs(factory, subject, root, &origins.inputs()),
        Some(&Segment::Cell { column, row }) => {
            let suffix = rest.below(SegmentKind::Cell).unwrap_or_default();
            link_cell(factory, subject, root, origins, column, row, &suffix);
        }
        Some(&Segment::Row(row)) => {
            let ids: Vec<NodeId> = (0..origins.width())
                .map(|column| explain_cells(function, origins, &cell_part(column, row), factory))
                .collect();
            connect_checked(factory, root, &ids, row < origins.height());
        }
        Some(&Segment::Column(column)) => {
            let ids: Vec<NodeId> = (0..origins.height())
                .map(|row| explain_cells(function, origins, &cell_part(column, row), factory))
                .collect();
            connect_checked(factory, root, &ids, column < origins.width());
        }
        Some(_) => factory.link_unknown(root),
    }
    root
}

fn link_cell(
    factory: &mut NodeFactory,
    subject: SubjectId,
    root: NodeId,
    origins: &OriginGrid,
    column: usize,
    row: usize,
    suffix: &Part,
) {
    let Some(cell) = origins.get(column, row) else {
        factory.link_unknown(root);
        return;
    };
    let Some(mark) = origins.mark_at(column, row) else {
        link_origins(factory, subject, root, cell, suffix);
        return;
    };

    let mut ids = Vec::new();
    match suffix.chars() {
        None => {
            ids.extend(origin_node(factory, subject, cell, suffix));
            ids.extend(origin_node(factory, subject, &mark.origins, &Part::nothing()));
        }
        Some(query) => {
            let fragments = query.fragment(&mark.range);
            let base = CharRange::new(0, mark.base_len);
            // chars past the original text were inserted by the operator
            for piece in fragments.outside {
                let Some(refined) = piece
                    .intersect(&base)
                    .and_then(|r| suffix.replace(SegmentKind::Chars, Segment::Chars(r)))
                else {
                    continue;
                };
                ids.extend(origin_node(factory, subject, cell, &refined));
            }
            if fragments.inside.is_some() {
                ids.extend(origin_node(factory, subject, &mark.origins, &Part::nothing()));
            }
        }
    }
    ids.dedup();
    if ids.is_empty() {
        factory.link_unknown(root);
    } else {
        factory.connect(root, &ids, Connective::And);
    }
}

// =============================================================================
// Row Tables
// =============================================================================

/// Explains `part` of output 0 from a per-row origin table.
///
/// Rows link to their recorded source rows; cells link to the matching
/// cell of every source row (through the column mapping), under the row's
/// connective.
pub fn explain_rows<F>(
    function: &F,
    trace: &RowTrace,
    part: &Part,
    factory: &mut NodeFactory,
) -> NodeId
where
    F: Evaluable + ?Sized,
{
    let (root, done) = enter(function, part, factory);
    if done {
        return root;
    }
    let subject = function.subject();
    let Some(rest) = output_rest(part, 0) else {
        factory.link_unknown(root);
        return root;
    };
    match rest.root() {
        None => {
            let mut pins: Vec<usize> = trace
                .rows
                .iter()
                .flat_map(Origins::sources)
                .map(Source::input)
                .collect();
            pins.sort_unstable();
            pins.dedup();
            link_inputs(factory, subject, root, &pins);
        }
        Some(&Segment::Row(row)) => match trace.row(row) {
            Some(origins) => link_origins(factory, subject, root, origins, &Part::nothing()),
            None => factory.link_unknown(root),
        },
        Some(&Segment::Cell { column, row }) => {
            let suffix = rest.below(SegmentKind::Cell).unwrap_or_default();
            match (trace.row(row), trace.column(column)) {
                (Some(origins), Some(source_column)) => {
                    let cells = row_cells(origins, source_column);
                    link_origins(factory, subject, root, &cells, &suffix);
                }
                _ => factory.link_unknown(root),
            }
        }
        Some(&Segment::Column(column)) => {
            let ids: Vec<NodeId> = (0..trace.rows.len())
                .map(|row| explain_rows(function, trace, &cell_part(column, row), factory))
                .collect();
            connect_checked(factory, root, &ids, column < trace.columns.len());
        }
        Some(_) => factory.link_unknown(root),
    }
    root
}

/// Maps the row sources of `origins` to the cell in `column` of each row.
#[must_use]
pub fn row_cells(origins: &Origins, column: usize) -> Origins {
    match origins {
        Origins::Sources {
            connective,
            sources,
        } => Origins::Sources {
            connective: *connective,
            sources: sources
                .iter()
                .map(|source| match *source {
                    Source::Row { input, row } => Source::cell(input, column, row),
                    ref other => other.clone(),
                })
                .collect(),
        },
        other => other.clone(),
    }
}

/// Explains `part` from whichever origin table `run` recorded.
///
/// Runs without a cell or row table explain to the unknown sentinel.
pub fn explain_traced<F>(
    function: &F,
    run: &Evaluation,
    part: &Part,
    factory: &mut NodeFactory,
) -> NodeId
where
    F: Evaluable + ?Sized,
{
    match run.trace() {
        Trace::Cells(origins) => explain_cells(function, origins, part, factory),
        Trace::Rows(rows) | Trace::Filtered { rows, .. } => {
            explain_rows(function, rows, part, factory)
        }
        Trace::Direct | Trace::Inputs(_) | Trace::Nested(_) => {
            let (root, done) = enter(function, part, factory);
            if !done {
                factory.link_unknown(root);
            }
            root
        }
    }
}

// =============================================================================
// Pass-Through and Rewriting
// =============================================================================

/// Explains an output that is a verbatim copy of input `input`: the
/// designator is rewritten from the output pin to the input pin.
pub fn explain_pass_through<F>(
    function: &F,
    part: &Part,
    input: usize,
    factory: &mut NodeFactory,
) -> NodeId
where
    F: Evaluable + ?Sized,
{
    let (root, done) = enter(function, part, factory);
    if done {
        return root;
    }
    match part.output_to_input(input) {
        Some(source) => {
            let leaf = factory.part_node(function.subject(), &source);
            factory.link(root, leaf);
        }
        None => factory.link_unknown(root),
    }
    root
}

/// Calls `rewrite` for every childless leaf of `subject` reachable from
/// `root`, passing the leaf and its designator.
///
/// Used to splice the explanation of a contained transformation into its
/// container: the container links, below each of the contained
/// transformation's input leaves, whatever feeds that input.
pub fn rewrite_leaves<R>(factory: &mut NodeFactory, root: NodeId, subject: SubjectId, mut rewrite: R)
where
    R: FnMut(&mut NodeFactory, NodeId, &Part),
{
    let targets: Vec<(NodeId, Part)> = factory
        .graph()
        .leaves(root)
        .into_iter()
        .filter_map(|id| match factory.graph().kind(id) {
            NodeKind::Part { subject: s, part } if *s == subject => Some((id, part.clone())),
            _ => None,
        })
        .collect();
    for (id, part) in targets {
        rewrite(factory, id, &part);
    }
}

// =============================================================================
// Small Helpers
// =============================================================================

/// Returns the segments below `Output(pin)`, if `part` is rooted there.
#[must_use]
pub fn output_rest(part: &Part, pin: usize) -> Option<Part> {
    match part.root() {
        Some(Segment::Output(p)) if *p == pin => part.below(SegmentKind::Output),
        _ => None,
    }
}

/// Designator of a cell of output 0.
#[must_use]
pub fn cell_part(column: usize, row: usize) -> Part {
    Part::output(0).then(Segment::cell(column, row))
}

fn link_inputs(factory: &mut NodeFactory, subject: SubjectId, root: NodeId, pins: &[usize]) {
    let ids: Vec<NodeId> = pins
        .iter()
        .map(|&pin| factory.part_node(subject, &Part::input(pin)))
        .collect();
    factory.connect(root, &ids, Connective::And);
}

fn connect_checked(factory: &mut NodeFactory, root: NodeId, ids: &[NodeId], in_range: bool) {
    if in_range {
        factory.connect(root, ids, Connective::And);
    } else {
        factory.link_unknown(root);
    }
}

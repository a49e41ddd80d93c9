//! Integration tests for explanation graphs

use gridtrace_explain::{
    Connective, ExplainConfig, NodeFactory, NodeKind, PrettyOptions,
};
use gridtrace_part::{Part, Segment, SubjectId};
use proptest::prelude::*;

fn row(input: usize, row: usize) -> Part {
    Part::input(input).then(Segment::Row(row))
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn shared_leaves_make_a_dag() {
    let mut f = NodeFactory::new();
    let s = SubjectId::fresh();
    let root = f.part_node(s, &Part::output(0).then(Segment::cell(0, 1)));
    let left = f.part_node(s, &row(0, 1));
    let right = f.part_node(s, &row(1, 3));
    let shared = f.part_node(s, &row(0, 1));
    f.connect(root, &[left, right, shared], Connective::Or);
    let e = f.finish(root);

    // root, connector, two distinct leaves
    assert_eq!(e.node_count(), 4);
    let sources: Vec<&Part> = e.sources().into_iter().map(|(_, p)| p).collect();
    assert_eq!(sources, vec![&row(0, 1), &row(1, 3)]);
}

#[test]
fn leaves_with_children_are_not_sources() {
    let mut f = NodeFactory::new();
    let outer = SubjectId::fresh();
    let inner = SubjectId::fresh();
    let root = f.part_node(outer, &Part::output(0));
    let hop = f.part_node(inner, &Part::output(0));
    let source = f.part_node(inner, &Part::input(0));
    f.link(root, hop);
    f.link(hop, source);
    let e = f.finish(root);
    assert_eq!(e.sources(), vec![(inner, &Part::input(0))]);
    assert_eq!(e.depth(), 2);
}

#[test]
fn quiet_unknowns_leave_no_trace() {
    let config = ExplainConfig::default().with_link_unknown(false);
    let mut f = NodeFactory::with_config(config);
    let root = f.part_node(SubjectId::fresh(), &Part::output(0));
    f.link_unknown(root);
    let e = f.finish(root);
    assert!(!e.is_partial());
    assert_eq!(e.sources().len(), 1);
}

#[test]
fn shallow_guard_refuses_third_hop() {
    let mut f = NodeFactory::with_config(ExplainConfig::shallow());
    assert!(f.descend());
    assert!(f.descend());
    assert!(!f.descend());
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn rendering_names_subjects() {
    let mut f = NodeFactory::new();
    let s = SubjectId::fresh();
    f.label(s, "Intersection");
    let root = f.part_node(s, &Part::output(0).then(Segment::Row(1)));
    let a = f.part_node(s, &row(0, 1));
    let b = f.part_node(s, &row(1, 2));
    f.connect(root, &[a, b], Connective::And);
    let e = f.finish(root);
    let text = e.to_pretty(&PrettyOptions::new().with_indent(4));
    assert!(text.contains("\n    all of\n"));
    assert!(text.contains("        Intersection"));
    assert_eq!(e.label_of(s), Some("Intersection"));
}

proptest! {
    #[test]
    fn sources_are_unique(pairs in prop::collection::vec((0usize..3, 0usize..3), 1..12)) {
        let mut f = NodeFactory::new();
        let s = SubjectId::fresh();
        let root = f.part_node(s, &Part::output(0));
        let leaves: Vec<_> = pairs.iter().map(|&(i, r)| f.part_node(s, &row(i, r))).collect();
        f.connect(root, &leaves, Connective::And);
        let e = f.finish(root);
        let sources = e.sources();
        for (i, a) in sources.iter().enumerate() {
            for b in &sources[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
        if let Some(connector) = e.children(e.root()).first() {
            prop_assert!(matches!(e.kind(*connector), NodeKind::And | NodeKind::Part { .. }), "connector must be And or Part");
        }
    }
}

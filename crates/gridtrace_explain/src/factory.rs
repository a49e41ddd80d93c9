//! Memoizing node construction.
//!
//! Every explanation algorithm builds its graph through a [`NodeFactory`]:
//! leaves are interned by (subject, designator), connectors are always fresh,
//! and the unknown sentinel is shared.

use std::collections::HashMap;

use tracing::warn;

use gridtrace_part::{Part, SubjectId};

use crate::config::ExplainConfig;
use crate::graph::ExplanationGraph;
use crate::node::{Connective, NodeId, NodeKind};
use crate::render::Explanation;

/// Builds explanation graphs with leaf interning and a recursion guard.
#[derive(Clone, Debug, Default)]
pub struct NodeFactory {
    graph: ExplanationGraph,
    leaves: HashMap<(SubjectId, Part), NodeId>,
    labels: HashMap<SubjectId, String>,
    config: ExplainConfig,
    depth: usize,
}

impl NodeFactory {
    /// Creates a factory with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory with the given configuration.
    #[must_use]
    pub fn with_config(config: ExplainConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    /// Returns the graph built so far.
    #[must_use]
    pub fn graph(&self) -> &ExplanationGraph {
        &self.graph
    }

    // =========================================================================
    // Node Creation
    // =========================================================================

    /// Returns the leaf for `part` of `subject`, creating it on first request.
    ///
    /// Repeated requests for the same location return the same node.
    pub fn part_node(&mut self, subject: SubjectId, part: &Part) -> NodeId {
        if let Some(&id) = self.leaves.get(&(subject, part.clone())) {
            return id;
        }
        let id = self.graph.push(NodeKind::Part {
            subject,
            part: part.clone(),
        });
        self.leaves.insert((subject, part.clone()), id);
        id
    }

    /// Returns true if a leaf for `part` of `subject` already exists.
    #[must_use]
    pub fn has_part_node(&self, subject: SubjectId, part: &Part) -> bool {
        self.leaves.contains_key(&(subject, part.clone()))
    }

    /// Creates a fresh conjunction node.
    pub fn and_node(&mut self) -> NodeId {
        self.graph.push(NodeKind::And)
    }

    /// Creates a fresh disjunction node.
    pub fn or_node(&mut self) -> NodeId {
        self.graph.push(NodeKind::Or)
    }

    /// Creates a fresh connector of the given kind.
    pub fn connector(&mut self, connective: Connective) -> NodeId {
        self.graph.push(connective.into())
    }

    /// Returns the shared unknown sentinel.
    #[must_use]
    pub fn unknown(&self) -> NodeId {
        self.graph.unknown()
    }

    // =========================================================================
    // Linking
    // =========================================================================

    /// Links `child` under output 0 of `parent`.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        self.graph.link(parent, child);
    }

    /// Links `child` under the given output of `parent`.
    pub fn link_at(&mut self, parent: NodeId, output: usize, child: NodeId) {
        self.graph.link_at(parent, output, child);
    }

    /// Links the unknown sentinel under `parent` if the configuration asks
    /// for explicit unknowns.
    pub fn link_unknown(&mut self, parent: NodeId) {
        if self.config.link_unknown {
            let unknown = self.unknown();
            self.graph.link(parent, unknown);
        }
    }

    /// Links a set of origins under `parent`.
    ///
    /// No origins links the unknown sentinel; one origin links directly;
    /// two or more are gathered under a fresh connector first.
    pub fn connect(&mut self, parent: NodeId, origins: &[NodeId], connective: Connective) {
        match origins {
            [] => self.link_unknown(parent),
            [only] => self.graph.link(parent, *only),
            many => {
                let connector = self.connector(connective);
                for &origin in many {
                    self.graph.link(connector, origin);
                }
                self.graph.link(parent, connector);
            }
        }
    }

    /// Combines origins into a single node without a parent.
    ///
    /// Returns the unknown sentinel for no origins, the origin itself for
    /// one, and a fresh connector over all of them otherwise.
    pub fn combine(&mut self, origins: &[NodeId], connective: Connective) -> NodeId {
        match origins {
            [] => self.unknown(),
            [only] => *only,
            many => {
                let connector = self.connector(connective);
                for &origin in many {
                    self.graph.link(connector, origin);
                }
                connector
            }
        }
    }

    // =========================================================================
    // Labels
    // =========================================================================

    /// Records a human-readable name for a subject, used when rendering.
    pub fn label(&mut self, subject: SubjectId, name: impl Into<String>) {
        self.labels.entry(subject).or_insert_with(|| name.into());
    }

    /// Returns the recorded name of a subject.
    #[must_use]
    pub fn label_of(&self, subject: SubjectId) -> Option<&str> {
        self.labels.get(&subject).map(String::as_str)
    }

    // =========================================================================
    // Recursion Guard
    // =========================================================================

    /// Returns the current recursion depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enters one level of recursive explanation.
    ///
    /// Returns false (and logs a warning) if the configured depth limit is
    /// reached; the caller must then fall back to the unknown sentinel and
    /// must not call [`ascend`](Self::ascend).
    pub fn descend(&mut self) -> bool {
        if self.depth >= self.config.max_depth {
            warn!(
                max_depth = self.config.max_depth,
                "explanation depth limit reached, degrading to unknown"
            );
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leaves one level of recursive explanation.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Finishes building and returns the explanation rooted at `root`.
    #[must_use]
    pub fn finish(self, root: NodeId) -> Explanation {
        Explanation::new(self.graph, root, self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridtrace_part::Segment;

    fn cell(column: usize, row: usize) -> Part {
        Part::input(0).then(Segment::cell(column, row))
    }

    #[test]
    fn leaves_are_interned() {
        let mut f = NodeFactory::new();
        let s = SubjectId::fresh();
        let a = f.part_node(s, &cell(0, 0));
        let b = f.part_node(s, &cell(0, 0));
        let c = f.part_node(SubjectId::fresh(), &cell(0, 0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(f.has_part_node(s, &cell(0, 0)));
    }

    #[test]
    fn connectors_are_fresh() {
        let mut f = NodeFactory::new();
        assert_ne!(f.and_node(), f.and_node());
        assert_ne!(f.or_node(), f.or_node());
    }

    #[test]
    fn connect_single_origin_links_directly() {
        let mut f = NodeFactory::new();
        let s = SubjectId::fresh();
        let root = f.part_node(s, &Part::output(0));
        let origin = f.part_node(s, &cell(1, 1));
        f.connect(root, &[origin], Connective::Or);
        assert_eq!(f.graph().children(root), &[origin]);
    }

    #[test]
    fn connect_many_origins_uses_connector() {
        let mut f = NodeFactory::new();
        let s = SubjectId::fresh();
        let root = f.part_node(s, &Part::output(0));
        let a = f.part_node(s, &cell(0, 0));
        let b = f.part_node(s, &cell(0, 1));
        f.connect(root, &[a, b], Connective::And);
        let children = f.graph().children(root).to_vec();
        assert_eq!(children.len(), 1);
        assert_eq!(f.graph().kind(children[0]), &NodeKind::And);
        assert_eq!(f.graph().children(children[0]), &[a, b]);
    }

    #[test]
    fn connect_nothing_links_unknown() {
        let mut f = NodeFactory::new();
        let root = f.part_node(SubjectId::fresh(), &Part::output(0));
        f.connect(root, &[], Connective::And);
        assert_eq!(f.graph().children(root), &[f.unknown()]);

        let mut quiet = NodeFactory::with_config(ExplainConfig::default().with_link_unknown(false));
        let root = quiet.part_node(SubjectId::fresh(), &Part::output(0));
        quiet.connect(root, &[], Connective::And);
        assert!(quiet.graph().children(root).is_empty());
    }

    #[test]
    fn combine_follows_connector_rule() {
        let mut f = NodeFactory::new();
        let s = SubjectId::fresh();
        let a = f.part_node(s, &cell(0, 0));
        let b = f.part_node(s, &cell(1, 0));
        assert_eq!(f.combine(&[], Connective::Or), f.unknown());
        assert_eq!(f.combine(&[a], Connective::Or), a);
        let or = f.combine(&[a, b], Connective::Or);
        assert_eq!(f.graph().kind(or), &NodeKind::Or);
    }

    #[test]
    fn depth_guard() {
        let mut f = NodeFactory::with_config(ExplainConfig::default().with_max_depth(2));
        assert!(f.descend());
        assert!(f.descend());
        assert!(!f.descend());
        assert_eq!(f.depth(), 2);
        f.ascend();
        assert!(f.descend());
    }

    #[test]
    fn first_label_wins() {
        let mut f = NodeFactory::new();
        let s = SubjectId::fresh();
        f.label(s, "Sort");
        f.label(s, "Other");
        assert_eq!(f.label_of(s), Some("Sort"));
    }
}

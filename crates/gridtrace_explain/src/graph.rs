//! Arena-backed explanation DAG.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use gridtrace_part::{Part, SubjectId};

use crate::node::{Node, NodeId, NodeKind};

/// An explanation graph: nodes live in an arena and refer to each other by
/// [`NodeId`]. Leaf interning (see [`NodeFactory`](crate::NodeFactory))
/// turns what would be a tree into a shared DAG.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExplanationGraph {
    nodes: Vec<Node>,
    unknown: NodeId,
}

impl Default for ExplanationGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplanationGraph {
    /// Creates a graph holding only the shared unknown sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Unknown)],
            unknown: NodeId(0),
        }
    }

    /// Returns the shared unknown sentinel.
    #[must_use]
    pub fn unknown(&self) -> NodeId {
        self.unknown
    }

    /// Returns the number of nodes, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph holds nothing but the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Returns a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns a node's kind.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Returns the children linked under output 0.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children_at(id, 0)
    }

    /// Returns the children linked under the given output.
    #[must_use]
    pub fn children_at(&self, id: NodeId, output: usize) -> &[NodeId] {
        self.node(id).outputs.get(output).map_or(&[], Vec::as_slice)
    }

    /// Returns true if the node has at least one child.
    #[must_use]
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.node(id).is_leaf()
    }

    pub(crate) fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node::new(kind));
        id
    }

    /// Links `child` under output 0 of `parent`.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        self.link_at(parent, 0, child);
    }

    /// Links `child` under the given output of `parent`.
    ///
    /// Each output holds an ordered set: linking the same child twice, or a
    /// node to itself, is a no-op. The unknown sentinel never gets children.
    pub fn link_at(&mut self, parent: NodeId, output: usize, child: NodeId) {
        if parent == child || parent == self.unknown {
            return;
        }
        let outputs = &mut self.nodes[parent.index()].outputs;
        if outputs.len() <= output {
            outputs.resize_with(output + 1, Vec::new);
        }
        let links = &mut outputs[output];
        if !links.contains(&child) {
            links.push(child);
        }
    }

    /// Returns every node reachable from `root` (root included), each once,
    /// in depth-first preorder.
    #[must_use]
    pub fn reachable(&self, root: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            let children: Vec<NodeId> = self.node(id).all_children().collect();
            stack.extend(children.into_iter().rev());
        }
        order
    }

    /// Returns the reachable nodes that have no children.
    #[must_use]
    pub fn leaves(&self, root: NodeId) -> Vec<NodeId> {
        self.reachable(root)
            .into_iter()
            .filter(|&id| self.node(id).is_leaf())
            .collect()
    }

    /// Returns the (subject, part) of every reachable childless part node.
    #[must_use]
    pub fn part_leaves(&self, root: NodeId) -> Vec<(SubjectId, &Part)> {
        self.leaves(root)
            .into_iter()
            .filter_map(|id| match self.kind(id) {
                NodeKind::Part { subject, part } => Some((*subject, part)),
                _ => None,
            })
            .collect()
    }

    /// Returns true if the unknown sentinel is reachable from `root`.
    #[must_use]
    pub fn reaches_unknown(&self, root: NodeId) -> bool {
        self.reachable(root).contains(&self.unknown)
    }

    /// Finds a reachable part node for the given subject and designator.
    #[must_use]
    pub fn find_part(&self, root: NodeId, subject: SubjectId, part: &Part) -> Option<NodeId> {
        self.reachable(root).into_iter().find(|&id| {
            matches!(self.kind(id), NodeKind::Part { subject: s, part: p } if *s == subject && p == part)
        })
    }

    /// Returns the length of the longest path from `root` to a leaf
    /// (0 for a leaf). Links that close a cycle are ignored.
    #[must_use]
    pub fn depth(&self, root: NodeId) -> usize {
        let mut memo = HashMap::new();
        let mut on_path = HashSet::new();
        self.depth_of(root, &mut memo, &mut on_path)
    }

    fn depth_of(
        &self,
        id: NodeId,
        memo: &mut HashMap<NodeId, usize>,
        on_path: &mut HashSet<NodeId>,
    ) -> usize {
        if let Some(&d) = memo.get(&id) {
            return d;
        }
        on_path.insert(id);
        let children: Vec<NodeId> = self.node(id).all_children().collect();
        let mut best = 0;
        for child in children {
            if on_path.contains(&child) {
                continue;
            }
            best = best.max(1 + self.depth_of(child, memo, on_path));
        }
        on_path.remove(&id);
        memo.insert(id, best);
        best
    }
}

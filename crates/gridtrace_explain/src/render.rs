//! Finished explanations and their text rendering.

use std::collections::{HashMap, HashSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use gridtrace_part::{Part, SubjectId};

use crate::config::PrettyOptions;
use crate::graph::ExplanationGraph;
use crate::node::{NodeId, NodeKind};

/// A finished explanation: a graph, its root, and subject names.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Explanation {
    graph: ExplanationGraph,
    root: NodeId,
    labels: HashMap<SubjectId, String>,
}

impl Explanation {
    pub(crate) fn new(
        graph: ExplanationGraph,
        root: NodeId,
        labels: HashMap<SubjectId, String>,
    ) -> Self {
        Self {
            graph,
            root,
            labels,
        }
    }

    /// Returns the root node (the leaf for the requested location).
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &ExplanationGraph {
        &self.graph
    }

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.graph.kind(id)
    }

    /// Returns the children of a node's first output.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.graph.children(id)
    }

    /// Returns the (subject, part) of every reachable childless leaf:
    /// the ultimate sources of the explained location.
    #[must_use]
    pub fn sources(&self) -> Vec<(SubjectId, &Part)> {
        self.graph.part_leaves(self.root)
    }

    /// Returns the number of distinct reachable nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.reachable(self.root).len()
    }

    /// Returns the longest root-to-leaf path length.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.graph.depth(self.root)
    }

    /// Returns true if some part of the location could not be explained.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.graph.reaches_unknown(self.root)
    }

    /// Finds a reachable leaf for the given subject and designator.
    #[must_use]
    pub fn find(&self, subject: SubjectId, part: &Part) -> Option<NodeId> {
        self.graph.find_part(self.root, subject, part)
    }

    /// Returns the recorded name of a subject.
    #[must_use]
    pub fn label_of(&self, subject: SubjectId) -> Option<&str> {
        self.labels.get(&subject).map(String::as_str)
    }

    /// Renders the explanation as an indented tree.
    ///
    /// Nodes reached a second time are printed once more with a marker and
    /// not expanded again.
    #[must_use]
    pub fn to_pretty(&self, options: &PrettyOptions) -> String {
        let mut printer = Printer {
            explanation: self,
            options,
            output: String::new(),
            expanded: HashSet::new(),
        };
        printer.print(self.root, 0);
        printer.output
    }

    fn describe(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Part { subject, part } => match self.label_of(*subject) {
                Some(name) => format!("{name} {subject}: {part}"),
                None => format!("{subject}: {part}"),
            },
            NodeKind::And => "all of".to_string(),
            NodeKind::Or => "any of".to_string(),
            NodeKind::Unknown => "unknown".to_string(),
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_pretty(&PrettyOptions::default()).trim_end())
    }
}

struct Printer<'a> {
    explanation: &'a Explanation,
    options: &'a PrettyOptions,
    output: String,
    expanded: HashSet<NodeId>,
}

impl Printer<'_> {
    fn line(&mut self, level: usize, text: &str) {
        self.output
            .push_str(&" ".repeat(level * self.options.indent));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn print(&mut self, id: NodeId, level: usize) {
        let mut text = self.explanation.describe(id);
        if self.options.show_ids {
            text = format!("[{}] {text}", id.index());
        }
        let node = self.explanation.graph().node(id);
        if node.is_leaf() {
            self.line(level, &text);
            return;
        }
        if !self.expanded.insert(id) {
            text.push_str(" (see above)");
            self.line(level, &text);
            return;
        }
        self.line(level, &text);

        let outputs = node.outputs.clone();
        let labelled = outputs.len() > 1;
        for (pin, children) in outputs.iter().enumerate() {
            if children.is_empty() {
                continue;
            }
            let child_level = if labelled {
                self.line(level + 1, &format!("[output {pin}]"));
                level + 2
            } else {
                level + 1
            };
            for &child in children {
                self.print(child, child_level);
            }
        }
    }
}

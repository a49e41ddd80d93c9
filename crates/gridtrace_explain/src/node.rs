//! Explanation graph nodes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use gridtrace_part::{Part, SubjectId};

/// Stable handle to a node in an [`ExplanationGraph`](crate::ExplanationGraph).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// How the children of a connector combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Connective {
    /// All children were jointly necessary.
    And,
    /// Any one child alone would have been sufficient.
    Or,
}

/// The four kinds of explanation node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    /// "This part of this subject": the atomic assertion.
    Part {
        /// The subject the designator applies to.
        subject: SubjectId,
        /// The designated location.
        part: Part,
    },
    /// Conjunction: all children jointly necessary.
    And,
    /// Disjunction: any one child sufficient.
    Or,
    /// No explanation could be produced.
    Unknown,
}

impl NodeKind {
    /// Returns the connective of a connector node.
    #[must_use]
    pub const fn connective(&self) -> Option<Connective> {
        match self {
            Self::And => Some(Connective::And),
            Self::Or => Some(Connective::Or),
            Self::Part { .. } | Self::Unknown => None,
        }
    }
}

impl From<Connective> for NodeKind {
    fn from(c: Connective) -> Self {
        match c {
            Connective::And => Self::And,
            Connective::Or => Self::Or,
        }
    }
}

/// A node with one ordered child list per output pin.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// What the node asserts.
    pub kind: NodeKind,
    /// Child links, one list per output of the node.
    pub outputs: Vec<Vec<NodeId>>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            outputs: Vec::new(),
        }
    }

    /// Returns true if no output of this node has a child.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.outputs.iter().all(Vec::is_empty)
    }

    /// Iterates over the children of every output, in pin order.
    pub fn all_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outputs.iter().flatten().copied()
    }
}

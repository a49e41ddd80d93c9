//! Configuration for explanation queries and their rendering.

/// Configuration for building explanation graphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplainConfig {
    /// Maximum nesting of recursive explanation (formula chains, circuit
    /// hops). Deeper requests degrade to the unknown sentinel.
    pub max_depth: usize,

    /// Whether locations no rule covers get an explicit unknown child.
    pub link_unknown: bool,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            link_unknown: true,
        }
    }
}

impl ExplainConfig {
    /// A configuration that stops after a couple of hops.
    #[must_use]
    pub fn shallow() -> Self {
        Self {
            max_depth: 2,
            ..Self::default()
        }
    }

    /// A configuration for very deep pipelines.
    #[must_use]
    pub fn exhaustive() -> Self {
        Self {
            max_depth: 4096,
            link_unknown: true,
        }
    }

    /// Builder method to set the depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder method to enable/disable explicit unknown children.
    #[must_use]
    pub fn with_link_unknown(mut self, link: bool) -> Self {
        self.link_unknown = link;
        self
    }
}

/// Options for the text rendering of an explanation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrettyOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Whether to prefix each line with the node's arena index.
    pub show_ids: bool,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            show_ids: false,
        }
    }
}

impl PrettyOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the indent width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Builder method to show node IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }
}

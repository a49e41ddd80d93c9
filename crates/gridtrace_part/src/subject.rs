//! Identities and kinds of the things designators point into.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static NEXT_SUBJECT: AtomicU64 = AtomicU64::new(1);

/// Identity of a subject (a transformation instance, a chart, a text source).
///
/// Explanation leaves are interned by (subject, designator), so two distinct
/// instances must never share an id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubjectId(u64);

impl SubjectId {
    /// Allocates a process-unique subject id.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_SUBJECT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubjectId({})", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of structured value a designator is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubjectKind {
    /// A transformation (addressed through its pins).
    Function,
    /// A grid.
    Grid,
    /// A text value.
    Text,
    /// A list.
    List,
    /// A drawn heat map.
    HeatMap,
    /// A drawn scatterplot.
    Scatterplot,
}

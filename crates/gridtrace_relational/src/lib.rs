//! Relational operators with row lineage for gridtrace.
//!
//! Inputs are grids whose first row holds column labels. Operators taking
//! several inputs require them to share a [`Signature`] and never emit two
//! "same"-equal data rows; each output row remembers every input row that
//! collapsed into it.
//! - [`Union`] - Distinct rows of all inputs (disjunctive lineage)
//! - [`Intersection`] - Rows present in every input (conjunctive lineage)
//! - [`Projection`] - Named columns, duplicates collapsed
//! - [`Selection`] - Rows admitted by a predicate transformation
//! - [`RowIndex`] - The hashed row index behind deduplication

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod support;

pub mod index;
pub mod intersection;
pub mod projection;
pub mod selection;
pub mod signature;
pub mod union;

pub use index::{RowIndex, row_key};
pub use intersection::Intersection;
pub use projection::Projection;
pub use selection::Selection;
pub use signature::{Signature, common_signature};
pub use union::Union;

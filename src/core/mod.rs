//! The recognition core: relation graph, sub-pattern derivation, and the
//! twenty-three Gang-of-Four pattern detectors built on top of it.
//!
//! Everything in this module is pure and infallible — it never touches the
//! filesystem and never returns a [`crate::error::PatroidError`]. Extraction
//! and I/O live above it in [`crate::extractor`] and [`crate::xml`].

pub mod graph;
pub mod ids;
pub mod patterns;
pub mod subpatterns;

pub use graph::{Edge, RelationGraph, RelationGraphBuilder};
pub use ids::ClassId;
pub use patterns::{PatternDetector, PatternOccurrence, PatternOccurrences};
pub use subpatterns::{SubPatternEngine, SubPatternSets};

//! PatRoid - Gang-of-Four Design Pattern Recognizer
//!
//! A static analyzer recognizing occurrences of the twenty-three
//! Gang-of-Four design patterns in a codebase, via a two-phase pipeline:
//!
//! 1. **Relation extraction** ([`extractor`]) builds a typed graph of
//!    inter-class relations — inheritance, association, aggregation,
//!    dependency — from source text and an optional application manifest.
//! 2. **Pattern recognition** ([`core`]) derives fifteen named sub-patterns
//!    from that graph, then the twenty-three Gang-of-Four patterns as
//!    specific combinations of sub-patterns.
//!
//! ## Modules
//!
//! - [`core`]: the relation graph, sub-pattern derivation, pattern detectors
//! - [`extractor`]: source discovery, lexical extraction, manifest reading
//! - [`report`]: attributes occurrences to manifest entry-points
//! - [`xml`]: the intermediate relation-graph file format
//! - [`driver`]: wires extraction and recognition together for the CLI
//! - [`config`]: scanner and output settings

pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod report;
pub mod xml;

pub use config::{Config, ConfigLoader};
pub use core::{
    ClassId, Edge, PatternDetector, PatternOccurrence, PatternOccurrences, RelationGraph,
    RelationGraphBuilder, SubPatternEngine, SubPatternSets,
};
pub use driver::{Driver, GraphSource};
pub use error::{PatroidError, Result};
pub use extractor::{DiscoveryResult, FileScanner, LexicalExtractor, ManifestReader, SourceExtractor};
pub use report::{EntryPoint, EntryPointCategory, EntryPointReport, ManifestInfo, Report};

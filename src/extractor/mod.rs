//! Turns a project directory into a `RelationGraph` plus `ManifestInfo`:
//! discover source files and an optional manifest, lexically extract
//! relations from the sources, then (if a manifest was found) resolve each
//! declared entry point's reachable-class set.

mod lexical;
mod manifest;
mod scanner;

pub use lexical::LexicalExtractor;
pub use manifest::ManifestReader;
pub use scanner::{DiscoveryResult, FileScanner};

use crate::core::RelationGraph;
use crate::error::{PatroidError, Result};
use crate::report::ManifestInfo;
use std::path::Path;

/// Discovers and extracts a single project's relation graph and manifest
/// info. Returns `NoSources` if the scan finds nothing to analyze.
pub struct SourceExtractor {
    scanner: FileScanner,
}

impl SourceExtractor {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            scanner: FileScanner::new(root),
        }
    }

    pub fn with_scanner(scanner: FileScanner) -> Self {
        Self { scanner }
    }

    pub fn discover(&self, root: &Path) -> Result<DiscoveryResult> {
        let result = self.scanner.discover()?;
        if result.source_files.is_empty() {
            return Err(PatroidError::NoSources {
                path: root.to_path_buf(),
            });
        }
        Ok(result)
    }

    pub fn extract(&self, discovery: &DiscoveryResult) -> Result<(RelationGraph, ManifestInfo)> {
        let graph = LexicalExtractor::extract(&discovery.source_files)?;

        let manifest = match &discovery.manifest_file {
            Some(manifest_path) => {
                ManifestReader::read(manifest_path, &discovery.source_files, &graph.classes())?
            }
            None => ManifestInfo::default(),
        };

        Ok((graph, manifest))
    }
}

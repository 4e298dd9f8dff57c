//! The top-level orchestration (C6): wires `SourceExtractor`, the core
//! recognition pipeline, and the module-file reader/writer together into
//! the single-project and batch CLI modes.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::{PatternDetector, RelationGraph, SubPatternEngine};
use crate::error::{PatroidError, Result};
use crate::extractor::SourceExtractor;
use crate::report::{ManifestInfo, Report};
use crate::xml;

/// How a project's `RelationGraph` should be obtained.
pub enum GraphSource<'a> {
    /// Discover and lexically extract sources under `root`.
    Extract { root: &'a Path },
    /// Skip extraction and read a previously serialized module file.
    ModuleFile { path: &'a Path },
}

pub struct Driver<'a> {
    config: &'a Config,
}

impl<'a> Driver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Runs the full pipeline for a single project and returns its report,
    /// writing the module file as a side effect unless the graph itself was
    /// read from one.
    pub fn run_project(&self, project_name: &str, source: GraphSource, module_file: &Path) -> Result<Report> {
        let (graph, manifest) = match source {
            GraphSource::Extract { root } => {
                let extractor = SourceExtractor::new(root);
                let discovery = extractor.discover(root)?;
                let (graph, manifest) = extractor.extract(&discovery)?;
                xml::write_module_file(module_file, &graph, Some(&manifest))?;
                (graph, manifest)
            }
            GraphSource::ModuleFile { path } => xml::read_module_file(path)?,
        };

        Ok(self.analyze(project_name, &graph, &manifest))
    }

    /// Runs the pure recognition pipeline on an already-materialized graph.
    pub fn analyze(&self, project_name: &str, graph: &RelationGraph, manifest: &ManifestInfo) -> Report {
        let sub_patterns = SubPatternEngine::derive(graph);
        let occurrences = PatternDetector::detect(&sub_patterns);
        Report::build(project_name, occurrences, Some(manifest))
    }

    /// Batch mode: analyzes every immediate subdirectory of `dir` as its own
    /// project, tolerating per-project failure. Runs projects concurrently.
    pub fn run_batch(&self, dir: &Path) -> Result<Vec<(String, Result<Report>)>> {
        let entries: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();

        if entries.is_empty() {
            return Err(PatroidError::NoSources {
                path: dir.to_path_buf(),
            });
        }

        let results: Vec<(String, Result<Report>)> = entries
            .par_iter()
            .map(|project_dir| {
                let name = project_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| project_dir.display().to_string());

                let module_file = project_dir.join(&self.config.output.module_file);
                let outcome = self.run_project(&name, GraphSource::Extract { root: project_dir }, &module_file);

                match &outcome {
                    Ok(report) => info!(
                        project = %name,
                        occurrences = report.total_occurrences(),
                        "project analyzed"
                    ),
                    Err(err) => warn!(project = %name, error = %err, "project skipped"),
                }

                (name, outcome)
            })
            .collect();

        Ok(results)
    }
}

//! Discovers analyzable source files and a manifest file under a project
//! root, skipping version-control and build-output directories the way any
//! git-ignore-aware walk would.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::Result;

/// Extensions the lexical extractor knows how to read: Java and the
/// C-family languages closest to it in class/interface/field syntax.
const SOURCE_EXTENSIONS: &[&str] = &["java", "kt", "cs"];

const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "build",
    "dist",
    ".git",
    ".gradle",
    "bin",
    "obj",
];

/// Candidate manifest file names, checked in order, relative to the
/// project root.
const MANIFEST_CANDIDATES: &[&str] = &["AndroidManifest.xml", "manifest.xml", "app.manifest"];

#[derive(Debug, Clone, Default)]
pub struct DiscoveryResult {
    pub source_files: Vec<PathBuf>,
    pub manifest_file: Option<PathBuf>,
}

pub struct FileScanner {
    root: PathBuf,
    exclude: Vec<String>,
    max_file_size: u64,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let exclude = DEFAULT_SKIP_DIRS.iter().map(|d| format!("{d}/**")).collect();
        Self {
            root: root.as_ref().to_path_buf(),
            exclude,
            max_file_size: 4 * 1024 * 1024,
        }
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude.extend(patterns);
        self
    }

    pub fn discover(&self) -> Result<DiscoveryResult> {
        Ok(DiscoveryResult {
            source_files: self.scan()?,
            manifest_file: self.find_manifest(),
        })
    }

    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build();

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if self.should_exclude(path) {
                continue;
            }
            if !self.has_source_extension(path) {
                continue;
            }
            let Ok(metadata) = path.metadata() else {
                continue;
            };
            if metadata.len() > self.max_file_size {
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn find_manifest(&self) -> Option<PathBuf> {
        MANIFEST_CANDIDATES
            .iter()
            .map(|name| self.root.join(name))
            .find(|candidate| candidate.is_file())
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
        })
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discovers_java_sources_and_skips_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Foo.java"), "class Foo {}").unwrap();
        fs::create_dir_all(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("build/Generated.java"), "class Gen {}").unwrap();

        let scanner = FileScanner::new(dir.path());
        let found = scanner.scan().unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("Foo.java"));
    }

    #[test]
    fn finds_android_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("AndroidManifest.xml"), "<manifest/>").unwrap();
        let scanner = FileScanner::new(dir.path());
        let result = scanner.discover().unwrap();
        assert!(result.manifest_file.is_some());
    }

    #[test]
    fn no_manifest_candidate_present() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = FileScanner::new(dir.path());
        let result = scanner.discover().unwrap();
        assert!(result.manifest_file.is_none());
    }
}

//! `Report` (C5) — aggregates pattern occurrences by manifest entry-point
//! and by project.
//!
//! Pure data structure; it has no I/O responsibility of its own. The
//! grouping is a read-only view over the occurrences `PatternDetector`
//! already produced: an occurrence is attributed to an entry-point if any
//! class it mentions is in that entry-point's reachable set, and to every
//! entry-point that reaches it (an occurrence can legitimately serve more
//! than one entry-point). Occurrences that no entry-point reaches — because
//! there is no manifest, or because none of their classes are reachable —
//! land in `unattributed` rather than being dropped.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::{ClassId, PatternOccurrence, PatternOccurrences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryPointCategory {
    Launcher,
    Default,
}

#[derive(Debug, Clone)]
pub struct EntryPoint {
    pub name: String,
    pub category: Option<EntryPointCategory>,
    pub reachable: HashSet<ClassId>,
}

/// Ordered list of entry-points gathered from the application manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestInfo {
    pub entry_points: Vec<EntryPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryPointReport {
    pub name: String,
    pub category: Option<EntryPointCategory>,
    pub occurrences: PatternOccurrences,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub project: String,
    /// All occurrences as produced by `PatternDetector::detect`, ungrouped.
    pub occurrences: PatternOccurrences,
    pub by_entry_point: Vec<EntryPointReport>,
    /// Occurrences reachable from no entry-point (no manifest was supplied,
    /// or none of the occurrence's classes were in any entry-point's
    /// reachable set).
    pub unattributed: PatternOccurrences,
}

impl Report {
    pub fn build(
        project: impl Into<String>,
        occurrences: PatternOccurrences,
        manifest: Option<&ManifestInfo>,
    ) -> Self {
        let entry_points = manifest.map(|m| m.entry_points.as_slice()).unwrap_or(&[]);

        let mut by_entry_point: Vec<EntryPointReport> = entry_points
            .iter()
            .map(|ep| EntryPointReport {
                name: ep.name.clone(),
                category: ep.category,
                occurrences: PatternOccurrences::new(),
            })
            .collect();
        let mut unattributed = PatternOccurrences::new();

        for (&pattern_name, occs) in &occurrences {
            for occ in occs {
                let classes = occ.classes();
                let mut attributed = false;
                for (ep, ep_report) in entry_points.iter().zip(by_entry_point.iter_mut()) {
                    if classes.iter().any(|c| ep.reachable.contains(c)) {
                        ep_report
                            .occurrences
                            .entry(pattern_name)
                            .or_default()
                            .push(occ.clone());
                        attributed = true;
                    }
                }
                if !attributed {
                    unattributed
                        .entry(pattern_name)
                        .or_default()
                        .push(occ.clone());
                }
            }
        }

        Self {
            project: project.into(),
            occurrences,
            by_entry_point,
            unattributed,
        }
    }

    /// Total occurrence count across all pattern names.
    pub fn total_occurrences(&self) -> usize {
        self.occurrences.values().map(Vec::len).sum()
    }

    pub fn occurrences_for(&self, pattern: &str) -> &[PatternOccurrence] {
        self.occurrences
            .get(pattern)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::RelationGraph;
    use crate::core::patterns::PatternDetector;
    use crate::core::subpatterns::SubPatternEngine;

    #[test]
    fn no_manifest_puts_everything_in_unattributed() {
        let mut b = RelationGraph::builder();
        b.associate("X", "X");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);
        let report = Report::build("demo", occs, None);
        assert_eq!(report.by_entry_point.len(), 0);
        assert_eq!(report.unattributed["Singleton"].len(), 1);
    }

    #[test]
    fn entry_point_reaching_a_class_gets_the_occurrence() {
        let mut b = RelationGraph::builder();
        b.associate("X", "X");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);

        let manifest = ManifestInfo {
            entry_points: vec![EntryPoint {
                name: "MainActivity".to_string(),
                category: Some(EntryPointCategory::Launcher),
                reachable: HashSet::from([ClassId::from("X")]),
            }],
        };
        let report = Report::build("demo", occs, Some(&manifest));
        assert_eq!(report.by_entry_point.len(), 1);
        assert_eq!(report.by_entry_point[0].occurrences["Singleton"].len(), 1);
        assert!(report.unattributed.get("Singleton").is_none());
    }

    #[test]
    fn entry_point_not_reaching_any_class_leaves_occurrence_unattributed() {
        let mut b = RelationGraph::builder();
        b.associate("X", "X");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);

        let manifest = ManifestInfo {
            entry_points: vec![EntryPoint {
                name: "MainActivity".to_string(),
                category: None,
                reachable: HashSet::from([ClassId::from("Y")]),
            }],
        };
        let report = Report::build("demo", occs, Some(&manifest));
        assert!(report.by_entry_point[0].occurrences.is_empty());
        assert_eq!(report.unattributed["Singleton"].len(), 1);
    }
}

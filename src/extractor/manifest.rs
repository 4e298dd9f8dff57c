//! Reads an application manifest (an `AndroidManifest.xml`-shaped
//! descriptor) and resolves, for each declared activity, the set of
//! classes reachable from it by textual mention — recursively, but with an
//! explicit visited set, unlike the naive unbounded recursion this is
//! modeled on.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::ClassId;
use crate::error::Result;
use crate::report::{EntryPoint, EntryPointCategory, ManifestInfo};

struct RawActivity {
    name: String,
    category: Option<EntryPointCategory>,
}

/// Parses the manifest's `<activity>` elements, picking up the nearest
/// `<category>` value inside a single `<intent-filter>` child, mirroring
/// the conventional launcher/default-activity declaration shape.
fn parse_activities(xml: &str) -> Result<Vec<RawActivity>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut activities = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_category: Option<EntryPointCategory> = None;
    let mut intent_filter_count = 0u32;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if local == "activity" {
                    current_name = attr_value(&e, "name").map(|n| last_segment(&n));
                    current_category = None;
                    intent_filter_count = 0;
                } else if local == "intent-filter" && stack.last().map(String::as_str) == Some("activity") {
                    intent_filter_count += 1;
                } else if local == "category" {
                    if let Some(value) = attr_values(&e).into_iter().find_map(|v| category_from(&v)) {
                        current_category = Some(value);
                    }
                }
                stack.push(local);
            }
            Ok(Event::Empty(e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if local == "activity" {
                    let name = attr_value(&e, "name").map(|n| last_segment(&n));
                    if let Some(name) = name {
                        activities.push(RawActivity { name, category: None });
                    }
                } else if local == "category" && stack.last().map(String::as_str) == Some("intent-filter") {
                    if let Some(value) = attr_values(&e).into_iter().find_map(|v| category_from(&v)) {
                        current_category = Some(value);
                    }
                } else if local == "intent-filter" && stack.last().map(String::as_str) == Some("activity") {
                    intent_filter_count += 1;
                }
            }
            Ok(Event::End(e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                stack.pop();
                if local == "activity" {
                    if let Some(name) = current_name.take() {
                        let category = if intent_filter_count == 1 { current_category } else { None };
                        activities.push(RawActivity { name, category });
                    }
                    current_category = None;
                    intent_filter_count = 0;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(crate::error::PatroidError::internal(format!(
                    "manifest parse error: {e}"
                )))
            }
        }
        buf.clear();
    }

    Ok(activities)
}

fn attr_value(e: &quick_xml::events::BytesStart, want: &str) -> Option<String> {
    e.attributes().filter_map(|a| a.ok()).find_map(|a| {
        let key = String::from_utf8_lossy(a.key.local_name().as_ref()).to_string();
        if key == want {
            Some(String::from_utf8_lossy(&a.value).to_string())
        } else {
            None
        }
    })
}

fn attr_values(e: &quick_xml::events::BytesStart) -> Vec<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
        .collect()
}

fn category_from(value: &str) -> Option<EntryPointCategory> {
    if value.contains("LAUNCHER") {
        Some(EntryPointCategory::Launcher)
    } else if value.contains("DEFAULT") {
        Some(EntryPointCategory::Default)
    } else {
        None
    }
}

fn last_segment(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_string()
}

pub struct ManifestReader;

impl ManifestReader {
    /// `source_files` maps a class name to the file it was declared in, so
    /// reachability can be resolved by reading that file's text.
    pub fn read(
        manifest_path: &Path,
        source_files: &[PathBuf],
        classes: &HashSet<ClassId>,
    ) -> Result<ManifestInfo> {
        let xml = fs::read_to_string(manifest_path)?;
        let activities = parse_activities(&xml)?;

        let mut entry_points = Vec::with_capacity(activities.len());
        for activity in activities {
            let reachable = Self::classes_reachable_from(&activity.name, source_files, classes)?;
            entry_points.push(EntryPoint {
                name: activity.name,
                category: activity.category,
                reachable,
            });
        }
        Ok(ManifestInfo { entry_points })
    }

    /// Breadth-first textual-mention traversal with an explicit visited
    /// set: starting from the entry-point's own source file, any known
    /// class name mentioned in its text is reachable; the same search then
    /// runs on each newly discovered class's file. Terminates at fixpoint.
    fn classes_reachable_from(
        entry_point: &str,
        source_files: &[PathBuf],
        classes: &HashSet<ClassId>,
    ) -> Result<HashSet<ClassId>> {
        let mut visited: HashSet<ClassId> = HashSet::new();
        let mut frontier: Vec<String> = vec![entry_point.to_string()];
        let mut seen_names: HashSet<String> = HashSet::new();
        seen_names.insert(entry_point.to_string());

        while let Some(class_name) = frontier.pop() {
            let Some(path) = Self::file_for_class(&class_name, source_files) else {
                continue;
            };
            let content = fs::read_to_string(&path).unwrap_or_default();
            for candidate in classes {
                let name = candidate.as_str();
                if name == class_name {
                    continue;
                }
                if content.contains(name) && seen_names.insert(name.to_string()) {
                    visited.insert(candidate.clone());
                    frontier.push(name.to_string());
                }
            }
        }

        Ok(visited)
    }

    fn file_for_class(class_name: &str, source_files: &[PathBuf]) -> Option<PathBuf> {
        source_files
            .iter()
            .find(|p| p.file_stem().and_then(|s| s.to_str()) == Some(class_name))
            .cloned()
    }
}

//! Lexical relation extraction from C-family source text.
//!
//! Two passes, mirroring how any regex-based class/field/method reader for
//! this family of languages works: first collect every declared class name
//! (and its optional parent) across the whole source set, then re-scan each
//! file to classify its fields, method signatures, and call sites against
//! that now-known set of classes. A field/return/parameter/call target that
//! isn't a known project class is not a relation — this is lexical
//! extraction, not type-checking, so anything outside the project's own
//! class set (library types, primitives) is silently ignored.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::core::graph::RelationGraphBuilder;
use crate::core::RelationGraph;
use crate::error::Result;

fn class_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"class\s+(\w+)(?:\s+extends\s+(\w+))?").unwrap())
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(final\s+)?(\w+)(?:\[\])?\s+(\w+)\s*[=;]").unwrap())
}

fn method_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:(?:public|private|protected|static|final|abstract|synchronized)\s+)*(\w+)\s+\w+\s*\(([^)]*)\)\s*\{",
        )
        .unwrap()
    })
}

fn static_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+)\.\w+\s*\(").unwrap())
}

pub struct LexicalExtractor;

struct ParsedFile {
    owner: String,
    parent: Option<String>,
    field_types: Vec<(bool, String)>,
    return_types: Vec<String>,
    arg_types: Vec<String>,
    call_targets: Vec<String>,
}

impl LexicalExtractor {
    pub fn extract(sources: &[PathBuf]) -> Result<RelationGraph> {
        let texts: Vec<(PathBuf, String)> = sources
            .iter()
            .filter_map(|p| fs::read_to_string(p).ok().map(|t| (p.clone(), t)))
            .collect();

        let classes = Self::collect_class_names(&texts);

        let mut builder = RelationGraph::builder();
        for (_path, text) in &texts {
            if let Some(parsed) = Self::parse_file(text) {
                Self::apply(&parsed, &classes, &mut builder);
            }
        }
        Ok(builder.build())
    }

    fn collect_class_names(texts: &[(PathBuf, String)]) -> std::collections::HashSet<String> {
        texts
            .iter()
            .flat_map(|(_, text)| class_decl_re().captures_iter(text))
            .map(|caps| caps[1].to_string())
            .collect()
    }

    fn parse_file(text: &str) -> Option<ParsedFile> {
        let caps = class_decl_re().captures(text)?;
        let owner = caps[1].to_string();
        let parent = caps.get(2).map(|m| m.as_str().to_string());

        let mut field_types = Vec::new();
        for caps in field_re().captures_iter(text) {
            let is_final = caps.get(1).is_some();
            let data_type = caps[2].to_string();
            field_types.push((is_final, data_type));
        }

        let mut return_types = Vec::new();
        let mut arg_types = Vec::new();
        for caps in method_re().captures_iter(text) {
            return_types.push(caps[1].to_string());
            if let Some(args) = caps.get(2) {
                for arg in args.as_str().split(',') {
                    let arg = arg.trim();
                    if let Some((ty, _name)) = arg.rsplit_once(char::is_whitespace) {
                        arg_types.push(ty.trim().to_string());
                    }
                }
            }
        }

        let call_targets = static_call_re()
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect();

        Some(ParsedFile {
            owner,
            parent,
            field_types,
            return_types,
            arg_types,
            call_targets,
        })
    }

    fn apply(
        parsed: &ParsedFile,
        classes: &std::collections::HashSet<String>,
        builder: &mut RelationGraphBuilder,
    ) {
        let owner = parsed.owner.as_str();

        if let Some(parent) = &parsed.parent {
            if classes.contains(parent) {
                builder.inherit(parent.as_str(), owner);
            }
        }

        for (is_final, data_type) in &parsed.field_types {
            if !classes.contains(data_type) {
                continue;
            }
            if *is_final {
                builder.aggregate(owner, data_type.as_str());
            } else {
                builder.associate(owner, data_type.as_str());
            }
        }

        for data_type in &parsed.return_types {
            if classes.contains(data_type) {
                builder.associate(owner, data_type.as_str());
            }
        }

        for data_type in &parsed.arg_types {
            if classes.contains(data_type) {
                builder.depend(owner, data_type.as_str());
            }
        }

        for target in &parsed.call_targets {
            if classes.contains(target) && target != owner {
                builder.depend(owner, target.as_str());
            }
        }
    }
}

/// Maps each known project class to the file it was declared in; used by
/// the manifest reachability pass to find an entry-point's source.
pub fn build_class_file_index(sources: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for path in sources {
        let Ok(text) = fs::read_to_string(path) else {
            continue;
        };
        if let Some(caps) = class_decl_re().captures(&text) {
            index.insert(caps[1].to_string(), path.clone());
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn extracts_inheritance() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = write(dir.path(), "Shape.java", "class Shape {}");
        let p2 = write(dir.path(), "Circle.java", "class Circle extends Shape {}");
        let g = LexicalExtractor::extract(&[p1, p2]).unwrap();
        assert!(g
            .inheritance()
            .contains(&(crate::core::ClassId::from("Shape"), crate::core::ClassId::from("Circle"))));
    }

    #[test]
    fn extracts_aggregation_for_final_fields_and_association_otherwise() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = write(dir.path(), "Engine.java", "class Engine {}");
        let p2 = write(
            dir.path(),
            "Car.java",
            "class Car { final Engine engine = new Engine(); Wheel wheel = new Wheel(); }",
        );
        let p3 = write(dir.path(), "Wheel.java", "class Wheel {}");
        let g = LexicalExtractor::extract(&[p1, p2, p3]).unwrap();
        assert!(g
            .aggregation()
            .contains(&(crate::core::ClassId::from("Car"), crate::core::ClassId::from("Engine"))));
        assert!(g
            .association()
            .contains(&(crate::core::ClassId::from("Car"), crate::core::ClassId::from("Wheel"))));
    }

    #[test]
    fn unknown_types_produce_no_relation() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = write(
            dir.path(),
            "Widget.java",
            "class Widget { final String name = \"x\"; }",
        );
        let g = LexicalExtractor::extract(&[p1]).unwrap();
        assert!(g.aggregation().is_empty());
        assert!(g.association().is_empty());
    }

    #[test]
    fn extracts_static_call_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = write(dir.path(), "Logger.java", "class Logger { static void log() {} }");
        let p2 = write(
            dir.path(),
            "Service.java",
            "class Service { void run() { Logger.log(); } }",
        );
        let g = LexicalExtractor::extract(&[p1, p2]).unwrap();
        assert!(g
            .dependency()
            .contains(&(crate::core::ClassId::from("Service"), crate::core::ClassId::from("Logger"))));
    }
}

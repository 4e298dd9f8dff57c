use std::fs;
use std::path::Path;

use crate::core::RelationGraph;
use crate::error::{PatroidError, Result};
use crate::report::ManifestInfo;

use super::model::XmlRoot;

/// Parses the module-file XML format from a string into a `RelationGraph`
/// and its accompanying manifest info.
pub fn read_module_str(xml: &str) -> Result<(RelationGraph, ManifestInfo)> {
    let root: XmlRoot = quick_xml::de::from_str(xml)?;
    Ok(root.into_domain())
}

/// Reads and parses a module file at `path`.
pub fn read_module_file(path: &Path) -> Result<(RelationGraph, ManifestInfo)> {
    let xml = fs::read_to_string(path)?;
    read_module_str(&xml).map_err(|e| match e {
        PatroidError::Xml(inner) => PatroidError::MalformedGraph {
            path: path.to_path_buf(),
            message: inner.to_string(),
        },
        other => other,
    })
}

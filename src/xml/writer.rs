use std::fs;
use std::path::Path;

use crate::core::RelationGraph;
use crate::error::Result;
use crate::report::ManifestInfo;

use super::model::XmlRoot;

/// Serializes `graph` (and, if given, `manifest`) to the module-file XML
/// format, as a string.
pub fn write_module_str(graph: &RelationGraph, manifest: Option<&ManifestInfo>) -> Result<String> {
    let root = XmlRoot::from_domain(graph, manifest);
    let body = quick_xml::se::to_string(&root)?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}\n"))
}

/// Writes `graph` to `path` in the module-file XML format.
pub fn write_module_file(
    path: &Path,
    graph: &RelationGraph,
    manifest: Option<&ManifestInfo>,
) -> Result<()> {
    let xml = write_module_str(graph, manifest)?;
    fs::write(path, xml)?;
    Ok(())
}

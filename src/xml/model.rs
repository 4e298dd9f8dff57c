//! Serde model of the relation-graph XML file and its conversions to/from
//! the in-memory [`RelationGraph`]/[`ManifestInfo`] types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{ClassId, RelationGraph};
use crate::report::{EntryPoint, EntryPointCategory, ManifestInfo};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "root")]
pub(super) struct XmlRoot {
    #[serde(default)]
    pub depends: RelationGroup,
    #[serde(default)]
    pub association: RelationGroup,
    #[serde(default)]
    pub aggregation: RelationGroup,
    #[serde(default)]
    pub inheritance: RelationGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<XmlManifest>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct RelationGroup {
    #[serde(rename = "relation", default)]
    pub relation: Vec<XmlRelation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlRelation {
    #[serde(rename = "@ci")]
    pub ci: String,
    #[serde(rename = "@cj")]
    pub cj: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct XmlManifest {
    #[serde(rename = "activity", default)]
    pub activity: Vec<XmlActivity>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlActivity {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_classes: Option<XmlRelatedClasses>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct XmlRelatedClasses {
    #[serde(rename = "activity", default)]
    pub activity: Vec<XmlRelatedClass>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlRelatedClass {
    #[serde(rename = "@name")]
    pub name: String,
}

impl RelationGroup {
    fn from_edges<'a>(edges: impl Iterator<Item = &'a (ClassId, ClassId)>) -> Self {
        Self {
            relation: edges
                .map(|(a, b)| XmlRelation {
                    ci: a.as_str().to_string(),
                    cj: b.as_str().to_string(),
                })
                .collect(),
        }
    }

    fn into_edges(self) -> Vec<(ClassId, ClassId)> {
        self.relation
            .into_iter()
            .map(|r| (ClassId::from(r.ci), ClassId::from(r.cj)))
            .collect()
    }
}

impl XmlRoot {
    pub(super) fn from_domain(graph: &RelationGraph, manifest: Option<&ManifestInfo>) -> Self {
        Self {
            depends: RelationGroup::from_edges(graph.dependency().iter()),
            association: RelationGroup::from_edges(graph.association().iter()),
            aggregation: RelationGroup::from_edges(graph.aggregation().iter()),
            inheritance: RelationGroup::from_edges(graph.inheritance().iter()),
            manifest: manifest.map(XmlManifest::from_domain),
        }
    }

    pub(super) fn into_domain(self) -> (RelationGraph, ManifestInfo) {
        let mut builder = RelationGraph::builder();
        for (user, used) in self.depends.into_edges() {
            builder.depend(user, used);
        }
        for (holder, target) in self.association.into_edges() {
            builder.associate(holder, target);
        }
        for (whole, part) in self.aggregation.into_edges() {
            builder.aggregate(whole, part);
        }
        for (parent, child) in self.inheritance.into_edges() {
            builder.inherit(parent, child);
        }
        let graph = builder.build();
        let manifest = self.manifest.map(XmlManifest::into_domain).unwrap_or_default();
        (graph, manifest)
    }
}

impl XmlManifest {
    fn from_domain(manifest: &ManifestInfo) -> Self {
        Self {
            activity: manifest.entry_points.iter().map(XmlActivity::from_domain).collect(),
        }
    }

    fn into_domain(self) -> ManifestInfo {
        ManifestInfo {
            entry_points: self.activity.into_iter().map(XmlActivity::into_domain).collect(),
        }
    }
}

impl XmlActivity {
    fn from_domain(ep: &EntryPoint) -> Self {
        Self {
            name: ep.name.clone(),
            category: ep.category.map(|c| match c {
                EntryPointCategory::Launcher => "LAUNCHER".to_string(),
                EntryPointCategory::Default => "DEFAULT".to_string(),
            }),
            related_classes: Some(XmlRelatedClasses {
                activity: ep
                    .reachable
                    .iter()
                    .map(|c| XmlRelatedClass { name: c.as_str().to_string() })
                    .collect(),
            }),
        }
    }

    fn into_domain(self) -> EntryPoint {
        let category = self.category.and_then(|c| match c.as_str() {
            "LAUNCHER" => Some(EntryPointCategory::Launcher),
            "DEFAULT" => Some(EntryPointCategory::Default),
            _ => None,
        });
        let reachable: HashSet<ClassId> = self
            .related_classes
            .map(|rc| rc.activity.into_iter().map(|a| ClassId::from(a.name)).collect())
            .unwrap_or_default();
        EntryPoint {
            name: self.name,
            category,
            reachable,
        }
    }
}

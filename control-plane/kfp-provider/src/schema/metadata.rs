use std::collections::BTreeMap;

use kube::core::ObjectMeta;
use serde::{Deserialize, Serialize};

/// The `metadata` block of a state record.
///
/// `annotations`, `generate_name`, `labels`, `name` and `namespace` are set by
/// the user; the remaining fields are computed by the API server and only
/// ever filled in by [`MetadataBlock::flatten`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only meaningful for namespaced kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl MetadataBlock {
    /// User-settable fields as API metadata. Computed fields are dropped.
    pub fn expand(&self) -> ObjectMeta {
        ObjectMeta {
            annotations: non_empty(&self.annotations),
            generate_name: self.generate_name.clone(),
            labels: non_empty(&self.labels),
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            ..Default::default()
        }
    }

    pub fn flatten(meta: &ObjectMeta) -> Self {
        Self {
            annotations: meta.annotations.clone().unwrap_or_default(),
            generate_name: meta.generate_name.clone(),
            generation: meta.generation,
            labels: meta.labels.clone().unwrap_or_default(),
            name: meta.name.clone(),
            namespace: meta.namespace.clone(),
            resource_version: meta.resource_version.clone(),
            self_link: meta.self_link.clone(),
            uid: meta.uid.clone(),
        }
    }
}

fn non_empty(map: &BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    (!map.is_empty()).then(|| map.clone())
}

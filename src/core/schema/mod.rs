//! Catalog attribute schema and the provider seam used to fetch it.

pub mod cache;

pub use cache::CachedSchemaProvider;

use crate::core::error::{GateError, GateResult};
use crate::core::types::ScalarType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Source of the catalog's attribute declarations.
pub trait AttributeSchemaProvider: Send + Sync {
    /// Fetch the merged attribute schema. Must fail with `RemoteFetch` when the
    /// catalog is unreachable or defines no attributes.
    fn attribute_fields(&self) -> GateResult<AttributeSchema>;
}

/// Attribute name to declared catalog type label (e.g. `int`, `VARCHAR(128)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSchema(IndexMap<String, String>);

impl AttributeSchema {
    /// Merge item-level and container-level declarations into one namespace.
    /// Container-level declarations win on name clashes.
    pub fn merge(
        item_fields: IndexMap<String, String>,
        container_fields: IndexMap<String, String>,
    ) -> Self {
        let mut fields = item_fields;
        fields.extend(container_fields);
        AttributeSchema(fields)
    }

    pub fn type_label(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeSchema {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AttributeSchema(
            iter.into_iter()
                .map(|(name, label)| (name.into(), label.into()))
                .collect(),
        )
    }
}

/// Metadata field listing as returned by a catalog, split by namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataFields {
    #[serde(default)]
    pub file_fields: IndexMap<String, String>,
    #[serde(default)]
    pub directory_fields: IndexMap<String, String>,
}

impl MetadataFields {
    pub fn into_schema(self) -> GateResult<AttributeSchema> {
        let schema = AttributeSchema::merge(self.file_fields, self.directory_fields);
        if schema.is_empty() {
            return Err(GateError::remote_fetch(
                "catalog metadata fields",
                "no metadata fields defined",
            ));
        }
        Ok(schema)
    }
}

/// Catalog type labels accepted for each scalar type.
///
/// The canonical names `String`, `Integer` and `Float` always resolve; the
/// lists add the catalog's own spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLabels {
    #[serde(default = "default_string_labels")]
    pub string_labels: Vec<String>,
    #[serde(default = "default_integer_labels")]
    pub integer_labels: Vec<String>,
    #[serde(default = "default_float_labels")]
    pub float_labels: Vec<String>,
}

fn default_string_labels() -> Vec<String> {
    vec!["VARCHAR(128)".to_string()]
}

fn default_integer_labels() -> Vec<String> {
    vec!["int".to_string()]
}

fn default_float_labels() -> Vec<String> {
    vec!["float".to_string()]
}

impl Default for TypeLabels {
    fn default() -> Self {
        TypeLabels {
            string_labels: default_string_labels(),
            integer_labels: default_integer_labels(),
            float_labels: default_float_labels(),
        }
    }
}

impl TypeLabels {
    pub fn resolve(&self, label: &str) -> Option<ScalarType> {
        if let Some(scalar) = ScalarType::from_canonical(label) {
            return Some(scalar);
        }
        let matches = |labels: &[String]| labels.iter().any(|known| known == label);
        if matches(&self.string_labels) {
            Some(ScalarType::String)
        } else if matches(&self.integer_labels) {
            Some(ScalarType::Integer)
        } else if matches(&self.float_labels) {
            Some(ScalarType::Float)
        } else {
            None
        }
    }

    /// Labels listed under more than one scalar type.
    pub fn conflicts(&self) -> Vec<String> {
        let mut conflicts = Vec::new();
        let groups = [&self.string_labels, &self.integer_labels, &self.float_labels];
        for (index, group) in groups.iter().enumerate() {
            for label in group.iter() {
                let repeated = groups[index + 1..]
                    .iter()
                    .any(|other| other.contains(label));
                if repeated && !conflicts.contains(label) {
                    conflicts.push(label.clone());
                }
            }
        }
        conflicts
    }
}

use super::TransformationRegistry;
use crate::core::error::{GateError, GateResult};
use crate::core::query::RawQuery;
use crate::core::schema::{AttributeSchema, AttributeSchemaProvider, MetadataFields};
use crate::core::types::{LifecycleStatus, QueryDirection, WorkflowRef};
use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One transformation as recorded in a registry manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationRecord {
    pub status: LifecycleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_query: Option<RawQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_query: Option<RawQuery>,
}

/// Registry snapshot stored in a YAML or JSON file.
///
/// ```yaml
/// transformations:
///   "101":
///     status: New
///     input_query: { Run: { in: [100, 101] } }
/// catalog:
///   file_fields: { Run: int }
///   directory_fields: { Site: VARCHAR(128) }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestRegistry {
    #[serde(default)]
    pub transformations: IndexMap<WorkflowRef, TransformationRecord>,
    #[serde(default)]
    pub catalog: MetadataFields,
}

impl ManifestRegistry {
    /// Load a manifest file. YAML is a superset of JSON, so both parse here.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read registry manifest {}", path.display()))?;
        Self::from_document(&content)
            .with_context(|| format!("failed to parse registry manifest {}", path.display()))
    }

    pub fn from_document(content: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn record(&self, workflow: &WorkflowRef) -> GateResult<&TransformationRecord> {
        self.transformations.get(workflow).ok_or_else(|| {
            GateError::remote_fetch(
                format!("transformation {}", workflow),
                "transformation does not exist",
            )
        })
    }
}

impl TransformationRegistry for ManifestRegistry {
    fn status(&self, workflow: &WorkflowRef) -> GateResult<LifecycleStatus> {
        Ok(self.record(workflow)?.status.clone())
    }

    fn meta_query(
        &self,
        workflow: &WorkflowRef,
        direction: QueryDirection,
    ) -> GateResult<Option<RawQuery>> {
        let record = self.record(workflow)?;
        let query = match direction {
            QueryDirection::Input => &record.input_query,
            QueryDirection::Output => &record.output_query,
        };
        Ok(query.clone())
    }
}

impl AttributeSchemaProvider for ManifestRegistry {
    fn attribute_fields(&self) -> GateResult<AttributeSchema> {
        self.catalog.clone().into_schema()
    }
}

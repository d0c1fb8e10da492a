use super::TransformationRegistry;
use crate::core::error::{GateError, GateResult};
use crate::core::query::RawQuery;
use crate::core::schema::{AttributeSchema, AttributeSchemaProvider, MetadataFields};
use crate::core::types::{LifecycleStatus, QueryDirection, WorkflowRef};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Everything but RFC 3986 unreserved characters is escaped in path segments.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: LifecycleStatus,
}

#[derive(Debug, Deserialize)]
struct MetaQueryResponse {
    #[serde(default)]
    query: Option<RawQuery>,
}

/// Blocking client for a registry that serves transformations over HTTP.
///
/// Endpoints, relative to the base URL:
/// - `GET transformations/{id}/status` -> `{"status": "New"}`
/// - `GET transformations/{id}/metaquery/{input|output}` -> `{"query": {...}}`
/// - `GET catalog/metadata-fields` -> `{"file_fields": {...}, "directory_fields": {...}}`
pub struct HttpRegistry {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpRegistry {
    pub fn new(base_url: Url, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path: Vec<String> = segments
            .iter()
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect();
        format!("{}/{}", base, path.join("/"))
    }

    fn get_json<T: DeserializeOwned>(&self, target: &str, endpoint: &str) -> GateResult<T> {
        tracing::debug!(endpoint = %endpoint, "registry request");
        let response = self.client.get(endpoint).send().map_err(|e| {
            tracing::error!(target_name = %target, error = %e, "registry request failed");
            GateError::remote_fetch(target, format!("network error: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(GateError::remote_fetch(
                target,
                format!("server returned status: {}", response.status()),
            ));
        }

        response
            .json()
            .map_err(|e| GateError::remote_fetch(target, format!("invalid response body: {}", e)))
    }
}

impl TransformationRegistry for HttpRegistry {
    fn status(&self, workflow: &WorkflowRef) -> GateResult<LifecycleStatus> {
        let endpoint = self.endpoint(&["transformations", workflow.as_str(), "status"]);
        let response: StatusResponse =
            self.get_json(&format!("status of transformation {}", workflow), &endpoint)?;
        Ok(response.status)
    }

    fn meta_query(
        &self,
        workflow: &WorkflowRef,
        direction: QueryDirection,
    ) -> GateResult<Option<RawQuery>> {
        let endpoint = self.endpoint(&[
            "transformations",
            workflow.as_str(),
            "metaquery",
            direction.as_path(),
        ]);
        let response: MetaQueryResponse = self.get_json(
            &format!("{} meta query of transformation {}", direction, workflow),
            &endpoint,
        )?;
        Ok(response.query)
    }
}

impl AttributeSchemaProvider for HttpRegistry {
    fn attribute_fields(&self) -> GateResult<AttributeSchema> {
        let endpoint = self.endpoint(&["catalog", "metadata-fields"]);
        let fields: MetadataFields = self.get_json("catalog metadata fields", &endpoint)?;
        fields.into_schema()
    }
}

//! Seams to the transformation registry, plus the concrete backends used by
//! the CLI.

pub mod http;
pub mod manifest;

pub use http::HttpRegistry;
pub use manifest::ManifestRegistry;

use crate::core::error::GateResult;
use crate::core::query::RawQuery;
use crate::core::schema::AttributeSchemaProvider;
use crate::core::types::{LifecycleStatus, QueryDirection, WorkflowRef};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Read-only view of the registry that owns transformations.
pub trait TransformationRegistry: Send + Sync {
    /// Current lifecycle status of `workflow`.
    fn status(&self, workflow: &WorkflowRef) -> GateResult<LifecycleStatus>;

    /// Selection query declared on `workflow` for `direction`. `None` when the
    /// transformation declares none.
    fn meta_query(
        &self,
        workflow: &WorkflowRef,
        direction: QueryDirection,
    ) -> GateResult<Option<RawQuery>>;
}

/// Where the registry lives: a manifest file or an HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    Manifest(PathBuf),
    Http(Url),
}

impl RegistrySource {
    /// `http://` and `https://` sources are URLs; anything else is a manifest
    /// path, resolved against `workspace` when relative.
    pub fn parse(source: &str, workspace: &Path) -> crate::Result<Self> {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            let url = Url::parse(source)
                .with_context(|| format!("invalid registry URL {}", source))?;
            return Ok(RegistrySource::Http(url));
        }
        let path = PathBuf::from(source);
        if path.is_absolute() {
            Ok(RegistrySource::Manifest(path))
        } else {
            Ok(RegistrySource::Manifest(workspace.join(path)))
        }
    }

    pub fn connect(&self, timeout: Duration) -> crate::Result<RegistryBackend> {
        match self {
            RegistrySource::Manifest(path) => {
                let registry = Arc::new(ManifestRegistry::load(path)?);
                tracing::debug!(path = %path.display(), transformations = registry.transformations.len(), "loaded registry manifest");
                Ok(RegistryBackend {
                    registry: registry.clone(),
                    schema: registry,
                })
            }
            RegistrySource::Http(url) => {
                let registry = Arc::new(HttpRegistry::new(url.clone(), timeout)?);
                tracing::debug!(url = %registry.base_url(), timeout_secs = timeout.as_secs(), "using http registry");
                Ok(RegistryBackend {
                    registry: registry.clone(),
                    schema: registry,
                })
            }
        }
    }
}

/// A connected backend seen through both read-only seams.
#[derive(Clone)]
pub struct RegistryBackend {
    pub registry: Arc<dyn TransformationRegistry>,
    pub schema: Arc<dyn AttributeSchemaProvider>,
}

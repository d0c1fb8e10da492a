use super::GateConfig;
use crate::core::types::LifecycleStatus;
use crate::Result;
use anyhow::Context;
use std::env;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "prodgate.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/prodgate.toml).
    /// Environment variables override config file values; a missing file
    /// yields defaults plus env overrides.
    pub fn load_from_workspace(workspace_path: &Path) -> Result<GateConfig> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        Self::load_with_overrides(&config_path)
    }

    /// Same as [`load_from_workspace`](Self::load_from_workspace) for an explicit file.
    pub fn load_with_overrides(path: &Path) -> Result<GateConfig> {
        let mut config = Self::load_from_file(path)?.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Returns Ok(None) if the file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<GateConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: GateConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        Ok(Some(config))
    }

    /// Environment variables take precedence over config file values.
    /// Unparseable values are ignored with a warning.
    fn apply_env_overrides(config: &mut GateConfig) {
        if let Ok(status) = env::var("PRODGATE_ELIGIBLE_STATUS") {
            config.gate.eligible_status = LifecycleStatus::parse(status.trim());
        }

        if let Ok(direction) = env::var("PRODGATE_SUBSUMPTION_DIRECTION") {
            match direction.parse() {
                Ok(direction) => config.subsumption.direction = direction,
                Err(e) => tracing::warn!("ignoring PRODGATE_SUBSUMPTION_DIRECTION: {}", e),
            }
        }

        if let Ok(numeric) = env::var("PRODGATE_NUMERIC_MATCHING") {
            match numeric.parse() {
                Ok(numeric) => config.subsumption.numeric = numeric,
                Err(e) => tracing::warn!("ignoring PRODGATE_NUMERIC_MATCHING: {}", e),
            }
        }

        if let Ok(ttl) = env::var("PRODGATE_SCHEMA_CACHE_TTL") {
            match ttl.trim().parse::<u64>() {
                Ok(ttl) => config.schema.cache_ttl_secs = ttl,
                Err(e) => tracing::warn!("ignoring PRODGATE_SCHEMA_CACHE_TTL '{}': {}", ttl, e),
            }
        }

        if let Ok(source) = env::var("PRODGATE_REGISTRY") {
            if !source.trim().is_empty() {
                config.registry.source = Some(source);
            }
        }

        if let Ok(timeout) = env::var("PRODGATE_REGISTRY_TIMEOUT") {
            match timeout.trim().parse::<u64>() {
                Ok(timeout) => config.registry.timeout_secs = timeout,
                Err(e) => tracing::warn!("ignoring PRODGATE_REGISTRY_TIMEOUT '{}': {}", timeout, e),
            }
        }
    }

    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "PRODGATE_ELIGIBLE_STATUS - Override the activation-eligible status (default: New)",
            "PRODGATE_SUBSUMPTION_DIRECTION - Override subset direction (either/child-within-parent)",
            "PRODGATE_NUMERIC_MATCHING - Override numeric matching (exact/coerce)",
            "PRODGATE_SCHEMA_CACHE_TTL - Override schema cache lifetime in seconds (default: 0)",
            "PRODGATE_REGISTRY - Override registry source (manifest path or http(s) URL)",
            "PRODGATE_REGISTRY_TIMEOUT - Override HTTP registry timeout in seconds (default: 30)",
        ]
    }
}

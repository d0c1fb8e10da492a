use super::GateConfig;
use crate::core::types::LifecycleStatus;
use crate::Result;
use anyhow::anyhow;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &GateConfig) -> Result<()> {
        if let LifecycleStatus::Unknown(label) = &config.gate.eligible_status {
            if label.trim().is_empty() {
                return Err(anyhow!("gate.eligible_status cannot be empty"));
            }
        }

        if config.registry.timeout_secs == 0 {
            return Err(anyhow!("registry.timeout_secs must be greater than zero"));
        }

        let conflicts = config.schema.labels.conflicts();
        if !conflicts.is_empty() {
            return Err(anyhow!(
                "schema type labels mapped to more than one type: {}",
                conflicts.join(", ")
            ));
        }

        Ok(())
    }

    /// The registry source, for commands that must reach a registry.
    pub fn require_registry(config: &GateConfig) -> Result<&str> {
        match config.registry.source.as_deref().map(str::trim) {
            Some(source) if !source.is_empty() => Ok(source),
            _ => Err(anyhow!(
                "no registry configured; set registry.source, PRODGATE_REGISTRY or --registry"
            )),
        }
    }
}

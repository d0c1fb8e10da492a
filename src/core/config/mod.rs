use crate::core::schema::TypeLabels;
use crate::core::state_gate::DEFAULT_ELIGIBLE_STATUS;
use crate::core::subsumption::SubsumptionPolicy;
use crate::core::types::LifecycleStatus;
use serde::{Deserialize, Serialize};

/// Gate configuration loaded from prodgate.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GateConfig {
    /// Status gate configuration
    #[serde(default)]
    pub gate: GateSection,

    /// How value sets are compared
    #[serde(default)]
    pub subsumption: SubsumptionPolicy,

    /// Catalog type labels and schema caching
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Where transformations are looked up
    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSection {
    /// The only status from which a transformation may be activated
    #[serde(default = "default_eligible_status")]
    pub eligible_status: LifecycleStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(flatten)]
    pub labels: TypeLabels,

    /// Seconds a fetched schema is reused; 0 fetches on every check
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Manifest file path or http(s) base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Request timeout for the HTTP registry
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_eligible_status() -> LifecycleStatus {
    DEFAULT_ELIGIBLE_STATUS
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GateSection {
    fn default() -> Self {
        GateSection {
            eligible_status: default_eligible_status(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            labels: TypeLabels::default(),
            cache_ttl_secs: 0,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            source: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

pub mod config;
pub mod dependency;
pub mod error;
pub mod query;
pub mod registry;
pub mod schema;
pub mod state_gate;
pub mod subsumption;
pub mod types;
pub mod validator;

pub use config::{ConfigLoader, ConfigValidator, GateConfig};
pub use dependency::DependencyChecker;
pub use error::{ErrorKind, GateError, GateResult};
pub use query::{Constraint, NormalizedQuery, Operator, QueryNormalizer, RawQuery, ValueSet};
pub use registry::{
    HttpRegistry, ManifestRegistry, RegistryBackend, RegistrySource, TransformationRegistry,
};
pub use schema::{AttributeSchema, AttributeSchemaProvider, CachedSchemaProvider, TypeLabels};
pub use state_gate::{StateGate, DEFAULT_ELIGIBLE_STATUS};
pub use subsumption::{
    NumericMatching, SubsetDirection, SubsumptionChecker, SubsumptionOutcome, SubsumptionPolicy,
};
pub use types::*;
pub use validator::{ActivationReport, ActivationValidator, GateOutcome, Verdict};

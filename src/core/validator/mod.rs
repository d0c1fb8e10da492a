use crate::core::config::GateConfig;
use crate::core::dependency::DependencyChecker;
use crate::core::error::{ErrorKind, GateError, GateResult};
use crate::core::registry::RegistryBackend;
use crate::core::schema::{AttributeSchemaProvider, CachedSchemaProvider};
use crate::core::state_gate::StateGate;
use crate::core::subsumption::SubsumptionChecker;
use crate::core::types::WorkflowRef;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Result of one gate inside an activation check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum GateOutcome {
    Passed,
    /// The transformation was examined and found ineligible.
    Rejected { kind: ErrorKind, message: String },
    /// The gate could not reach a verdict.
    Error { kind: ErrorKind, message: String },
    /// Not run because an earlier gate did not pass.
    Skipped,
}

impl GateOutcome {
    pub fn from_result(result: GateResult<()>) -> Self {
        match result {
            Ok(()) => GateOutcome::Passed,
            Err(e) if e.is_rejection() => GateOutcome::Rejected {
                kind: e.kind(),
                message: e.to_string(),
            },
            Err(e) => GateOutcome::Error {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, GateOutcome::Passed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Eligible,
    Rejected,
    Undetermined,
}

/// Summary of the pre-activation checks for one (child, parent) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ActivationReport {
    pub check_id: Uuid,
    pub checked_at: DateTime<Utc>,
    pub transformation: WorkflowRef,
    pub parent: WorkflowRef,
    pub status: GateOutcome,
    pub dependency: GateOutcome,
}

impl ActivationReport {
    pub fn verdict(&self) -> Verdict {
        let gates = [&self.status, &self.dependency];
        if gates.iter().all(|gate| gate.passed()) {
            Verdict::Eligible
        } else if gates
            .iter()
            .any(|gate| matches!(gate, GateOutcome::Error { .. }))
        {
            Verdict::Undetermined
        } else {
            Verdict::Rejected
        }
    }
}

/// Runs the status gate and then the dependency check, the order an
/// orchestrator must follow before activating a transformation.
pub struct ActivationValidator {
    state_gate: StateGate,
    dependency: DependencyChecker,
}

impl ActivationValidator {
    pub fn new(state_gate: StateGate, dependency: DependencyChecker) -> Self {
        Self {
            state_gate,
            dependency,
        }
    }

    /// Wire both gates to `backend` with the configured policy. A non-zero
    /// schema TTL puts a cache in front of the catalog.
    pub fn from_config(config: &GateConfig, backend: RegistryBackend) -> Self {
        let schema: Arc<dyn AttributeSchemaProvider> = match config.schema.cache_ttl_secs {
            0 => backend.schema,
            ttl => Arc::new(CachedSchemaProvider::new(
                backend.schema,
                Duration::from_secs(ttl),
            )),
        };
        let checker = SubsumptionChecker::new(config.schema.labels.clone(), config.subsumption);
        Self::new(
            StateGate::new(backend.registry.clone(), config.gate.eligible_status.clone()),
            DependencyChecker::new(backend.registry, schema, checker),
        )
    }

    pub fn check_status(&self, workflow: &WorkflowRef) -> GateResult<()> {
        self.state_gate.check_status(workflow)
    }

    pub fn check_dependency(&self, child: &WorkflowRef, parent: &WorkflowRef) -> GateResult<()> {
        self.dependency.check_dependency(child, parent)
    }

    /// Both checks in order; the first failure is returned.
    pub fn check(&self, child: &WorkflowRef, parent: &WorkflowRef) -> Result<(), GateError> {
        self.check_status(child)?;
        self.check_dependency(child, parent)
    }

    /// Both checks in order, collected into a report. The dependency check is
    /// skipped when the status gate does not pass.
    pub fn validate(&self, child: &WorkflowRef, parent: &WorkflowRef) -> ActivationReport {
        let check_id = Uuid::new_v4();
        let span = tracing::info_span!("activation_check", %check_id, transformation = %child, parent = %parent);
        let _entered = span.enter();

        let status = GateOutcome::from_result(self.check_status(child));
        let dependency = if status.passed() {
            GateOutcome::from_result(self.check_dependency(child, parent))
        } else {
            GateOutcome::Skipped
        };

        let report = ActivationReport {
            check_id,
            checked_at: Utc::now(),
            transformation: child.clone(),
            parent: parent.clone(),
            status,
            dependency,
        };
        tracing::info!(verdict = ?report.verdict(), "activation check finished");
        report
    }
}

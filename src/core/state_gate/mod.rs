use crate::core::error::{GateError, GateResult};
use crate::core::registry::TransformationRegistry;
use crate::core::types::{LifecycleStatus, WorkflowRef};
use std::sync::Arc;

/// Only transformations in this status may be activated unless configured otherwise.
pub const DEFAULT_ELIGIBLE_STATUS: LifecycleStatus = LifecycleStatus::New;

/// Checks that a transformation sits in the single activation-eligible status.
pub struct StateGate {
    registry: Arc<dyn TransformationRegistry>,
    eligible: LifecycleStatus,
}

impl StateGate {
    pub fn new(registry: Arc<dyn TransformationRegistry>, eligible: LifecycleStatus) -> Self {
        Self { registry, eligible }
    }

    /// Succeeds only when the registry reports exactly the eligible status.
    /// Registry failures are returned unchanged.
    pub fn check_status(&self, workflow: &WorkflowRef) -> GateResult<()> {
        let status = self.registry.status(workflow)?;
        if status != self.eligible {
            tracing::warn!(
                workflow = %workflow,
                status = %status,
                eligible = %self.eligible,
                "transformation status does not allow activation"
            );
            return Err(GateError::InvalidState {
                workflow: workflow.to_string(),
                status: status.to_string(),
            });
        }
        tracing::debug!(workflow = %workflow, status = %status, "status check passed");
        Ok(())
    }
}

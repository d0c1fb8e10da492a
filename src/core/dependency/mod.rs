use crate::core::error::{GateError, GateResult};
use crate::core::query::{QueryNormalizer, RawQuery};
use crate::core::registry::TransformationRegistry;
use crate::core::schema::AttributeSchemaProvider;
use crate::core::subsumption::{SubsumptionChecker, SubsumptionOutcome};
use crate::core::types::{QueryDirection, WorkflowRef};
use std::sync::Arc;

/// Verifies that a child transformation's input query only selects data its
/// parent's output query is guaranteed to produce.
pub struct DependencyChecker {
    registry: Arc<dyn TransformationRegistry>,
    schema: Arc<dyn AttributeSchemaProvider>,
    checker: SubsumptionChecker,
}

impl DependencyChecker {
    pub fn new(
        registry: Arc<dyn TransformationRegistry>,
        schema: Arc<dyn AttributeSchemaProvider>,
        checker: SubsumptionChecker,
    ) -> Self {
        Self {
            registry,
            schema,
            checker,
        }
    }

    /// Run the full dependency check for `child` against `parent`.
    ///
    /// Every call re-reads both queries and the schema. An `Incompatible`
    /// verdict is reported as `GateError::Subsumption`; all other failures are
    /// passed through as produced.
    pub fn check_dependency(&self, child: &WorkflowRef, parent: &WorkflowRef) -> GateResult<()> {
        let input_query = self.required_query(child, QueryDirection::Input)?;
        let parent_output_query = self.required_query(parent, QueryDirection::Output)?;

        let child_query = QueryNormalizer::normalize(&input_query)?;
        let parent_query = QueryNormalizer::normalize(&parent_output_query)?;

        let schema = self.schema.attribute_fields().inspect_err(|e| {
            tracing::error!(error = %e, "failed to fetch catalog metadata fields");
        })?;

        tracing::info!(child = %child, parent = %parent, "applying query match");
        match self.checker.check(&child_query, &parent_query, &schema) {
            Ok(SubsumptionOutcome::Compatible) => {
                tracing::info!(
                    child = %child,
                    parent = %parent,
                    attributes = child_query.len(),
                    "input query is covered by parent output query"
                );
                Ok(())
            }
            Ok(SubsumptionOutcome::Incompatible(mismatch)) => Err(mismatch.into()),
            Err(e) => {
                tracing::error!(child = %child, parent = %parent, error = %e, "query match failed");
                Err(e)
            }
        }
    }

    fn required_query(
        &self,
        workflow: &WorkflowRef,
        direction: QueryDirection,
    ) -> GateResult<RawQuery> {
        match self.registry.meta_query(workflow, direction)? {
            Some(query) if !query.is_empty() => Ok(query),
            _ => Err(GateError::MissingQuery {
                workflow: workflow.to_string(),
                direction,
            }),
        }
    }
}

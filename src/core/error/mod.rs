use crate::core::query::ValueSet;
use crate::core::types::QueryDirection;
use serde::Serialize;
use std::fmt;

pub type GateResult<T> = std::result::Result<T, GateError>;

/// Failures surfaced by the activation checks.
///
/// `InvalidState` and `Subsumption` mean the transformation was examined and
/// rejected; every other variant means the check could not be carried out.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GateError {
    #[error("transformation {workflow} cannot be activated from status '{status}'")]
    InvalidState { workflow: String, status: String },

    #[error("no {direction} meta query defined for transformation {workflow}")]
    MissingQuery {
        workflow: String,
        direction: QueryDirection,
    },

    #[error("operation '{operator}' on metadata '{attribute}' is not supported")]
    UnsupportedOperator { attribute: String, operator: String },

    #[error("malformed constraint on metadata '{attribute}': {reason}")]
    MalformedConstraint { attribute: String, reason: String },

    #[error("metadata '{attribute}' is not defined in the catalog")]
    UnknownAttribute { attribute: String },

    #[error("metadata type '{type_label}' of '{attribute}' is not supported")]
    UnsupportedType {
        attribute: String,
        type_label: String,
    },

    #[error("metadata '{attribute}' is not in the parent transformation query")]
    MissingInParent { attribute: String },

    #[error("selection query has no constraints")]
    EmptyQuery,

    #[error("metadata values {child} of '{attribute}' do not match with {parent}")]
    Subsumption {
        attribute: String,
        child: ValueSet,
        parent: ValueSet,
    },

    #[error("failed to fetch {target}: {reason}")]
    RemoteFetch { target: String, reason: String },
}

/// Stable name of each failure, used in reports and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    InvalidStateError,
    MissingQueryError,
    UnsupportedOperatorError,
    MalformedConstraintError,
    UnknownAttributeError,
    UnsupportedTypeError,
    MissingInParentError,
    EmptyQueryError,
    SubsumptionError,
    RemoteFetchError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl GateError {
    pub fn remote_fetch(target: impl Into<String>, reason: impl fmt::Display) -> Self {
        GateError::RemoteFetch {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(attribute: &str, reason: impl Into<String>) -> Self {
        GateError::MalformedConstraint {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::InvalidState { .. } => ErrorKind::InvalidStateError,
            GateError::MissingQuery { .. } => ErrorKind::MissingQueryError,
            GateError::UnsupportedOperator { .. } => ErrorKind::UnsupportedOperatorError,
            GateError::MalformedConstraint { .. } => ErrorKind::MalformedConstraintError,
            GateError::UnknownAttribute { .. } => ErrorKind::UnknownAttributeError,
            GateError::UnsupportedType { .. } => ErrorKind::UnsupportedTypeError,
            GateError::MissingInParent { .. } => ErrorKind::MissingInParentError,
            GateError::EmptyQuery => ErrorKind::EmptyQueryError,
            GateError::Subsumption { .. } => ErrorKind::SubsumptionError,
            GateError::RemoteFetch { .. } => ErrorKind::RemoteFetchError,
        }
    }

    /// True when the transformation was judged and found ineligible, as opposed
    /// to the check itself failing.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GateError::InvalidState { .. } | GateError::Subsumption { .. }
        )
    }
}

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a transformation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowRef(String);

impl WorkflowRef {
    pub fn new(id: impl Into<String>) -> Self {
        WorkflowRef(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkflowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkflowRef {
    fn from(id: &str) -> Self {
        WorkflowRef::new(id)
    }
}

impl From<String> for WorkflowRef {
    fn from(id: String) -> Self {
        WorkflowRef(id)
    }
}

/// Lifecycle label attached to a transformation by the registry.
///
/// Labels the registry reports that are not in the known set are kept verbatim
/// in `Unknown` so they can be surfaced in diagnostics. Parsing is exact and
/// case-sensitive: `"new"` is not `New`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LifecycleStatus {
    New,
    Active,
    Stopped,
    Flush,
    Completing,
    Completed,
    Cleaning,
    Cleaned,
    Archived,
    Deleted,
    Unknown(String),
}

impl LifecycleStatus {
    pub fn parse(label: &str) -> Self {
        match label {
            "New" => LifecycleStatus::New,
            "Active" => LifecycleStatus::Active,
            "Stopped" => LifecycleStatus::Stopped,
            "Flush" => LifecycleStatus::Flush,
            "Completing" => LifecycleStatus::Completing,
            "Completed" => LifecycleStatus::Completed,
            "Cleaning" => LifecycleStatus::Cleaning,
            "Cleaned" => LifecycleStatus::Cleaned,
            "Archived" => LifecycleStatus::Archived,
            "Deleted" => LifecycleStatus::Deleted,
            other => LifecycleStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LifecycleStatus::New => "New",
            LifecycleStatus::Active => "Active",
            LifecycleStatus::Stopped => "Stopped",
            LifecycleStatus::Flush => "Flush",
            LifecycleStatus::Completing => "Completing",
            LifecycleStatus::Completed => "Completed",
            LifecycleStatus::Cleaning => "Cleaning",
            LifecycleStatus::Cleaned => "Cleaned",
            LifecycleStatus::Archived => "Archived",
            LifecycleStatus::Deleted => "Deleted",
            LifecycleStatus::Unknown(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LifecycleStatus::Unknown(_))
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleStatus {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(LifecycleStatus::parse(value))
    }
}

impl From<String> for LifecycleStatus {
    fn from(label: String) -> Self {
        LifecycleStatus::parse(&label)
    }
}

impl From<LifecycleStatus> for String {
    fn from(status: LifecycleStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Which of a transformation's selection queries is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryDirection {
    Input,
    Output,
}

impl QueryDirection {
    /// Lowercase form used in registry URLs.
    pub fn as_path(self) -> &'static str {
        match self {
            QueryDirection::Input => "input",
            QueryDirection::Output => "output",
        }
    }
}

impl fmt::Display for QueryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryDirection::Input => write!(f, "Input"),
            QueryDirection::Output => write!(f, "Output"),
        }
    }
}

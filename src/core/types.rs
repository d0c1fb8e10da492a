pub use prodgate_types::{Literal, LifecycleStatus, QueryDirection, ScalarType, WorkflowRef};

//! Data model shared by the prodgate checker, its registry backends and the CLI.
//!
//! Everything here is data-only: no registry access, no I/O.

pub mod literal;
pub mod workflow;

pub use literal::{Literal, ScalarType};
pub use workflow::{LifecycleStatus, QueryDirection, WorkflowRef};

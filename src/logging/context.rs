use crate::cli::{Args, OutputFormat};
use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A person reading text output in a terminal.
    Interactive,
    /// Another program consuming JSON output, e.g. an orchestrator.
    MachineReadable,
}

impl ExecutionContext {
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::MachineReadable)
    }
}

/// Derive the active execution context from parsed CLI arguments plus overrides.
pub fn detect_context(args: &Args) -> ExecutionContext {
    if quiet_override_enabled() {
        return ExecutionContext::MachineReadable;
    }
    match args.global.format {
        OutputFormat::Json => ExecutionContext::MachineReadable,
        OutputFormat::Text => ExecutionContext::Interactive,
    }
}

fn quiet_override_enabled() -> bool {
    env::var("PRODGATE_QUIET")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}

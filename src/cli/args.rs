use clap::Args;
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Workspace holding prodgate.toml and .prodgate/ (default: current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub workspace: Option<PathBuf>,

    /// Path to custom config file (default: {workspace}/prodgate.toml)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Registry manifest path or http(s) base URL; overrides configuration
    #[arg(long, global = true, value_name = "SOURCE", help_heading = "Configuration")]
    pub registry: Option<String>,

    /// Emit either terminal-friendly text or machine-readable JSON
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        help_heading = "Output Options"
    )]
    pub format: OutputFormat,

    /// Require the child value set to lie within the parent's
    #[arg(long, global = true, help_heading = "Matching Policy")]
    pub strict: bool,

    /// Compare numeric values after coercing them to the attribute type
    #[arg(long, global = true, help_heading = "Matching Policy")]
    pub coerce_numeric: bool,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON payload suitable for downstream tooling
    Json,
}

#[derive(Args, Clone, Debug)]
pub struct StatusArgs {
    /// Transformation to inspect
    #[arg(value_name = "ID")]
    pub transformation: String,
}

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Transformation about to be activated
    #[arg(value_name = "ID")]
    pub transformation: String,

    /// Transformation whose output feeds it
    #[arg(long, value_name = "PARENT")]
    pub parent: String,
}

#[derive(Args, Clone, Debug)]
pub struct NormalizeArgs {
    /// Selection query as a JSON object, e.g. '{"Run": {"in": [1, 2]}}'
    #[arg(value_name = "QUERY_JSON")]
    pub query: String,
}

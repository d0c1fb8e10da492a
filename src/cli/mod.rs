pub mod args;
pub mod commands;

pub use args::{CheckArgs, GlobalArgs, NormalizeArgs, OutputFormat, StatusArgs};
use crate::core::ConfigLoader;
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\n{all-args}{after-help}\n";

fn long_help() -> String {
    let mut help = String::from(
        "Exit status: 0 when the check passed, 1 when the transformation was rejected, 2 when the check could not be performed.\n\nENVIRONMENT:\n",
    );
    for line in ConfigLoader::env_var_documentation() {
        help.push_str("    ");
        help.push_str(line);
        help.push('\n');
    }
    help
}

#[derive(Parser, Debug)]
#[command(name = "prodgate")]
#[command(version = crate::VERSION)]
#[command(about = "Pre-activation checks for data-production transformations")]
#[command(help_template = HELP_TEMPLATE)]
#[command(subcommand_help_heading = "GATE COMMANDS")]
#[command(after_long_help = long_help())]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Check that a transformation may leave its current status",
        long_about = "Status asks the registry for the transformation's lifecycle status and passes only when it is the activation-eligible one (New unless configured otherwise).",
        after_help = "Example:\n    prodgate status 1042 --registry registry.yaml"
    )]
    Status(StatusArgs),
    #[command(
        about = "Check a transformation's input against its parent's output",
        long_about = "Check normalizes the child's input query and the parent's output query and verifies, attribute by attribute, that the selected values are compatible.",
        after_help = "Example:\n    prodgate check 1042 --parent 1007 --strict"
    )]
    Check(CheckArgs),
    #[command(
        about = "Run every pre-activation check and report the verdict",
        long_about = "Validate runs the status check and, when it passes, the dependency check, then prints a report with one outcome per check.",
        after_help = "Example:\n    prodgate validate 1042 --parent 1007 --format json"
    )]
    Validate(CheckArgs),
    #[command(
        about = "Print the normalized form of a selection query",
        long_about = "Normalize rewrites every constraint of the query into an 'in' constraint over a set of values, without contacting a registry.",
        after_help = "Example:\n    prodgate normalize '{\"Run\": {\"=\": 100}}'"
    )]
    Normalize(NormalizeArgs),
}

/// Result of a CLI check, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Rejected,
    Failed,
}

impl CheckOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            CheckOutcome::Passed => 0,
            CheckOutcome::Rejected => 1,
            CheckOutcome::Failed => 2,
        }
    }
}

pub fn run(args: Args) -> crate::Result<CheckOutcome> {
    match &args.command {
        Command::Status(status_args) => commands::status(&args.global, status_args),
        Command::Check(check_args) => commands::check(&args.global, check_args),
        Command::Validate(check_args) => commands::validate(&args.global, check_args),
        Command::Normalize(normalize_args) => commands::normalize(&args.global, normalize_args),
    }
}

use clap::Parser;
use prodgate::cli::{self, Args, CheckOutcome};
use prodgate::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let _logging_guard = match logging::init(&args) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {:#}", e);
            None
        }
    };

    match cli::run(args) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {:#}", e);
            ExitCode::from(CheckOutcome::Failed.exit_code())
        }
    }
}

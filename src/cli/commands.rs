use crate::{
    cli::args::{CheckArgs, GlobalArgs, NormalizeArgs, OutputFormat, StatusArgs},
    cli::CheckOutcome,
    core::{
        ActivationReport, ActivationValidator, ConfigLoader, ConfigValidator, GateConfig,
        GateOutcome, NumericMatching, QueryNormalizer, RawQuery, RegistrySource,
        SubsetDirection, Verdict, WorkflowRef,
    },
    Result,
};
use anyhow::{anyhow, Context};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Serialize)]
struct CheckSummary<'a> {
    check: &'static str,
    transformation: &'a WorkflowRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a WorkflowRef>,
    outcome: &'a GateOutcome,
}

#[derive(Serialize)]
struct ReportView<'a> {
    #[serde(flatten)]
    report: &'a ActivationReport,
    verdict: Verdict,
}

impl From<&GateOutcome> for CheckOutcome {
    fn from(outcome: &GateOutcome) -> Self {
        match outcome {
            GateOutcome::Passed => CheckOutcome::Passed,
            GateOutcome::Rejected { .. } => CheckOutcome::Rejected,
            GateOutcome::Error { .. } | GateOutcome::Skipped => CheckOutcome::Failed,
        }
    }
}

impl From<Verdict> for CheckOutcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Eligible => CheckOutcome::Passed,
            Verdict::Rejected => CheckOutcome::Rejected,
            Verdict::Undetermined => CheckOutcome::Failed,
        }
    }
}

fn workspace_path(global: &GlobalArgs) -> PathBuf {
    global
        .workspace
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration with command-line flags applied last.
pub fn load_config(global: &GlobalArgs) -> Result<GateConfig> {
    let mut config = match &global.config {
        Some(path) => {
            if !path.exists() {
                return Err(anyhow!("config file {} not found", path.display()));
            }
            ConfigLoader::load_with_overrides(path)?
        }
        None => ConfigLoader::load_from_workspace(&workspace_path(global))?,
    };

    if let Some(registry) = &global.registry {
        config.registry.source = Some(registry.clone());
    }
    if global.strict {
        config.subsumption.direction = SubsetDirection::ChildWithinParent;
    }
    if global.coerce_numeric {
        config.subsumption.numeric = NumericMatching::Coerce;
    }

    ConfigValidator::validate(&config)?;
    Ok(config)
}

fn connect(global: &GlobalArgs) -> Result<ActivationValidator> {
    let config = load_config(global)?;
    let source = RegistrySource::parse(
        ConfigValidator::require_registry(&config)?,
        &workspace_path(global),
    )?;
    tracing::debug!(source = ?source, policy = ?config.subsumption, "connecting to registry");
    let backend = source
        .connect(Duration::from_secs(config.registry.timeout_secs))
        .context("failed to open registry")?;
    Ok(ActivationValidator::from_config(&config, backend))
}

pub fn status(global: &GlobalArgs, args: &StatusArgs) -> Result<CheckOutcome> {
    let validator = connect(global)?;
    let transformation = WorkflowRef::from(args.transformation.as_str());
    let outcome = GateOutcome::from_result(validator.check_status(&transformation));

    emit_summary(
        global.format,
        &CheckSummary {
            check: "status",
            transformation: &transformation,
            parent: None,
            outcome: &outcome,
        },
    )?;
    Ok(CheckOutcome::from(&outcome))
}

pub fn check(global: &GlobalArgs, args: &CheckArgs) -> Result<CheckOutcome> {
    let validator = connect(global)?;
    let transformation = WorkflowRef::from(args.transformation.as_str());
    let parent = WorkflowRef::from(args.parent.as_str());
    let outcome =
        GateOutcome::from_result(validator.check_dependency(&transformation, &parent));

    emit_summary(
        global.format,
        &CheckSummary {
            check: "dependency",
            transformation: &transformation,
            parent: Some(&parent),
            outcome: &outcome,
        },
    )?;
    Ok(CheckOutcome::from(&outcome))
}

pub fn validate(global: &GlobalArgs, args: &CheckArgs) -> Result<CheckOutcome> {
    let validator = connect(global)?;
    let report = validator.validate(
        &WorkflowRef::from(args.transformation.as_str()),
        &WorkflowRef::from(args.parent.as_str()),
    );
    let verdict = report.verdict();

    match global.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&ReportView {
                report: &report,
                verdict,
            })?
        ),
        OutputFormat::Text => {
            println!(
                "Activation check {} for transformation {} (parent {})",
                report.check_id, report.transformation, report.parent
            );
            println!("  status:     {}", describe_outcome(&report.status));
            println!("  dependency: {}", describe_outcome(&report.dependency));
            println!("Verdict: {}", describe_verdict(verdict));
        }
    }
    Ok(CheckOutcome::from(verdict))
}

pub fn normalize(global: &GlobalArgs, args: &NormalizeArgs) -> Result<CheckOutcome> {
    let raw: RawQuery =
        serde_json::from_str(&args.query).context("query must be a JSON object")?;

    match QueryNormalizer::normalize(&raw) {
        Ok(normalized) => {
            match global.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&normalized)?),
                OutputFormat::Text => {
                    for (attribute, constraint) in normalized.iter() {
                        println!("{} {}", attribute, constraint);
                    }
                }
            }
            Ok(CheckOutcome::Passed)
        }
        Err(e) => {
            let outcome = GateOutcome::from_result(Err(e));
            match global.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                OutputFormat::Text => println!("{}", describe_outcome(&outcome)),
            }
            Ok(CheckOutcome::from(&outcome))
        }
    }
}

fn emit_summary(format: OutputFormat, summary: &CheckSummary<'_>) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => match summary.parent {
            Some(parent) => println!(
                "{} check for transformation {} (parent {}): {}",
                summary.check,
                summary.transformation,
                parent,
                describe_outcome(summary.outcome)
            ),
            None => println!(
                "{} check for transformation {}: {}",
                summary.check,
                summary.transformation,
                describe_outcome(summary.outcome)
            ),
        },
    }
    Ok(())
}

fn describe_outcome(outcome: &GateOutcome) -> String {
    match outcome {
        GateOutcome::Passed => "passed".to_string(),
        GateOutcome::Rejected { message, .. } => format!("rejected: {}", message),
        GateOutcome::Error { kind, message } => format!("error [{}]: {}", kind, message),
        GateOutcome::Skipped => "skipped".to_string(),
    }
}

fn describe_verdict(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Eligible => "eligible",
        Verdict::Rejected => "rejected",
        Verdict::Undetermined => "undetermined",
    }
}

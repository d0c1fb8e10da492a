use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const REGISTRY: &str = r#"
transformations:
  "100":
    status: Active
    output_query:
      Run: { in: [100, 101, 102] }
      Energy: { in: [13.6] }
  "101":
    status: New
    input_query:
      Run: { in: [100, 101] }
  "102":
    status: New
    input_query:
      Run: { in: [7] }
  "103":
    status: Active
    input_query:
      Run: 100
  "104":
    status: New
    input_query:
      Energy: 13.6
catalog:
  file_fields:
    Run: int
  directory_fields:
    Energy: float
"#;

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("registry.yaml"), REGISTRY).unwrap();
    fs::write(
        temp_dir.path().join("prodgate.toml"),
        "[registry]\nsource = \"registry.yaml\"\n",
    )
    .unwrap();
    temp_dir
}

fn prodgate(workspace: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("prodgate"));
    cmd.env_remove("PRODGATE_REGISTRY")
        .env_remove("RUST_LOG")
        .arg("--workspace")
        .arg(workspace);
    cmd
}

#[test]
fn test_status_passes_for_new_transformation() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["status", "101"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("status check for transformation 101: passed"));
}

#[test]
fn test_status_rejects_active_transformation() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["status", "100"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("cannot be activated from status 'Active'"));
}

#[test]
fn test_check_passes_for_subset() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["check", "101", "--parent", "100"])
        .assert()
        .code(0);
}

#[test]
fn test_check_rejects_disjoint_values_as_json() {
    let ws = workspace();
    let output = prodgate(ws.path())
        .args(["--format", "json", "check", "102", "--parent", "100"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["check"], "dependency");
    assert_eq!(body["parent"], "100");
    assert_eq!(body["outcome"]["result"], "rejected");
    assert_eq!(body["outcome"]["kind"], "SubsumptionError");
}

#[test]
fn test_validate_skips_dependency_after_status_rejection() {
    let ws = workspace();
    let output = prodgate(ws.path())
        .args(["validate", "103", "--parent", "100", "--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["verdict"], "rejected");
    assert_eq!(body["status"]["kind"], "InvalidStateError");
    assert_eq!(body["dependency"]["result"], "skipped");
    assert!(body["check_id"].is_string());
}

#[test]
fn test_validate_text_report() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["validate", "101", "--parent", "100"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Verdict: eligible"));
}

#[test]
fn test_float_attribute_matches_exactly() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["check", "104", "--parent", "100"])
        .assert()
        .code(0);
}

#[test]
fn test_unknown_transformation_cannot_be_checked() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["status", "999"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("RemoteFetchError"));
}

#[test]
fn test_missing_registry_is_a_failure() {
    let temp_dir = TempDir::new().unwrap();
    prodgate(temp_dir.path())
        .args(["status", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no registry configured"));
}

#[test]
fn test_registry_flag_overrides_config() {
    let ws = workspace();
    let elsewhere = TempDir::new().unwrap();
    let manifest = elsewhere.path().join("other.yaml");
    fs::write(&manifest, "transformations:\n  \"5\": { status: New }\n").unwrap();

    prodgate(ws.path())
        .arg("--registry")
        .arg(&manifest)
        .args(["status", "5"])
        .assert()
        .code(0);
}

#[test]
fn test_normalize_prints_in_constraints() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["--format", "json", "normalize", r#"{"Run": 100, "Site": {"in": ["A", "B"]}}"#])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""Run": {"#))
        .stdout(predicate::str::contains(r#""in": ["#));
}

#[test]
fn test_normalize_rewrites_equals_as_in() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["normalize", r#"{"Run": {"=": 100}}"#])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Run in [100]"))
        .stdout(predicate::str::contains("=").not());
}

#[test]
fn test_normalize_rejects_integer_out_of_range() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["normalize", r#"{"Run": 18446744073709551615}"#])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("MalformedConstraintError"));
}

#[test]
fn test_normalize_reports_unsupported_operator() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["normalize", r#"{"Run": {"between": [1, 10]}}"#])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("UnsupportedOperatorError"));
}

#[test]
fn test_normalize_rejects_non_object() {
    let ws = workspace();
    prodgate(ws.path())
        .args(["normalize", "[1, 2]"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("query must be a JSON object"));
}

use prodgate::core::config::{ConfigLoader, ConfigValidator};
use prodgate::core::{LifecycleStatus, NumericMatching, SubsetDirection};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn clear_prodgate_env() {
    for v in &[
        "PRODGATE_ELIGIBLE_STATUS",
        "PRODGATE_SUBSUMPTION_DIRECTION",
        "PRODGATE_NUMERIC_MATCHING",
        "PRODGATE_SCHEMA_CACHE_TTL",
        "PRODGATE_REGISTRY",
        "PRODGATE_REGISTRY_TIMEOUT",
    ] {
        env::remove_var(v);
    }
}

#[test]
#[serial]
fn test_config_loading_integration() {
    clear_prodgate_env();
    let temp_dir = TempDir::new().unwrap();
    let workspace_path = temp_dir.path();

    let config_content = r#"
[gate]
eligible_status = "New"

[subsumption]
direction = "child-within-parent"
numeric = "coerce"

[schema]
string_labels = ["VARCHAR(128)", "TEXT"]
integer_labels = ["int", "INTEGER"]
float_labels = ["float", "DOUBLE"]
cache_ttl_secs = 300

[registry]
source = "registry.yaml"
timeout_secs = 15
"#;
    fs::write(workspace_path.join("prodgate.toml"), config_content).unwrap();

    let config = ConfigLoader::load_from_workspace(workspace_path).unwrap();
    ConfigValidator::validate(&config).unwrap();

    assert_eq!(config.gate.eligible_status, LifecycleStatus::New);
    assert_eq!(config.subsumption.direction, SubsetDirection::ChildWithinParent);
    assert_eq!(config.subsumption.numeric, NumericMatching::Coerce);
    assert_eq!(config.schema.labels.string_labels, vec!["VARCHAR(128)", "TEXT"]);
    assert_eq!(config.schema.cache_ttl_secs, 300);
    assert_eq!(
        ConfigValidator::require_registry(&config).unwrap(),
        "registry.yaml"
    );
    assert_eq!(config.registry.timeout_secs, 15);
}

#[test]
#[serial]
fn test_env_overrides_take_precedence() {
    clear_prodgate_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("prodgate.toml"),
        "[registry]\nsource = \"file.yaml\"\n",
    )
    .unwrap();

    env::set_var("PRODGATE_REGISTRY", "env.yaml");
    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    clear_prodgate_env();

    assert_eq!(config.registry.source.as_deref(), Some("env.yaml"));
}

#[test]
#[serial]
fn test_conflicting_labels_fail_validation() {
    clear_prodgate_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("prodgate.toml"),
        r#"
[schema]
integer_labels = ["int", "number"]
float_labels = ["float", "number"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    let err = ConfigValidator::validate(&config).unwrap_err();
    assert!(err.to_string().contains("number"));
}

#[test]
#[serial]
fn test_explicit_config_file() {
    clear_prodgate_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    fs::write(&path, "[gate]\neligible_status = \"Stopped\"\n").unwrap();

    let config = ConfigLoader::load_with_overrides(&path).unwrap();
    assert_eq!(config.gate.eligible_status, LifecycleStatus::Stopped);
}

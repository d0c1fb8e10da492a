use prodgate::core::{
    ActivationValidator, AttributeSchema, DependencyChecker, ErrorKind, GateError,
    ManifestRegistry, QueryDirection, QueryNormalizer, RawQuery, StateGate,
    SubsumptionChecker, SubsumptionOutcome, Verdict, WorkflowRef, DEFAULT_ELIGIBLE_STATUS,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Registry with child "2" (status New) reading from parent "1".
fn registry(child_input: Value, parent_output: Value) -> Arc<ManifestRegistry> {
    let document = json!({
        "transformations": {
            "2": {"status": "New", "input_query": child_input},
            "1": {"status": "Active", "output_query": parent_output},
        },
        "catalog": {
            "file_fields": {"Run": "int", "Energy": "float"},
            "directory_fields": {"Site": "VARCHAR(128)"},
        },
    });
    Arc::new(ManifestRegistry::from_document(&document.to_string()).unwrap())
}

fn check_dependency(child_input: Value, parent_output: Value) -> Result<(), GateError> {
    let registry = registry(child_input, parent_output);
    DependencyChecker::new(registry.clone(), registry, SubsumptionChecker::default())
        .check_dependency(&WorkflowRef::from("2"), &WorkflowRef::from("1"))
}

fn raw(value: Value) -> RawQuery {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_child_subset_of_parent_passes() {
    let result = check_dependency(
        json!({"Run": {"in": [100, 101]}}),
        json!({"Run": {"in": [100, 101, 102]}}),
    );
    assert!(result.is_ok());
}

#[test]
fn test_bare_literal_and_single_in_are_equivalent() {
    assert_eq!(
        QueryNormalizer::normalize(&raw(json!({"Run": 100}))).unwrap(),
        QueryNormalizer::normalize(&raw(json!({"Run": {"in": [100]}}))).unwrap()
    );
    assert!(check_dependency(json!({"Run": 100}), json!({"Run": {"in": [100]}})).is_ok());
}

#[test]
fn test_attribute_missing_in_parent() {
    let err = check_dependency(json!({"Site": {"in": ["X"]}}), json!({"Run": {"in": [1]}}))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInParentError);
    assert!(err.to_string().contains("'Site'"));
}

#[test]
fn test_between_operator_is_unsupported() {
    let err = check_dependency(json!({"Run": {"between": [1, 10]}}), json!({"Run": 1}))
        .unwrap_err();
    assert_eq!(
        err,
        GateError::UnsupportedOperator {
            attribute: "Run".to_string(),
            operator: "between".to_string(),
        }
    );
}

#[test]
fn test_empty_child_query_is_missing() {
    let err = check_dependency(json!({}), json!({"Run": 1})).unwrap_err();
    assert_eq!(
        err,
        GateError::MissingQuery {
            workflow: "2".to_string(),
            direction: QueryDirection::Input,
        }
    );
}

#[test]
fn test_empty_parent_query_is_missing() {
    let err = check_dependency(json!({"Run": 1}), json!({})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingQueryError);
}

#[test]
fn test_status_gate_accepts_only_new() {
    let document = r#"
transformations:
  "active": { status: Active }
  "fresh": { status: New }
  "odd": { status: "??" }
"#;
    let registry = Arc::new(ManifestRegistry::from_document(document).unwrap());
    let gate = StateGate::new(registry, DEFAULT_ELIGIBLE_STATUS);

    assert!(gate.check_status(&WorkflowRef::from("fresh")).is_ok());
    for id in ["active", "odd"] {
        let err = gate.check_status(&WorkflowRef::from(id)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStateError);
    }
}

#[test]
fn test_every_literal_normalizes_like_its_singleton() {
    for literal in [json!(0), json!(-7), json!(2.5), json!("ATLAS"), json!("")] {
        assert_eq!(
            QueryNormalizer::normalize(&raw(json!({"a": literal.clone()}))).unwrap(),
            QueryNormalizer::normalize(&raw(json!({"a": {"in": [literal]}}))).unwrap()
        );
    }
}

#[test]
fn test_identical_sets_are_compatible() {
    let schema: AttributeSchema = [("Run", "int"), ("Site", "VARCHAR(128)")]
        .into_iter()
        .collect();
    let query = QueryNormalizer::normalize(&raw(json!({
        "Run": {"in": [1, 2]},
        "Site": "CERN",
    })))
    .unwrap();
    let outcome = SubsumptionChecker::default()
        .check(&query, &query, &schema)
        .unwrap();
    assert_eq!(outcome, SubsumptionOutcome::Compatible);
}

#[test]
fn test_disjoint_sets_are_incompatible_not_an_error() {
    let schema: AttributeSchema = [("Run", "int")].into_iter().collect();
    let child = QueryNormalizer::normalize(&raw(json!({"Run": {"in": [1, 2]}}))).unwrap();
    let parent = QueryNormalizer::normalize(&raw(json!({"Run": {"in": [3, 4]}}))).unwrap();

    let outcome = SubsumptionChecker::default()
        .check(&child, &parent, &schema)
        .unwrap();
    assert!(!outcome.is_compatible());
}

#[test]
fn test_full_activation_flow() {
    let registry = registry(json!({"Run": {"in": [100]}}), json!({"Run": {"in": [100, 200]}}));
    let validator = ActivationValidator::new(
        StateGate::new(registry.clone(), DEFAULT_ELIGIBLE_STATUS),
        DependencyChecker::new(registry.clone(), registry, SubsumptionChecker::default()),
    );

    let report = validator.validate(&WorkflowRef::from("2"), &WorkflowRef::from("1"));
    assert_eq!(report.verdict(), Verdict::Eligible);

    let reversed = validator.validate(&WorkflowRef::from("1"), &WorkflowRef::from("2"));
    assert_eq!(reversed.verdict(), Verdict::Rejected);
}

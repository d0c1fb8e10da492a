use prodgate::core::{
    ActivationValidator, AttributeSchemaProvider, DependencyChecker, ErrorKind, HttpRegistry,
    LifecycleStatus, QueryDirection, StateGate, SubsumptionChecker, TransformationRegistry,
    Verdict, WorkflowRef, DEFAULT_ELIGIBLE_STATUS,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/api/", server.uri())).unwrap()
}

fn http_registry(base: Url) -> HttpRegistry {
    HttpRegistry::new(base, Duration::from_secs(5)).unwrap()
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// The registry client blocks and may not be created or dropped on an async
// worker, so it lives entirely inside spawn_blocking.
async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reads_status_queries_and_catalog() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/transformations/12/status", json!({"status": "New"})).await;
    mount_json(
        &server,
        "/api/transformations/12/metaquery/input",
        json!({"query": {"Run": {"in": [1, 2]}}}),
    )
    .await;
    mount_json(
        &server,
        "/api/transformations/12/metaquery/output",
        json!({"query": null}),
    )
    .await;
    mount_json(
        &server,
        "/api/catalog/metadata-fields",
        json!({"file_fields": {"Run": "int"}, "directory_fields": {"Site": "VARCHAR(128)"}}),
    )
    .await;

    let base = base_url(&server);
    let (status, input, output, schema) = blocking(move || {
        let registry = http_registry(base);
        let id = WorkflowRef::from("12");
        (
            registry.status(&id),
            registry.meta_query(&id, QueryDirection::Input),
            registry.meta_query(&id, QueryDirection::Output),
            registry.attribute_fields(),
        )
    })
    .await;

    assert_eq!(status.unwrap(), LifecycleStatus::New);
    assert_eq!(input.unwrap().unwrap()["Run"], json!({"in": [1, 2]}));
    assert!(output.unwrap().is_none());
    let schema = schema.unwrap();
    assert_eq!(schema.type_label("Run"), Some("int"));
    assert_eq!(schema.type_label("Site"), Some("VARCHAR(128)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_is_remote_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transformations/9/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let base = base_url(&server);
    let err = blocking(move || http_registry(base).status(&WorkflowRef::from("9")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteFetchError);
    assert!(err.to_string().contains("503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unexpected_body_is_remote_fetch_error() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/transformations/9/status", json!({"state": "New"})).await;

    let base = base_url(&server);
    let err = blocking(move || http_registry(base).status(&WorkflowRef::from("9")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteFetchError);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_catalog_is_remote_fetch_error() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/catalog/metadata-fields", json!({})).await;

    let base = base_url(&server);
    let err = blocking(move || http_registry(base).attribute_fields())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteFetchError);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_validation_over_http() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/transformations/2/status", json!({"status": "New"})).await;
    mount_json(
        &server,
        "/api/transformations/2/metaquery/input",
        json!({"query": {"Run": 100}}),
    )
    .await;
    mount_json(
        &server,
        "/api/transformations/1/metaquery/output",
        json!({"query": {"Run": {"in": [100, 101]}}}),
    )
    .await;
    mount_json(
        &server,
        "/api/catalog/metadata-fields",
        json!({"file_fields": {"Run": "int"}}),
    )
    .await;

    let base = base_url(&server);
    let report = blocking(move || {
        let registry = Arc::new(http_registry(base));
        let validator = ActivationValidator::new(
            StateGate::new(registry.clone(), DEFAULT_ELIGIBLE_STATUS),
            DependencyChecker::new(registry.clone(), registry, SubsumptionChecker::default()),
        );
        validator.validate(&WorkflowRef::from("2"), &WorkflowRef::from("1"))
    })
    .await;

    assert_eq!(report.verdict(), Verdict::Eligible);
}

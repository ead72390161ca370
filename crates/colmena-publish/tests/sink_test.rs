use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use colmena_core::{DcpConfig, ServiceDescription};
use colmena_publish::{
    DcpSink, GrpcError, GrpcExecutor, PublishError, PublishSink, PublishedDefinition, ZenohSink,
    publish_definition,
};
use mockall::mock;
use serde_json::json;
use tempfile::TempDir;

mock! {
    Executor {}

    impl GrpcExecutor for Executor {
        async fn exec(&self, args: &[String]) -> Result<String, GrpcError>;
    }
}

/// Sink that keeps every definition it receives.
#[derive(Default)]
struct RecordingSink {
    published: Mutex<Vec<PublishedDefinition>>,
}

impl PublishSink for RecordingSink {
    async fn publish(&self, definition: &PublishedDefinition) -> Result<(), PublishError> {
        self.published.lock().unwrap().push(definition.clone());
        Ok(())
    }
}

fn description() -> ServiceDescription {
    ServiceDescription::from_value(json!({
        "id": {"value": "test-service"},
        "config": "test",
        "dockerRoleDefinitions": [{"id": "w", "imageId": "alice/worker"}],
        "dockerContextDefinitions": []
    }))
    .unwrap()
}

fn definition() -> PublishedDefinition {
    PublishedDefinition::new(&description(), "colmena_service_definitions").unwrap()
}

// ── Definition Tests ──

#[test]
fn definition_key_uses_prefix_and_service_id() {
    let definition = definition();

    assert_eq!(definition.service_id, "test-service");
    assert_eq!(definition.key, "colmena_service_definitions/test-service");
    assert_eq!(definition.payload, description().to_json());
}

#[test]
fn definition_requires_service_id() {
    let description =
        ServiceDescription::from_value(json!({"dockerRoleDefinitions": []})).unwrap();

    let result = PublishedDefinition::new(&description, "colmena_service_definitions");

    assert!(matches!(result, Err(PublishError::MissingServiceId { .. })));
}

#[tokio::test]
async fn publish_definition_puts_exactly_once() {
    let sink = RecordingSink::default();

    let published = publish_definition(&sink, &description(), "colmena_service_definitions")
        .await
        .unwrap();

    let recorded = sink.published.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0], published);
    let payload: serde_json::Value = serde_json::from_str(&recorded[0].payload).unwrap();
    assert_eq!(payload["config"], "test");
    assert_eq!(payload["dockerRoleDefinitions"][0]["imageId"], "alice/worker");
}

#[tokio::test]
async fn publish_definition_without_id_never_reaches_sink() {
    let sink = RecordingSink::default();
    let description = ServiceDescription::from_value(json!({"id": {}})).unwrap();

    let result = publish_definition(&sink, &description, "colmena_service_definitions").await;

    assert!(result.is_err());
    assert!(sink.published.lock().unwrap().is_empty());
}

// ── DCP Tests ──

#[tokio::test]
async fn dcp_calls_add_service_with_payload() {
    let mut mock = MockExecutor::new();
    let expected_payload = definition().payload;

    mock.expect_exec()
        .withf(move |args| {
            args == [
                "--plaintext",
                "-d",
                expected_payload.as_str(),
                "dcp.internal:6000",
                "ColmenaPlatform/AddService",
            ]
        })
        .times(1)
        .returning(|_| Ok("{\n  \"status\": \"OK\"\n}\n".to_owned()));

    let config = DcpConfig {
        host: Some("dcp.internal".to_owned()),
        port: Some(6000),
    };
    let sink = DcpSink::with_executor(&config, mock);

    sink.publish(&definition()).await.unwrap();
}

#[test]
fn dcp_defaults_to_localhost_5555() {
    let sink = DcpSink::with_executor(&DcpConfig::default(), MockExecutor::new());

    assert_eq!(sink.endpoint(), "localhost:5555");
}

#[tokio::test]
async fn dcp_rpc_failure_is_publish_error() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|_| {
        Err(GrpcError::CommandFailed {
            args: vec![],
            status: "exit status: 1".to_owned(),
            stderr: "connection refused".to_owned(),
        })
    });

    let sink = DcpSink::with_executor(&DcpConfig::default(), mock);
    let result = sink.publish(&definition()).await;

    assert!(matches!(
        result,
        Err(PublishError::Rpc { ref endpoint, .. }) if endpoint == "localhost:5555"
    ));
}

#[tokio::test]
async fn dcp_rejects_non_json_reply() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .returning(|_| Ok("Error invoking method".to_owned()));

    let sink = DcpSink::with_executor(&DcpConfig::default(), mock);
    let result = sink.publish(&definition()).await;

    assert!(matches!(result, Err(PublishError::InvalidResponse { .. })));
}

// ── Zenoh Tests ──

#[tokio::test]
async fn zenoh_missing_config_fails_before_connecting() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("zenoh_config.json5");
    let sink = ZenohSink::new(&config_path);

    let result = sink.publish(&definition()).await;

    assert!(matches!(
        result,
        Err(PublishError::ZenohConfig { ref path, .. }) if *path == config_path
    ));
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn write_zenoh_config(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zenoh_puts_definition_once_under_service_key() {
    let tmp = TempDir::new().unwrap();
    let port = free_port();
    let listener_config = write_zenoh_config(
        tmp.path(),
        "listener.json5",
        &format!(
            r#"{{
  mode: "peer",
  listen: {{ endpoints: ["tcp/127.0.0.1:{port}"] }},
  scouting: {{ multicast: {{ enabled: false }} }},
}}"#
        ),
    );
    let sink_config = write_zenoh_config(
        tmp.path(),
        "zenoh_config.json5",
        &format!(
            r#"{{
  mode: "client",
  connect: {{ endpoints: ["tcp/127.0.0.1:{port}"] }},
  scouting: {{ multicast: {{ enabled: false }} }},
}}"#
        ),
    );

    let listener = zenoh::open(zenoh::Config::from_file(&listener_config).unwrap())
        .await
        .unwrap();
    let subscriber = listener
        .declare_subscriber("colmena_service_definitions/**")
        .await
        .unwrap();

    let sink = ZenohSink::new(&sink_config);
    let published = publish_definition(&sink, &description(), "colmena_service_definitions")
        .await
        .unwrap();

    let sample = tokio::time::timeout(Duration::from_secs(10), subscriber.recv_async())
        .await
        .expect("definition was not delivered")
        .unwrap();
    assert_eq!(
        sample.key_expr().as_str(),
        "colmena_service_definitions/test-service"
    );
    assert_eq!(sample.key_expr().as_str(), published.key);
    assert_eq!(
        sample.payload().to_bytes().as_ref(),
        description().to_json().as_bytes()
    );

    let second = tokio::time::timeout(Duration::from_millis(500), subscriber.recv_async()).await;
    assert!(second.is_err(), "expected exactly one put");

    listener.close().await.unwrap();
}

use colmena_core::{Error, ServiceDescription};
use serde_json::json;
use tempfile::TempDir;

fn write_description(dir: &std::path::Path, content: &str) {
    std::fs::write(dir.join("service_description.json"), content).unwrap();
}

#[test]
fn load_reads_service_description_json() {
    let tmp = TempDir::new().unwrap();
    write_description(
        tmp.path(),
        r#"{"id":{"value":"svc1"},"dockerRoleDefinitions":[],"dockerContextDefinitions":[]}"#,
    );

    let description = ServiceDescription::load(tmp.path()).unwrap();

    assert_eq!(description.service_id().unwrap(), "svc1");
}

#[test]
fn load_missing_file_returns_missing_file() {
    let tmp = TempDir::new().unwrap();

    let err = ServiceDescription::load(tmp.path()).unwrap_err();

    assert!(
        matches!(err, Error::MissingFile { ref path } if path.ends_with("service_description.json"))
    );
    assert!(!err.is_malformed());
}

#[test]
fn load_invalid_json_returns_malformed_description() {
    let tmp = TempDir::new().unwrap();
    write_description(tmp.path(), "invalid json");

    let err = ServiceDescription::load(tmp.path()).unwrap_err();

    assert!(matches!(err, Error::MalformedDescription { .. }));
    assert!(err.is_malformed());
}

#[test]
fn load_rejects_non_object_document() {
    let tmp = TempDir::new().unwrap();
    write_description(tmp.path(), "[1, 2, 3]");

    let err = ServiceDescription::load(tmp.path()).unwrap_err();

    assert!(err.is_malformed());
}

#[test]
fn service_id_requires_non_empty_string() {
    let missing = ServiceDescription::from_value(json!({"name": "svc"})).unwrap();
    assert!(matches!(
        missing.service_id(),
        Err(Error::MissingField { ref pointer }) if pointer == "/id/value"
    ));

    let empty = ServiceDescription::from_value(json!({"id": {"value": ""}})).unwrap();
    assert!(matches!(
        empty.service_id(),
        Err(Error::InvalidField { ref pointer, .. }) if pointer == "/id/value"
    ));

    let numeric = ServiceDescription::from_value(json!({"id": {"value": 7}})).unwrap();
    assert!(numeric.service_id().unwrap_err().is_malformed());
}

#[test]
fn serialization_preserves_unknown_keys_and_order() {
    let raw = r#"{"zeta":1,"id":{"value":"svc"},"alpha":{"nested":[true,null]},"dockerRoleDefinitions":[],"dockerContextDefinitions":[]}"#;
    let tmp = TempDir::new().unwrap();
    write_description(tmp.path(), raw);

    let description = ServiceDescription::load(tmp.path()).unwrap();

    assert_eq!(description.to_json(), raw);
}

#[test]
fn pretty_json_is_indented() {
    let description = ServiceDescription::from_value(json!({"id": {"value": "svc"}})).unwrap();

    let pretty = description.to_pretty_json().unwrap();

    assert!(pretty.contains("\n  \"id\""));
}

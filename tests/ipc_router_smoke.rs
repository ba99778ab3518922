
use serde_json::json;
use test_support::{request_err_code, request_ok, spawn_sidecar};

#[test]
fn health_reports_seeded_section() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(
        health.get("version").and_then(|v| v.as_str()),
        Some(env!("CARGO_PKG_VERSION"))
    );
    // A fresh session starts with one selected class.
    assert!(health
        .get("activeClassId")
        .and_then(|v| v.as_str())
        .is_some());

    let listed = request_ok(&mut stdin, &mut reader, "2", "classes.list", json!({}));
    let classes = listed.get("classes").and_then(|v| v.as_array()).expect("classes");
    assert_eq!(classes.len(), 1);
    assert_eq!(
        classes[0].get("name").and_then(|v| v.as_str()),
        Some("Section 001")
    );
}

#[test]
fn unknown_method_is_not_implemented() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let code = request_err_code(&mut stdin, &mut reader, "1", "classes.delete", json!({}));
    assert_eq!(code, "not_implemented");
}

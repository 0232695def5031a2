//! End-to-end flows over the public API: standalone persistence,
//! mode selection, and log redaction.

use modular_cli_sdk::{
    sanitize_name, ConfigurationBlob, CredentialsManager, CredentialsProvider,
    FileSystemCredentialsManager, InvocationContext, OperationStatus, SensitiveRedactor,
    CONTEXT_MODULAR_ADMIN_USERNAME,
};
use serde_json::json;
use tempfile::TempDir;

fn sample_config() -> ConfigurationBlob {
    let mut config = ConfigurationBlob::new();
    config.insert("api_link".into(), json!("https://api.example.com"));
    config.insert("regions".into(), json!(["eu-west-1", "us-east-1"]));
    config.insert(
        "auth".into(),
        json!({"username": "svc", "refresh_token": "tok"}),
    );
    config
}

#[test]
fn standalone_store_extract_clean_up_cycle() {
    let home = TempDir::new().unwrap();
    let manager = FileSystemCredentialsManager::with_home("assets", home.path());

    let saved = manager.store(&sample_config()).unwrap();
    assert_eq!(saved.status(), OperationStatus::Saved);
    assert_eq!(
        saved.message(),
        "The configuration for assets tool was successfully saved locally"
    );

    assert_eq!(manager.extract().unwrap(), sample_config());

    let deleted = manager.clean_up().unwrap();
    assert_eq!(deleted.status(), OperationStatus::Deleted);

    let err = manager.extract().unwrap_err();
    assert!(err.to_string().contains("assets tool is not configured"));
}

#[test]
fn standalone_clean_up_is_idempotent() {
    let home = TempDir::new().unwrap();
    let manager = FileSystemCredentialsManager::with_home("assets", home.path());

    assert_eq!(
        manager.clean_up().unwrap().status(),
        OperationStatus::NothingToDelete
    );
    manager.store(&sample_config()).unwrap();
    assert_eq!(
        manager.clean_up().unwrap().status(),
        OperationStatus::Deleted
    );
    assert_eq!(
        manager.clean_up().unwrap().status(),
        OperationStatus::NothingToDelete
    );
}

#[test]
fn provider_forks_on_managed_user_presence() {
    let standalone = CredentialsProvider::new("assets", InvocationContext::new());
    assert!(!standalone.is_managed_mode());

    let managed = CredentialsProvider::new(
        "assets",
        InvocationContext::new().with_value(CONTEXT_MODULAR_ADMIN_USERNAME, "ops admin"),
    );
    assert!(managed.is_managed_mode());
}

#[test]
fn sanitized_names_are_stable_across_repeated_runs() {
    let raw = "ops admin@corp/eu";
    let first = sanitize_name(raw);
    assert_eq!(first, "ops-admin-corp/eu");
    assert_eq!(sanitize_name(&first), first);
}

#[test]
fn redactor_hides_stored_secrets_in_log_lines() {
    let redactor = SensitiveRedactor::new();
    let line = format!(
        "storing {}",
        json!({"refresh_token": "hunter2", "api_link": "https://api.example.com"})
    );
    let redacted = redactor.redact(&line);
    assert!(!redacted.contains("hunter2"));
    assert!(!redacted.contains("example.com"));
    assert!(redacted.contains("****"));
}

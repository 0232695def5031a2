//! Vault KV v2 backend.
//!
//! Talks to the engine's HTTP API directly: versioned reads and writes
//! under `/v1/<mount>/data/<path>`, full removal under
//! `/v1/<mount>/metadata/<path>`, and the `sys/mounts` administrative
//! endpoints.

use std::sync::OnceLock;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

use crate::domain::error::{SdkError, SdkResult};
use crate::domain::models::secret::{SecretKind, SecretValue};
use crate::domain::ports::secret_backend::SecretBackend;

/// Fixed mount point of the KV v2 engine.
const MOUNT_POINT: &str = "kv";
/// Field name the secret document is stored under.
const SECRET_FIELD: &str = "data";
/// Vault authentication header.
const TOKEN_HEADER: &str = "X-Vault-Token";

/// Secret backend over a Vault KV v2 engine.
///
/// The HTTP client handle is built lazily on first use and memoized for
/// the lifetime of the backend instance.
#[derive(Debug)]
pub struct VaultKvBackend {
    address: String,
    token: String,
    http: OnceLock<Client>,
}

impl VaultKvBackend {
    /// Backend addressed at `address`, authenticating with `token`.
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
            http: OnceLock::new(),
        }
    }

    fn http(&self) -> SdkResult<&Client> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }
        debug!("initializing vault http client");
        let client = Client::builder().build().map_err(|err| {
            SdkError::Configuration(format!("Unable to initialize the Vault client: {err}"))
        })?;
        Ok(self.http.get_or_init(|| client))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.address.trim_end_matches('/'))
    }

    /// Enable the KV v2 engine at `mount` (the fixed mount point when
    /// `None`). Best-effort create-if-absent: an already-enabled engine
    /// counts as success.
    pub fn enable_secrets_engine(&self, mount: Option<&str>) -> SdkResult<bool> {
        let mount = mount.unwrap_or(MOUNT_POINT);
        let payload = json!({"type": "kv", "options": {"version": "2"}});
        let response = self
            .http()?
            .post(self.url(&format!("sys/mounts/{mount}")))
            .header(TOKEN_HEADER, &self.token)
            .json(&payload)
            .send();
        match response {
            Ok(resp) if resp.status().is_success() => Ok(true),
            // Vault answers 400 "path is already in use" for an existing mount
            Ok(resp) if resp.status() == StatusCode::BAD_REQUEST => {
                debug!(mount, "secrets engine already enabled");
                Ok(true)
            }
            Ok(resp) => {
                error!(mount, status = %resp.status(), "unable to enable the secrets engine");
                Ok(false)
            }
            Err(err) => {
                error!(mount, error = %err, "unable to enable the secrets engine");
                Ok(false)
            }
        }
    }

    /// Whether the KV engine is mounted at `mount` (the fixed mount point
    /// when `None`).
    pub fn is_secrets_engine_enabled(&self, mount: Option<&str>) -> SdkResult<bool> {
        let mount = mount.unwrap_or(MOUNT_POINT);
        let response = self
            .http()?
            .get(self.url("sys/mounts"))
            .header(TOKEN_HEADER, &self.token)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|err| {
                SdkError::Configuration(format!("Unable to list mounted secrets engines: {err}"))
            })?;
        let body: Value = response.json().map_err(|err| {
            SdkError::Configuration(format!("Unreadable secrets engine listing: {err}"))
        })?;
        // Mount keys sit at the top level on older engines, under "data" on newer ones
        let mounts = body.get("data").unwrap_or(&body);
        let key = format!("{mount}/");
        Ok(mounts.get(key.as_str()).is_some())
    }
}

impl SecretBackend for VaultKvBackend {
    fn name(&self) -> &'static str {
        "vault-kv"
    }

    /// Versioned read of the latest secret value.
    ///
    /// Any failure other than a clean miss also collapses to `Ok(None)`,
    /// making an engine outage indistinguishable from a missing secret to
    /// the caller. Degraded reads are flagged in the logs so operators can
    /// tell the two apart.
    fn get(&self, name: &str) -> SdkResult<Option<SecretValue>> {
        let response = self
            .http()?
            .get(self.url(&format!("{MOUNT_POINT}/data/{name}")))
            .header(TOKEN_HEADER, &self.token)
            .send();
        let response = match response {
            Ok(resp) if resp.status() == StatusCode::NOT_FOUND => {
                debug!(name, "secret not found");
                return Ok(None);
            }
            Ok(resp) => match resp.error_for_status() {
                Ok(resp) => resp,
                Err(err) => {
                    warn!(degraded = true, name, error = %err, "vault read failed, treating as absent");
                    return Ok(None);
                }
            },
            Err(err) => {
                warn!(degraded = true, name, error = %err, "vault unreachable, treating as absent");
                return Ok(None);
            }
        };
        let body: Value = match response.json() {
            Ok(body) => body,
            Err(err) => {
                warn!(degraded = true, name, error = %err, "unreadable vault response, treating as absent");
                return Ok(None);
            }
        };
        Ok(body
            .pointer(&format!("/data/data/{SECRET_FIELD}"))
            .filter(|value| !value.is_null())
            .cloned())
    }

    fn put(&self, name: &str, value: &SecretValue, _kind: SecretKind) -> SdkResult<bool> {
        let mut secret = Map::new();
        secret.insert(SECRET_FIELD.to_string(), value.clone());
        let payload = json!({ "data": secret });

        let response = self
            .http()?
            .post(self.url(&format!("{MOUNT_POINT}/data/{name}")))
            .header(TOKEN_HEADER, &self.token)
            .json(&payload)
            .send();
        match response {
            Ok(resp) if resp.status().is_success() => {
                debug!(name, "secret saved to vault");
                Ok(true)
            }
            Ok(resp) => {
                error!(name, status = %resp.status(), "unable to save secret to vault");
                Ok(false)
            }
            Err(err) => {
                error!(name, error = %err, "unable to save secret to vault");
                Ok(false)
            }
        }
    }

    /// Remove all metadata and versions for the path.
    fn delete(&self, name: &str) -> SdkResult<bool> {
        let response = self
            .http()?
            .delete(self.url(&format!("{MOUNT_POINT}/metadata/{name}")))
            .header(TOKEN_HEADER, &self.token)
            .send();
        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(err) => {
                error!(name, error = %err, "unable to delete secret from vault");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_get_returns_stored_document() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/v1/kv/data/modular-api.tool.admin.configuration")
            .match_header(TOKEN_HEADER, "test-token")
            .with_status(200)
            .with_body(r#"{"data":{"data":{"data":{"api_port": 8080}}}}"#)
            .create();

        let backend = VaultKvBackend::new(server.url(), "test-token");
        let value = backend
            .get("modular-api.tool.admin.configuration")
            .unwrap();
        assert_eq!(value, Some(json!({"api_port": 8080})));
    }

    #[test]
    fn test_get_collapses_not_found_to_absent() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/v1/kv/data/missing")
            .with_status(404)
            .with_body(r#"{"errors":[]}"#)
            .create();

        let backend = VaultKvBackend::new(server.url(), "test-token");
        assert_eq!(backend.get("missing").unwrap(), None);
    }

    #[test]
    fn test_get_collapses_server_error_to_absent() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/v1/kv/data/broken")
            .with_status(503)
            .create();

        let backend = VaultKvBackend::new(server.url(), "test-token");
        assert_eq!(backend.get("broken").unwrap(), None);
    }

    #[test]
    fn test_put_wraps_value_under_fixed_field() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/kv/data/svc")
            .match_header(TOKEN_HEADER, "test-token")
            .match_body(mockito::Matcher::Json(
                json!({"data": {"data": {"user": "admin"}}}),
            ))
            .with_status(200)
            .with_body(r#"{"data":{"version":1}}"#)
            .create();

        let backend = VaultKvBackend::new(server.url(), "test-token");
        let saved = backend
            .put("svc", &json!({"user": "admin"}), SecretKind::SecureString)
            .unwrap();
        assert!(saved);
        mock.assert();
    }

    #[test]
    fn test_delete_reports_operation_success() {
        let mut server = mockito::Server::new();
        let _hit = server
            .mock("DELETE", "/v1/kv/metadata/svc")
            .with_status(204)
            .create();

        let backend = VaultKvBackend::new(server.url(), "test-token");
        assert!(backend.delete("svc").unwrap());
    }

    #[test]
    fn test_enable_secrets_engine_treats_existing_mount_as_success() {
        let mut server = mockito::Server::new();
        let _conflict = server
            .mock("POST", "/v1/sys/mounts/kv")
            .with_status(400)
            .with_body(r#"{"errors":["path is already in use at kv/"]}"#)
            .create();

        let backend = VaultKvBackend::new(server.url(), "test-token");
        assert!(backend.enable_secrets_engine(None).unwrap());
    }

    #[test]
    fn test_is_secrets_engine_enabled_checks_mount_list() {
        let mut server = mockito::Server::new();
        let _mounts = server
            .mock("GET", "/v1/sys/mounts")
            .with_status(200)
            .with_body(r#"{"kv/":{"type":"kv"},"secret/":{"type":"kv"}}"#)
            .expect(2)
            .create();

        let backend = VaultKvBackend::new(server.url(), "test-token");
        assert!(backend.is_secrets_engine_enabled(None).unwrap());
        assert!(!backend.is_secrets_engine_enabled(Some("absent")).unwrap());
    }
}

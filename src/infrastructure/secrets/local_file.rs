//! On-disk JSON cache backend.
//!
//! Debug and local-testing only: values are stored in plain text with no
//! encryption. Production on-prem installations must use the Vault KV
//! backend instead.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::domain::error::SdkResult;
use crate::domain::models::secret::{SecretKind, SecretValue};
use crate::domain::ports::secret_backend::SecretBackend;

/// Emulated parameter store backed by a single JSON map file under the
/// user's home directory.
///
/// Every mutation rewrites the whole file, so the on-disk state always
/// matches the last completed operation.
#[derive(Debug)]
pub struct LocalFileBackend {
    path: PathBuf,
}

impl LocalFileBackend {
    /// Backend over the default cache file `~/.modular_cli/on-prem/ssm.json`.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: home.join(".modular_cli").join("on-prem").join("ssm.json"),
        }
    }

    /// Backend over an explicit cache file. Used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Map<String, Value> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Map::new(),
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            error!(path = %self.path.display(), error = %err, "unreadable local cache, starting empty");
            Map::new()
        })
    }

    fn persist(&self, cache: &Map<String, Value>) -> bool {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                error!(path = %parent.display(), error = %err, "unable to create local cache folder");
                return false;
            }
        }
        let bytes = match serde_json::to_vec(cache) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(error = %err, "unable to encode local cache");
                return false;
            }
        };
        match fs::write(&self.path, bytes) {
            Ok(()) => true,
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "unable to persist local cache");
                false
            }
        }
    }
}

impl Default for LocalFileBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretBackend for LocalFileBackend {
    fn name(&self) -> &'static str {
        "local-file"
    }

    fn get(&self, name: &str) -> SdkResult<Option<SecretValue>> {
        Ok(self.load().get(name).cloned())
    }

    fn put(&self, name: &str, value: &SecretValue, _kind: SecretKind) -> SdkResult<bool> {
        let mut cache = self.load();
        cache.insert(name.to_string(), value.clone());
        let saved = self.persist(&cache);
        if saved {
            debug!(name, "secret stored in the local cache");
        }
        Ok(saved)
    }

    fn delete(&self, name: &str) -> SdkResult<bool> {
        let mut cache = self.load();
        if cache.remove(name).is_none() {
            return Ok(false);
        }
        Ok(self.persist(&cache))
    }
}

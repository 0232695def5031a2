//! Managed-mode credentials manager delegating to the selected backend.

use std::sync::OnceLock;

use serde_json::Value;
use tracing::error;

use crate::domain::error::{SdkError, SdkResult};
use crate::domain::models::secret::{sanitize_name, ConfigurationBlob, SecretKind};
use crate::domain::ports::credentials_manager::{
    CredentialsManager, OperationReport, OperationStatus,
};
use crate::domain::ports::secret_backend::SecretBackend;
use crate::infrastructure::secrets::select_backend;

fn build_parameter_name(module_name: &str, user_name: &str) -> String {
    format!("modular-api.{module_name}.{user_name}.configuration")
}

/// Persists a tool's configuration in the centrally selected secret
/// backend, keyed by tool and managed-mode user so tools and users sharing
/// one backend never collide.
///
/// The backend handle is obtained from the runtime selector on first use
/// and memoized for the lifetime of the manager.
pub struct RemoteCredentialsManager {
    module_name: String,
    parameter_name: String,
    backend: OnceLock<Box<dyn SecretBackend>>,
}

impl RemoteCredentialsManager {
    /// Manager for `module_name` on behalf of `user_name`.
    ///
    /// The user name is sanitized before it becomes part of the storage
    /// key, so any human-supplied identity is accepted.
    pub fn new(module_name: &str, user_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            parameter_name: build_parameter_name(module_name, &sanitize_name(user_name)),
            backend: OnceLock::new(),
        }
    }

    /// Manager with an explicit backend instead of the runtime-selected
    /// one. Used by tests to inject a fake.
    pub fn with_backend(
        module_name: &str,
        user_name: &str,
        backend: Box<dyn SecretBackend>,
    ) -> Self {
        let manager = Self::new(module_name, user_name);
        let _ = manager.backend.set(backend);
        manager
    }

    /// The collision-safe storage key this manager reads and writes.
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    fn backend(&self) -> &dyn SecretBackend {
        self.backend.get_or_init(select_backend).as_ref()
    }
}

impl CredentialsManager for RemoteCredentialsManager {
    fn store(&self, config: &ConfigurationBlob) -> SdkResult<OperationReport> {
        let saved = self.backend().put(
            &self.parameter_name,
            &Value::Object(config.clone()),
            SecretKind::SecureString,
        )?;
        if !saved {
            return Err(SdkError::Configuration(format!(
                "Unable to save configuration for {} to the secret storage",
                self.module_name
            )));
        }
        Ok(OperationReport::new(
            OperationStatus::Saved,
            format!(
                "The configuration for {} tool was successfully saved remotely. Parameter name: {}",
                self.module_name, self.parameter_name
            ),
        ))
    }

    fn extract(&self) -> SdkResult<ConfigurationBlob> {
        match self.backend().get(&self.parameter_name)? {
            None => Err(SdkError::Configuration(format!(
                "The {} tool is not configured. Please execute the configuration command",
                self.module_name
            ))),
            Some(Value::Object(config)) => Ok(config),
            // A non-object value means the backend could not recover
            // structured configuration
            Some(other) => {
                error!(
                    parameter = %self.parameter_name,
                    unusable = %other,
                    "stored configuration is not a json object"
                );
                Err(SdkError::Configuration(
                    "Can not load configuration. For more information please check logs"
                        .to_string(),
                ))
            }
        }
    }

    fn clean_up(&self) -> SdkResult<OperationReport> {
        let removed = self.backend().delete(&self.parameter_name)?;
        if removed {
            Ok(OperationReport::new(
                OperationStatus::Deleted,
                format!(
                    "Configuration for {} tool was successfully deleted",
                    self.module_name
                ),
            ))
        } else {
            Ok(OperationReport::new(
                OperationStatus::NothingToDelete,
                format!(
                    "Configuration for {} tool not found. Nothing to delete",
                    self.module_name
                ),
            ))
        }
    }
}

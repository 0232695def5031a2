//! Capability contract for persisting a tool's configuration blob.

use std::fmt;

use crate::domain::error::SdkResult;
use crate::domain::models::secret::ConfigurationBlob;

/// Machine-readable outcome of a `store` or `clean_up` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    /// The configuration was written.
    Saved,
    /// The configuration was removed.
    Deleted,
    /// There was no configuration to remove.
    NothingToDelete,
}

/// Outcome of a `store`/`clean_up` call: a tagged status plus the
/// human-readable description callers may print verbatim.
///
/// Earlier revisions returned only the description, forcing callers to
/// parse prose to learn whether anything was deleted; the status field
/// carries that answer directly and the text stays presentation-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    status: OperationStatus,
    message: String,
}

impl OperationReport {
    /// Build a report from a status and its user-facing description.
    pub fn new(status: OperationStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The tagged outcome.
    pub fn status(&self) -> OperationStatus {
        self.status
    }

    /// The user-facing description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Store/extract/clean-up of a tool's whole configuration.
///
/// Two implementations exist: a standalone one writing under the user's
/// home directory, and a managed/remote one delegating to the selected
/// [`SecretBackend`](super::secret_backend::SecretBackend). Callers obtain
/// the right one from the credentials provider and see the same
/// three-operation contract either way.
pub trait CredentialsManager {
    /// Persist the configuration, overwriting any prior content.
    fn store(&self, config: &ConfigurationBlob) -> SdkResult<OperationReport>;

    /// Load the previously stored configuration.
    ///
    /// Fails with a configuration error when the tool was never configured
    /// or the persisted value is not usable structured configuration.
    fn extract(&self) -> SdkResult<ConfigurationBlob>;

    /// Remove the stored configuration. Best-effort: reports
    /// [`OperationStatus::NothingToDelete`] instead of failing when there
    /// is nothing to remove.
    fn clean_up(&self) -> SdkResult<OperationReport>;
}

//! Standalone credentials manager writing under the user's home directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::domain::error::{SdkError, SdkResult};
use crate::domain::models::secret::ConfigurationBlob;
use crate::domain::ports::credentials_manager::{
    CredentialsManager, OperationReport, OperationStatus,
};

/// Persists a tool's configuration as a JSON document at
/// `~/.<module_name>/credentials`.
///
/// The file is created with default permissions; managed installations
/// needing encryption at rest use the remote manager instead.
#[derive(Debug)]
pub struct FileSystemCredentialsManager {
    module_name: String,
    creds_folder: PathBuf,
    config_file: PathBuf,
}

impl FileSystemCredentialsManager {
    /// Manager for `module_name` under the user's home directory.
    pub fn new(module_name: &str) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_home(module_name, &home)
    }

    /// Manager rooted at an explicit home directory. Used by tests.
    pub fn with_home(module_name: &str, home: &Path) -> Self {
        let creds_folder = home.join(format!(".{module_name}"));
        let config_file = creds_folder.join("credentials");
        Self {
            module_name: module_name.to_string(),
            creds_folder,
            config_file,
        }
    }
}

impl CredentialsManager for FileSystemCredentialsManager {
    fn store(&self, config: &ConfigurationBlob) -> SdkResult<OperationReport> {
        fs::create_dir_all(&self.creds_folder).map_err(|err| {
            error!(
                path = %self.creds_folder.display(),
                error = %err,
                "unable to create configuration folder"
            );
            SdkError::Configuration(format!(
                "Unable to create configuration folder {}",
                self.creds_folder.display()
            ))
        })?;

        let bytes = serde_json::to_vec(config).map_err(|err| {
            SdkError::Configuration(format!("Unserializable configuration: {err}"))
        })?;
        fs::write(&self.config_file, bytes).map_err(|err| {
            error!(path = %self.config_file.display(), error = %err, "unable to write configuration");
            SdkError::Configuration(format!(
                "Unable to write configuration file {}",
                self.config_file.display()
            ))
        })?;

        debug!(path = %self.config_file.display(), "configuration created successfully");
        Ok(OperationReport::new(
            OperationStatus::Saved,
            format!(
                "The configuration for {} tool was successfully saved locally",
                self.module_name
            ),
        ))
    }

    fn extract(&self) -> SdkResult<ConfigurationBlob> {
        if !self.config_file.exists() {
            error!(path = %self.config_file.display(), "cannot find configuration file");
            return Err(SdkError::Configuration(format!(
                "The {} tool is not configured. Please execute the configuration command",
                self.module_name
            )));
        }
        let bytes = fs::read(&self.config_file).map_err(|err| {
            error!(path = %self.config_file.display(), error = %err, "unable to read configuration");
            SdkError::Configuration(format!(
                "Unable to read configuration file {}",
                self.config_file.display()
            ))
        })?;
        let config = serde_json::from_slice(&bytes).map_err(|err| {
            error!(path = %self.config_file.display(), error = %err, "corrupted configuration file");
            SdkError::Configuration(format!(
                "Unable to parse configuration file {}",
                self.config_file.display()
            ))
        })?;
        debug!("configuration successfully loaded");
        Ok(config)
    }

    fn clean_up(&self) -> SdkResult<OperationReport> {
        match fs::remove_dir_all(&self.creds_folder) {
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(OperationReport::new(
                    OperationStatus::NothingToDelete,
                    format!(
                        "Configuration for {} tool not found. Nothing to delete",
                        self.module_name
                    ),
                ));
            }
            Err(err) => {
                // Best-effort cleanup never blocks overall success
                error!(
                    path = %self.creds_folder.display(),
                    error = %err,
                    "error occurred while cleaning configuration"
                );
            }
            Ok(()) => {}
        }
        Ok(OperationReport::new(
            OperationStatus::Deleted,
            format!(
                "The {} tool configuration has been deleted.",
                self.module_name
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn manager(home: &TempDir) -> FileSystemCredentialsManager {
        FileSystemCredentialsManager::with_home("tool", home.path())
    }

    fn sample_config() -> ConfigurationBlob {
        let mut config = ConfigurationBlob::new();
        config.insert("api_link".into(), json!("https://api.example.com"));
        config.insert("port".into(), json!(8080));
        config
    }

    #[test]
    fn test_store_then_extract_round_trips() {
        let home = TempDir::new().unwrap();
        let manager = manager(&home);
        let config = sample_config();

        let report = manager.store(&config).unwrap();
        assert_eq!(report.status(), OperationStatus::Saved);
        assert!(report.message().contains("tool"));

        assert_eq!(manager.extract().unwrap(), config);
    }

    #[test]
    fn test_store_overwrites_previous_configuration() {
        let home = TempDir::new().unwrap();
        let manager = manager(&home);

        manager.store(&sample_config()).unwrap();
        let mut updated = ConfigurationBlob::new();
        updated.insert("port".into(), json!(9090));
        manager.store(&updated).unwrap();

        assert_eq!(manager.extract().unwrap(), updated);
    }

    #[test]
    fn test_extract_without_store_names_the_tool() {
        let home = TempDir::new().unwrap();
        let err = manager(&home).extract().unwrap_err();
        assert_eq!(err.code(), 503);
        assert!(err.to_string().contains("tool is not configured"));
    }

    #[test]
    fn test_clean_up_twice_reports_nothing_to_delete() {
        let home = TempDir::new().unwrap();
        let manager = manager(&home);
        manager.store(&sample_config()).unwrap();

        let first = manager.clean_up().unwrap();
        assert_eq!(first.status(), OperationStatus::Deleted);

        let second = manager.clean_up().unwrap();
        assert_eq!(second.status(), OperationStatus::NothingToDelete);
        assert!(second.message().contains("Nothing to delete"));
    }
}

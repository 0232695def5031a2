//! Modular CLI SDK: configuration and credentials persistence for
//! command-line tools.
//!
//! A tool stores one JSON configuration blob per user without hard-coding
//! a storage technology. Standalone installations keep it in a file under
//! the home directory; managed installations persist it in a centrally
//! selected secret backend (Vault KV v2 or AWS SSM Parameter Store) under
//! a collision-safe key.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): models, the error taxonomy, and the
//!   `SecretBackend` / `CredentialsManager` port traits
//! - **Infrastructure Layer** (`infrastructure`): backend adapters, the
//!   credentials managers, runtime selection, and logging with redaction
//!
//! # Example
//!
//! ```no_run
//! use modular_cli_sdk::{CredentialsProvider, InvocationContext};
//!
//! fn main() -> Result<(), modular_cli_sdk::SdkError> {
//!     let provider = CredentialsProvider::new("assets", InvocationContext::new());
//!     let manager = provider.credentials_manager();
//!     let config = manager.extract()?;
//!     println!("configured endpoints: {}", config.len());
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::error::{SdkError, SdkResult};
pub use domain::models::{
    parse_date, sanitize_name, ConfigurationBlob, DeprecationNotice, InvocationContext,
    SecretKind, SecretValue, CONTEXT_MODULAR_ADMIN_USERNAME,
};
pub use domain::ports::{CredentialsManager, OperationReport, OperationStatus, SecretBackend};
pub use infrastructure::credentials::{
    CredentialsProvider, FileSystemCredentialsManager, RemoteCredentialsManager,
};
pub use infrastructure::logging::{init_logging, SensitiveRedactor};
pub use infrastructure::secrets::{
    select_backend, LocalFileBackend, SsmParameterBackend, VaultKvBackend, ENV_VAULT_ADDR,
    ENV_VAULT_TOKEN,
};

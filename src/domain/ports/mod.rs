//! Port trait definitions (Hexagonal Architecture)
//!
//! Contracts that infrastructure adapters must implement:
//! - `SecretBackend`: uniform get/put/delete over a named secret
//! - `CredentialsManager`: store/extract/clean-up of a tool's configuration
//!
//! These traits keep the domain independent of the concrete storage
//! technology in use.

pub mod credentials_manager;
pub mod secret_backend;

pub use credentials_manager::{CredentialsManager, OperationReport, OperationStatus};
pub use secret_backend::SecretBackend;

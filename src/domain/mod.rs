//! Domain layer: models, error taxonomy, and port traits.
//!
//! Nothing in this module touches the filesystem, the network, or the
//! process environment; concrete storage lives in `infrastructure`.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{SdkError, SdkResult};

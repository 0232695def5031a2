//! Infrastructure layer module
//!
//! Concrete adapters behind the domain ports:
//! - Secret backends (local JSON cache, Vault KV v2, AWS Parameter Store)
//!   and their runtime selection
//! - Credentials managers (standalone filesystem, managed remote) and the
//!   mode fork between them
//! - Logging with sensitive-value redaction
//!
//! Infrastructure implementations satisfy the port traits defined in the
//! domain layer.

pub mod credentials;
pub mod logging;
pub mod secrets;

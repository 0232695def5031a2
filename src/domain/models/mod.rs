//! Domain models: secret naming, invocation context, deprecation notices.

pub mod context;
pub mod deprecation;
pub mod secret;

pub use context::{InvocationContext, CONTEXT_MODULAR_ADMIN_USERNAME};
pub use deprecation::{parse_date, DeprecationNotice};
pub use secret::{sanitize_name, ConfigurationBlob, SecretKind, SecretValue};

//! Read-only invocation context supplied by the hosting CLI framework.

use std::collections::BTreeMap;

use serde_json::Value;

/// Well-known context key carrying the managed-mode user identity.
pub const CONTEXT_MODULAR_ADMIN_USERNAME: &str = "modular_admin_username";

/// Read-only bag of values describing the current invocation.
///
/// The hosting framework populates it before handing control to the SDK.
/// Presence of a non-empty string under [`CONTEXT_MODULAR_ADMIN_USERNAME`]
/// is the sole signal that the process runs inside a managed installation.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    values: BTreeMap<String, Value>,
}

impl InvocationContext {
    /// Create an empty context (standalone installation).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a context value, returning the context for chaining.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Look up a raw context value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The managed-mode user identity, if present and non-empty.
    pub fn modular_user(&self) -> Option<&str> {
        self.values
            .get(CONTEXT_MODULAR_ADMIN_USERNAME)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }
}

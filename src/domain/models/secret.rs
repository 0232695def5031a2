//! Secret naming and value types shared by all backends.

use std::sync::LazyLock;

use regex::Regex;

/// A secret payload: a UTF-8 string, an array, or an object.
///
/// Backends that can only persist strings round-trip arrays and objects
/// through their JSON encoding.
pub type SecretValue = serde_json::Value;

/// A tool's full persisted configuration blob.
pub type ConfigurationBlob = serde_json::Map<String, serde_json::Value>;

/// Characters that are not storage-safe in a secret name.
static NAME_NOT_AVAILABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9/_.-]").expect("static pattern"));

/// Normalize a human-supplied name into a storage-safe key.
///
/// Every character outside `[a-zA-Z0-9/_.-]` is replaced with `-`.
/// Total and idempotent: sanitizing an already-sanitized name returns it
/// unchanged.
pub fn sanitize_name(name: &str) -> String {
    NAME_NOT_AVAILABLE.replace_all(name, "-").into_owned()
}

/// Storage hint for backends that differentiate plain from secure material.
///
/// Backends without the distinction ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretKind {
    /// Plain parameter
    String,
    /// Encrypted-at-rest parameter
    #[default]
    SecureString,
}

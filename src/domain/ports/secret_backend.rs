//! Capability contract for secret storage technologies.

use crate::domain::error::SdkResult;
use crate::domain::models::secret::{SecretKind, SecretValue};

/// Uniform get/put/delete over a named secret.
///
/// This is a **port** in hexagonal architecture terminology: the
/// credentials managers depend on this trait, never on a concrete storage
/// technology. Adapters in the infrastructure layer implement it for the
/// local JSON cache, the Vault KV engine, and AWS Parameter Store.
///
/// # Error contract
///
/// "Not found" is never an error: `get` returns `Ok(None)` and `delete`
/// returns `Ok(false)` for a missing key. Per-call transport failures are
/// caught inside the adapter, logged, and downgraded to the same absent /
/// `false` results. `Err` is reserved for configuration failures, such as a remote
/// client that cannot be constructed because credentials or endpoint
/// settings are unresolvable.
///
/// # Thread safety
///
/// Implementations memoize lazily built client handles and are not designed
/// for concurrent reuse across threads; each tool invocation is assumed
/// single-threaded end-to-end.
pub trait SecretBackend {
    /// Short backend identifier used in logs and selection tests.
    fn name(&self) -> &'static str;

    /// Fetch a secret. `Ok(None)` when the key does not exist.
    fn get(&self, name: &str) -> SdkResult<Option<SecretValue>>;

    /// Upsert a secret, overwriting any prior value.
    ///
    /// `kind` distinguishes plain from secure storage where the backend
    /// supports differentiated handling; backends without the distinction
    /// ignore it. Returns `Ok(false)` when the store rejected the write.
    fn put(&self, name: &str, value: &SecretValue, kind: SecretKind) -> SdkResult<bool>;

    /// Remove a secret. `Ok(false)` when the key did not exist.
    fn delete(&self, name: &str) -> SdkResult<bool>;
}

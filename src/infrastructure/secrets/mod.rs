//! Secret storage adapters and runtime backend selection.

pub mod local_file;
pub mod ssm;
pub mod vault;

pub use local_file::LocalFileBackend;
pub use ssm::SsmParameterBackend;
pub use vault::VaultKvBackend;

use std::env;

use tracing::debug;

use crate::domain::ports::secret_backend::SecretBackend;

/// Address of the Vault server.
pub const ENV_VAULT_ADDR: &str = "VAULT_ADDR";
/// Access token for the Vault server.
pub const ENV_VAULT_TOKEN: &str = "VAULT_TOKEN";

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Choose the secret backend for managed-mode storage.
///
/// Vault wins when both [`ENV_VAULT_ADDR`] and [`ENV_VAULT_TOKEN`] are set
/// to non-empty values; the parameter store is the default otherwise. The
/// local file backend is never auto-selected: it exists only for
/// development and is reached by constructing it explicitly.
pub fn select_backend() -> Box<dyn SecretBackend> {
    match (non_empty_env(ENV_VAULT_ADDR), non_empty_env(ENV_VAULT_TOKEN)) {
        (Some(address), Some(token)) => {
            debug!("returning vault secrets backend");
            Box::new(VaultKvBackend::new(address, token))
        }
        _ => {
            debug!("returning ssm secrets backend");
            Box::new(SsmParameterBackend::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_across_presence_matrix() {
        let cases = [
            (Some("http://127.0.0.1:8200"), Some("s.token"), "vault-kv"),
            (Some("http://127.0.0.1:8200"), None, "ssm"),
            (None, Some("s.token"), "ssm"),
            (None, None, "ssm"),
        ];
        for (addr, token, expected) in cases {
            temp_env::with_vars(
                [(ENV_VAULT_ADDR, addr), (ENV_VAULT_TOKEN, token)],
                || assert_eq!(select_backend().name(), expected),
            );
        }
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        temp_env::with_vars(
            [(ENV_VAULT_ADDR, Some("")), (ENV_VAULT_TOKEN, Some("s.token"))],
            || assert_eq!(select_backend().name(), "ssm"),
        );
    }
}

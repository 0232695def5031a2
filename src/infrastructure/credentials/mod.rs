//! Credentials managers and the standalone/managed mode fork.

pub mod local;
pub mod remote;

pub use local::FileSystemCredentialsManager;
pub use remote::RemoteCredentialsManager;

use tracing::debug;

use crate::domain::models::context::InvocationContext;
use crate::domain::ports::credentials_manager::CredentialsManager;

/// Decides how a tool's configuration is persisted for this invocation.
///
/// A non-empty managed-mode user identity in the context selects the
/// remote manager; otherwise configuration stays in a local file. This is
/// the single runtime fork between the two operating modes; the returned
/// manager exposes the same three-operation contract either way.
pub struct CredentialsProvider {
    module_name: String,
    context: InvocationContext,
}

impl CredentialsProvider {
    /// Provider for `module_name` under the given invocation context.
    pub fn new(module_name: impl Into<String>, context: InvocationContext) -> Self {
        Self {
            module_name: module_name.into(),
            context,
        }
    }

    /// Whether this invocation runs inside a managed installation.
    pub fn is_managed_mode(&self) -> bool {
        self.context.modular_user().is_some()
    }

    /// Instantiate the credentials manager matching the invocation mode.
    pub fn credentials_manager(&self) -> Box<dyn CredentialsManager> {
        match self.context.modular_user() {
            Some(user) => {
                debug!(module = %self.module_name, "using remote credentials manager");
                Box::new(RemoteCredentialsManager::new(&self.module_name, user))
            }
            None => {
                debug!(module = %self.module_name, "using filesystem credentials manager");
                Box::new(FileSystemCredentialsManager::new(&self.module_name))
            }
        }
    }
}

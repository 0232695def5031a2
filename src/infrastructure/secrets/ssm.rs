//! AWS SSM Parameter Store backend.
//!
//! The SDK client is async; this adapter owns a private current-thread
//! runtime so the rest of the crate keeps its blocking surface. Client and
//! runtime are built together on first use and memoized for the lifetime
//! of the backend instance. Not designed for cross-thread reuse.

use std::sync::OnceLock;

use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_ssm::error::{ProvideErrorMetadata, SdkError as AwsSdkError};
use aws_sdk_ssm::types::ParameterType;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::error::{SdkError, SdkResult};
use crate::domain::models::secret::{SecretKind, SecretValue};
use crate::domain::ports::secret_backend::SecretBackend;

struct SsmHandle {
    runtime: tokio::runtime::Runtime,
    client: aws_sdk_ssm::Client,
}

/// Secret backend over AWS SSM Parameter Store.
///
/// Values are encrypted at rest by the service when stored as
/// `SecureString`; reads request decryption. Region and credentials come
/// from the SDK's default environment resolution chain unless a region is
/// given explicitly.
pub struct SsmParameterBackend {
    region: Option<String>,
    handle: OnceLock<SsmHandle>,
}

impl SsmParameterBackend {
    /// Backend resolving the region from the environment.
    pub fn new() -> Self {
        Self {
            region: None,
            handle: OnceLock::new(),
        }
    }

    /// Backend pinned to an explicit region.
    pub fn with_region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            handle: OnceLock::new(),
        }
    }

    fn handle(&self) -> SdkResult<&SsmHandle> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle);
        }
        let handle = self.build_handle()?;
        Ok(self.handle.get_or_init(|| handle))
    }

    /// Fails fast when region or credentials cannot be resolved, before
    /// any parameter operation is attempted.
    fn build_handle(&self) -> SdkResult<SsmHandle> {
        info!("initializing ssm client");
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| {
                SdkError::Configuration(format!("Unable to start the AWS client runtime: {err}"))
            })?;

        let config = runtime.block_on(async {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
            if let Some(region) = &self.region {
                loader = loader.region(aws_config::Region::new(region.clone()));
            }
            loader.load().await
        });

        if config.region().is_none() {
            return Err(SdkError::Configuration(
                "No AWS region could be found. Set the AWS_DEFAULT_REGION environment variable"
                    .to_string(),
            ));
        }
        let credentials = config.credentials_provider().ok_or_else(|| {
            SdkError::Configuration("No AWS credentials could be found".to_string())
        })?;
        runtime
            .block_on(credentials.provide_credentials())
            .map_err(|_| {
                SdkError::Configuration("No AWS credentials could be found".to_string())
            })?;

        let client = aws_sdk_ssm::Client::new(&config);
        Ok(SsmHandle { runtime, client })
    }
}

impl Default for SsmParameterBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretBackend for SsmParameterBackend {
    fn name(&self) -> &'static str {
        "ssm"
    }

    fn get(&self, name: &str) -> SdkResult<Option<SecretValue>> {
        let handle = self.handle()?;
        let result = handle.runtime.block_on(
            handle
                .client
                .get_parameter()
                .name(name)
                .with_decryption(true)
                .send(),
        );
        match result {
            Ok(output) => {
                let Some(raw) = output.parameter().and_then(|parameter| parameter.value())
                else {
                    return Ok(None);
                };
                debug!(name, "parameter received from ssm");
                Ok(Some(decode_value(raw)))
            }
            Err(err) => {
                error!(name, code = service_error_code(&err), "cannot get parameter");
                Ok(None)
            }
        }
    }

    fn put(&self, name: &str, value: &SecretValue, kind: SecretKind) -> SdkResult<bool> {
        let handle = self.handle()?;
        let encoded = encode_value(value)?;
        debug!(name, "saving parameter to ssm");
        let result = handle.runtime.block_on(
            handle
                .client
                .put_parameter()
                .name(name)
                .value(encoded)
                .overwrite(true)
                .r#type(parameter_type(kind))
                .send(),
        );
        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                error!(name, code = service_error_code(&err), "cannot put parameter");
                Ok(false)
            }
        }
    }

    fn delete(&self, name: &str) -> SdkResult<bool> {
        let handle = self.handle()?;
        info!(name, "removing parameter from ssm");
        let result = handle
            .runtime
            .block_on(handle.client.delete_parameter().name(name).send());
        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                error!(name, code = service_error_code(&err), "cannot delete parameter");
                Ok(false)
            }
        }
    }
}

fn parameter_type(kind: SecretKind) -> ParameterType {
    match kind {
        SecretKind::String => ParameterType::String,
        SecretKind::SecureString => ParameterType::SecureString,
    }
}

/// Serialize a secret for a store that only accepts strings. Strings pass
/// through unchanged; arrays and objects become their JSON encoding.
fn encode_value(value: &SecretValue) -> SdkResult<String> {
    match value {
        Value::String(raw) => Ok(raw.clone()),
        other => serde_json::to_string(other)
            .map_err(|err| SdkError::BadRequest(format!("Unserializable secret value: {err}"))),
    }
}

/// Recover the structured value from a stored string. Non-JSON content is
/// returned as the raw string; callers expecting structured configuration
/// treat that as unusable.
fn decode_value(raw: &str) -> SecretValue {
    serde_json::from_str(raw).unwrap_or_else(|_| {
        warn!("could not parse the parameter value as json, returning raw string");
        Value::String(raw.to_string())
    })
}

fn service_error_code<E, R>(err: &AwsSdkError<E, R>) -> &str
where
    E: ProvideErrorMetadata,
{
    err.as_service_error()
        .and_then(ProvideErrorMetadata::code)
        .unwrap_or("Unknown")
}

use thiserror::Error;

/// Error taxonomy shared by every SDK surface.
///
/// `Configuration` is the dominant kind: anything that prevents returning
/// structured configuration to the caller (missing or unreadable local file,
/// failed directory creation, failed remote store/delete, unusable remote
/// value, unresolved cloud credentials or region). Backend transport
/// failures never surface here; they are downgraded to absent/`false`
/// results at the backend layer.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Incoming request is invalid due to parameter invalidity
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested resource was not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The tool is missing or has unusable persisted configuration
    #[error("{0}")]
    Configuration(String),
}

impl SdkError {
    /// Numeric class of the error, mirroring HTTP status conventions.
    pub fn code(&self) -> u16 {
        match self {
            SdkError::BadRequest(_) => 400,
            SdkError::NotFound(_) => 404,
            SdkError::Configuration(_) => 503,
        }
    }
}

/// Result alias used across the crate.
pub type SdkResult<T> = Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SdkError::BadRequest("x".into()).code(), 400);
        assert_eq!(SdkError::NotFound("x".into()).code(), 404);
        assert_eq!(SdkError::Configuration("x".into()).code(), 503);
    }

    #[test]
    fn test_configuration_display_is_bare_message() {
        let err = SdkError::Configuration("The tool is not configured".into());
        assert_eq!(err.to_string(), "The tool is not configured");
    }
}

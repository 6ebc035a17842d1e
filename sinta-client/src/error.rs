//! Error types for the scraper client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the scraper web API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client could not be constructed
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a network-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }

    /// Check if this error is a decode failure
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Whether a later identical request may succeed
    ///
    /// Everything except a broken client configuration is considered
    /// transient. Status polling logs non-transient failures as errors.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_classification() {
        let err = ClientError::api_error(503, "Service Unavailable");
        assert!(err.is_server_error());
        assert!(err.is_transient());
        assert!(!err.is_network());
        assert_eq!(
            err.to_string(),
            "API error (status 503): Service Unavailable"
        );
    }

    #[test]
    fn test_parse_error_is_transient() {
        let err = ClientError::ParseError("expected value at line 1".to_string());
        assert!(err.is_decode());
        assert!(err.is_transient());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_invalid_config_is_not_transient() {
        assert!(!ClientError::InvalidConfig("bad url".to_string()).is_transient());
    }
}

use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;
use toml::ser::Error as TomlSerializeError;

/// Result type for core operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while configuring or calling providers.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// An HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// TOML serialization failed.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] TomlSerializeError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A model provider reported an error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Required API key was not found.
    #[error("API key not configured: {0}")]
    MissingApiKey(String),

    /// Model provider returned a response that could not be used.
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// A routing request was malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No adapter is registered under the given provider identifier.
    #[error("No provider registered for '{0}'")]
    UnknownProvider(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value as JsonValue, from_str};
    use std::io;

    #[test]
    fn test_error_display() {
        let error1 = Error::Config("invalid config".to_owned());
        assert_eq!(error1.to_string(), "Configuration error: invalid config");

        let error2 = Error::Provider("model failed".to_owned());
        assert_eq!(error2.to_string(), "Provider error: model failed");

        let error3 = Error::MissingApiKey("GROQ_API_KEY".to_owned());
        assert_eq!(error3.to_string(), "API key not configured: GROQ_API_KEY");

        let error4 = Error::UnknownProvider("mistral".to_owned());
        assert_eq!(error4.to_string(), "No provider registered for 'mistral'");
    }

    #[test]
    fn test_response_and_request_errors_display() {
        let response = Error::InvalidResponse("No response from Groq".to_owned());
        assert_eq!(
            response.to_string(),
            "Invalid response from provider: No response from Groq"
        );

        let request = Error::InvalidRequest("prompt must not be empty".to_owned());
        assert_eq!(request.to_string(), "Invalid request: prompt must not be empty");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = from_str::<JsonValue>("invalid json").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}

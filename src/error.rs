//! Strongly typed error system for the UserHub SDK.
//!
//! Every failure surfaced by this crate originates either in the transport
//! (network, HTTP status, malformed response) or at the typing boundary
//! (variable serialization, response data deserialization). The SDK layer
//! itself never classifies or translates errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Typed error codes for compile-time safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // Network errors
    NetworkError,
    Timeout,
    ConnectionRefused,

    // Protocol errors
    HttpError,
    HttpsNotSupported,
    InvalidUrl,
    InvalidResponse,

    // Typing boundary errors
    ParseError,
    SerializeError,
    DeserializeError,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::ConnectionRefused => "CONNECTION_REFUSED",
            Self::HttpError => "HTTP_ERROR",
            Self::HttpsNotSupported => "HTTPS_NOT_SUPPORTED",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::ParseError => "PARSE_ERROR",
            Self::SerializeError => "SERIALIZE_ERROR",
            Self::DeserializeError => "DESERIALIZE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strongly typed SDK error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct SdkError {
    /// Typed error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
}

impl SdkError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    // Convenience constructors

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Creates a timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorCode::Timeout, "Request timed out")
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, message)
    }

    /// Creates a serialization error.
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializeError, message)
    }

    /// Creates a deserialization error.
    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeserializeError, message)
    }
}

/// Type alias for SDK results.
pub type SdkResult<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let err = SdkError::new(ErrorCode::HttpError, "HTTP 503");
        assert_eq!(err.code, ErrorCode::HttpError);
        assert_eq!(err.message, "HTTP 503");
    }

    #[test]
    fn test_error_display() {
        let err = SdkError::network("Connection failed");
        assert_eq!(err.to_string(), "[NETWORK_ERROR] Connection failed");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::DeserializeError).unwrap();
        assert_eq!(json, "\"DESERIALIZE_ERROR\"");
    }
}

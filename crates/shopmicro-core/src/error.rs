//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for ShopMicro.
///
/// The variants follow the failure policy of the catalog read path: store
/// failures propagate to the caller, cache failures are absorbed by the
/// catalog service, upstream failures are reported once for a whole view, and
/// configuration failures stop the process before it serves traffic.
#[derive(Error, Debug)]
pub enum ShopError {
    // ============ Infrastructure Errors ============
    /// Catalog store connection or query failure.
    #[error("{0}")]
    StoreUnavailable(String),

    /// Cache connection, read, or write failure.
    #[error("Cache fault: {0}")]
    CacheFault(String),

    /// A dependency service (catalog or recommendations) failed.
    #[error("{service} request failed: {message}")]
    UpstreamFault { service: String, message: String },

    // ============ Startup Errors ============
    /// Missing or malformed configuration.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // ============ Internal Errors ============
    /// JSON encoding or decoding failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::UpstreamFault { .. } => 502,
            Self::CacheFault(_) => 503,
            Self::StoreUnavailable(_)
            | Self::ConfigInvalid(_)
            | Self::Serialization(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "backend_error",
            Self::CacheFault(_) => "cache_fault",
            Self::UpstreamFault { .. } => "upstream_error",
            Self::ConfigInvalid(_) => "config_invalid",
            Self::Serialization(_) => "serialization_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Creates a store error.
    #[must_use]
    pub fn store<T: Into<String>>(message: T) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::CacheFault(message.into())
    }

    /// Creates an upstream error for the named dependency.
    #[must_use]
    pub fn upstream<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::UpstreamFault {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::ConfigInvalid(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for ShopError {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for ShopError {
    fn from(err: redis::RedisError) -> Self {
        Self::CacheFault(err.to_string())
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Serializable error body for the catalog endpoints.
///
/// Serialized as `{"error": "<code>", "detail": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable error message
    pub detail: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `ShopError`.
    #[must_use]
    pub fn from_error(error: &ShopError) -> Self {
        Self {
            error: error.error_code().to_string(),
            detail: error.to_string(),
        }
    }
}

impl From<&ShopError> for ErrorResponse {
    fn from(error: &ShopError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ShopError::store("connection refused").status_code(), 500);
        assert_eq!(ShopError::cache("timeout").status_code(), 503);
        assert_eq!(ShopError::upstream("recommendations", "502").status_code(), 502);
        assert_eq!(ShopError::config("missing DB_HOST").status_code(), 500);
        assert_eq!(ShopError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ShopError::store("x").error_code(), "backend_error");
        assert_eq!(ShopError::cache("x").error_code(), "cache_fault");
        assert_eq!(ShopError::upstream("a", "b").error_code(), "upstream_error");
        assert_eq!(ShopError::config("x").error_code(), "config_invalid");
        assert_eq!(
            ShopError::Serialization("x".to_string()).error_code(),
            "serialization_error"
        );
        assert_eq!(ShopError::internal("x").error_code(), "internal_error");
    }

    #[test]
    fn test_store_error_message_is_detail_only() {
        let err = ShopError::store("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_upstream_display_names_service() {
        let err = ShopError::upstream("recommendations", "HTTP 503");
        assert_eq!(err.to_string(), "recommendations request failed: HTTP 503");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let err: ShopError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, ShopError::Serialization(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = ShopError::store("relation \"products\" does not exist");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.error, "backend_error");
        assert_eq!(response.detail, "relation \"products\" does not exist");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "backend_error");
        assert!(json.get("detail").is_some());
    }
}

//! Error types for the request dashboard

use crate::types::DataSource;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the request dashboard
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Transport failure talking to a backend
    #[error("Request to {data_source} backend failed: {message}")]
    Http {
        /// Backend that was called
        data_source: DataSource,
        /// Error message
        message: String,
    },

    /// Backend answered with a non-success status
    #[error("{data_source} backend returned {status}: {body}")]
    UpstreamStatus {
        /// Backend that was called
        data_source: DataSource,
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Backend response could not be understood
    #[error("Could not decode {data_source} response: {message}")]
    Decode {
        /// Backend that was called
        data_source: DataSource,
        /// Error message
        message: String,
    },

    /// A single record could not be normalized
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Error message
        message: String,
    },

    /// Request id is not in the current list
    #[error("Request {id} not found in {data_source} requests")]
    NotFound {
        /// Backend searched
        data_source: DataSource,
        /// Missing id
        id: i64,
    },

    /// Validation error
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }

    /// Whether the error came from talking to a backend
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::UpstreamStatus { .. } | Self::Decode { .. }
        )
    }

    /// Shorthand for a validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "token missing");
        let app_error = Error::from(io_error);

        assert!(matches!(app_error, Error::Io(_)));
        assert!(app_error.to_string().contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_upstream_status_display() {
        let error = Error::UpstreamStatus {
            data_source: DataSource::Historical,
            status: 503,
            body: "maintenance".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "historical backend returned 503: maintenance"
        );
        assert!(error.is_upstream());
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_not_found_is_client_error() {
        let error = Error::NotFound {
            data_source: DataSource::Station,
            id: 42,
        };

        assert_eq!(error.to_string(), "Request 42 not found in station requests");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_validation_shorthand() {
        let error = Error::validation("remarks", "required when rejecting");
        assert_eq!(
            error.to_string(),
            "Validation error: remarks - required when rejecting"
        );
        assert!(error.is_client_error());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let app_error = Error::from(json_error);

        assert!(matches!(app_error, Error::Serialization(_)));
        assert!(app_error.source().is_some());
    }
}

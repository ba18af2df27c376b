//! HTTP error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use climdesk_core::{DataSource, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// Error returned by the JSON API and extractors
#[derive(Debug)]
pub enum ApiError {
    /// Failure from the core crate or a backend
    Core(Error),
    /// Path named a data source that does not exist
    UnknownSource(String),
    /// Query string or body could not be parsed
    BadRequest(String),
    /// No route matched
    RouteNotFound(String),
}

impl ApiError {
    /// HTTP status the error maps to
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Core(Error::NotFound { .. }) | Self::UnknownSource(_) | Self::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Core(Error::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Core(Error::Http { .. } | Error::UpstreamStatus { .. } | Error::Decode { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Core(Error::NotFound { .. }) => "NOT_FOUND",
            Self::Core(Error::Validation { .. }) => "VALIDATION_ERROR",
            Self::Core(Error::Http { .. } | Error::UpstreamStatus { .. } | Error::Decode { .. }) => {
                "UPSTREAM_ERROR"
            }
            Self::Core(_) => "INTERNAL_ERROR",
            Self::UnknownSource(_) => "UNKNOWN_SOURCE",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::RouteNotFound(_) => "ROUTE_NOT_FOUND",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(e) => write!(f, "{e}"),
            Self::UnknownSource(slug) => write!(f, "Unknown data source '{slug}'"),
            Self::BadRequest(message) => write!(f, "{message}"),
            Self::RouteNotFound(path) => write!(f, "No route for {path}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::Core(e)
    }
}

/// JSON body of an error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short reason phrase
    pub error: String,
    /// Error code
    pub code: String,
    /// Human readable detail
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), "{}", self);
        }

        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Resolve a path segment to a data source
///
/// # Errors
///
/// Returns [`ApiError::UnknownSource`] for an unrecognized slug.
pub fn source_from_slug(slug: &str) -> Result<DataSource, ApiError> {
    slug.parse()
        .map_err(|_| ApiError::UnknownSource(slug.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Error::NotFound { data_source: DataSource::Station, id: 1 }, StatusCode::NOT_FOUND, "NOT_FOUND")]
    #[case(Error::validation("remarks", "required"), StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")]
    #[case(
        Error::UpstreamStatus { data_source: DataSource::Secondary, status: 503, body: String::new() },
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_ERROR"
    )]
    #[case(
        Error::Decode { data_source: DataSource::Historical, message: "eof".to_string() },
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_ERROR"
    )]
    #[case(Error::Configuration { message: "bad".to_string() }, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")]
    fn test_core_error_mapping(#[case] error: Error, #[case] status: StatusCode, #[case] code: &str) {
        let api_error = ApiError::from(error);
        assert_eq!(api_error.status(), status);
        assert_eq!(api_error.code(), code);
    }

    #[test]
    fn test_unknown_source_is_not_found() {
        let err = source_from_slug("satellite").unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "UNKNOWN_SOURCE");
        assert_eq!(source_from_slug("secondary").unwrap(), DataSource::Secondary);
    }
}

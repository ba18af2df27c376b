//! Query-string extractor shared by the dashboard and the JSON API

use crate::error::ApiError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::NaiveDate;
use climdesk_core::{Error, PageRequest, RequestFilter, RequestStatus, Result};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt::Display;
use std::str::FromStr;

/// Filter, paging and notice parameters of a dashboard URL
///
/// Empty form fields are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Free-text search
    #[serde(
        default,
        alias = "search",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub q: Option<String>,
    /// Status filter, a canonical status name
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Earliest submission date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Latest submission date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Page number (1-based)
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Force a re-fetch from the backend
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub refresh: Option<bool>,
    /// Outcome banner to show, `approved` or `rejected`
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Request the notice refers to
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Whether the URL carried no query string at all
    #[serde(skip)]
    pub initial: bool,
}

impl DashboardQuery {
    /// Parse a raw query string
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] if a numeric field is malformed.
    pub fn parse(raw: Option<&str>) -> std::result::Result<Self, ApiError> {
        let raw = raw.unwrap_or_default();
        let mut query: Self = serde_urlencoded::from_str(raw)
            .map_err(|e| ApiError::BadRequest(format!("Invalid query parameters: {e}")))?;
        query.initial = raw.trim().is_empty();
        Ok(query)
    }

    /// Whether the backend should be re-fetched before rendering
    #[must_use]
    pub fn wants_refresh(&self) -> bool {
        self.initial || self.refresh == Some(true)
    }

    /// Build the request filter
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unknown status, a malformed date
    /// or a `from` date after the `to` date.
    pub fn filter(&self) -> Result<RequestFilter> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<RequestStatus>)
            .transpose()?;
        let submitted_from = parse_day("from", self.from.as_deref())?;
        let submitted_to = parse_day("to", self.to.as_deref())?;
        if let (Some(from), Some(to)) = (submitted_from, submitted_to)
            && from > to
        {
            return Err(Error::validation("from", "must not be after the 'to' date"));
        }

        Ok(RequestFilter {
            search: self.q.clone(),
            status,
            submitted_from,
            submitted_to,
        })
    }

    /// Page to show, using `default_per_page` when none was given
    #[must_use]
    pub fn page_request(&self, default_per_page: u32) -> PageRequest {
        PageRequest::new(self.page, Some(self.per_page.unwrap_or(default_per_page)))
    }

    /// Query string that keeps the filters and selects `page`
    ///
    /// Notice, refresh and id parameters are dropped.
    #[must_use]
    pub fn href_params(&self, page: Option<u32>) -> String {
        let encoded = self.carried_params(page);
        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }

    /// Filter and paging pairs of [`Self::href_params`] without the leading `?`
    #[must_use]
    pub fn carried_params(&self, page: Option<u32>) -> String {
        let params = Self {
            q: self.q.clone(),
            status: self.status.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            page,
            per_page: self.per_page,
            ..Self::default()
        };
        serde_urlencoded::to_string(&params).unwrap_or_default()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DashboardQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        Self::parse(parts.uri.query())
    }
}

fn parse_day(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|value| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| Error::validation(field, format!("'{value}' is not a YYYY-MM-DD date")))
    })
    .transpose()
}

fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

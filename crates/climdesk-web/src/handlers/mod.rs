//! Request handlers for the dashboard pages and the JSON API

pub mod api;
pub mod pages;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Snapshot;
use climdesk_core::{DataSource, Result};
use std::sync::Arc;

/// Snapshot for `source`, re-fetching when `refetch` is set
///
/// # Errors
///
/// Returns the backend error when a fetch was attempted and failed.
pub async fn load_snapshot(state: &AppState, source: DataSource, refetch: bool) -> Result<Arc<Snapshot>> {
    if refetch {
        state.store.refresh(state.backend.as_ref(), source).await
    } else {
        state.store.ensure(state.backend.as_ref(), source).await
    }
}

/// Parse a request id path segment
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] if the segment is not an integer.
pub fn parse_id(raw: &str) -> std::result::Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid request id '{raw}'")))
}

//! JSON API handlers

use super::{load_snapshot, parse_id};
use crate::error::{ApiError, source_from_slug};
use crate::extractors::DashboardQuery;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::Uri,
};
use chrono::Utc;
use climdesk_core::query::{monthly_submissions, paginate};
use climdesk_core::{
    ChartSeries, DataSource, Decision, Error, Page, Request, RequestStatus, StatusCounts,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Paging metadata of a list response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Page number shown (1-based)
    pub page: u32,
    /// Rows per page
    pub per_page: u32,
    /// Matching rows across all pages
    pub total: usize,
    /// Number of pages
    pub total_pages: u32,
    /// Whether a previous page exists
    pub has_prev: bool,
    /// Whether a next page exists
    pub has_next: bool,
}

impl<T> From<&Page<T>> for PaginationMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages: page.total_pages,
            has_prev: page.has_prev,
            has_next: page.has_next,
        }
    }
}

/// Response of `GET /api/requests/:source`
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Requests on this page
    pub data: Vec<Request>,
    /// Paging metadata
    pub pagination: PaginationMeta,
    /// Counts over the unfiltered snapshot
    pub stats: StatusCounts,
}

/// Response of `GET /api/stats/:source`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Source the numbers describe
    pub source: DataSource,
    /// Per-status counts
    pub stats: StatusCounts,
    /// Monthly submissions
    pub chart: ChartSeries,
}

/// Body of `POST /api/requests/:source/:id/status`
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    /// Target status; backend synonyms are accepted
    pub status: String,
    /// Operator remarks, required for rejection
    #[serde(default)]
    pub remarks: Option<String>,
}

/// List requests for a source with filtering and paging
pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
    query: DashboardQuery,
) -> ApiResult<ListResponse> {
    let source = source_from_slug(&source)?;
    let filter = query.filter()?;
    let snapshot = load_snapshot(&state, source, query.refresh == Some(true)).await?;

    let matched = filter.apply(&snapshot.requests);
    let page = paginate(matched, &query.page_request(state.config.dashboard.page_size));

    Ok(Json(ListResponse {
        pagination: PaginationMeta::from(&page),
        data: page.items.into_iter().cloned().collect(),
        stats: snapshot.counts(),
    }))
}

/// Fetch a single request
pub async fn get_request(
    State(state): State<Arc<AppState>>,
    Path((source, id)): Path<(String, String)>,
) -> ApiResult<Request> {
    let source = source_from_slug(&source)?;
    let id = parse_id(&id)?;
    let snapshot = load_snapshot(&state, source, false).await?;

    snapshot
        .find(id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::Core(Error::NotFound {
            data_source: source,
            id,
        }))
}

/// Approve or reject a request
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path((source, id)): Path<(String, String)>,
    body: std::result::Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Request> {
    let source = source_from_slug(&source)?;
    let id = parse_id(&id)?;
    let Json(update) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let status = RequestStatus::normalize(Some(&update.status));
    let decision = Decision::for_status(status).ok_or_else(|| {
        Error::validation(
            "status",
            format!("'{}' is not a decision; use approved or rejected", update.status),
        )
    })?;

    let request = state
        .store
        .decide(
            state.backend.as_ref(),
            source,
            id,
            decision,
            update.remarks.as_deref(),
        )
        .await?;
    info!(source = %source, id, status = %request.status, "Status updated via API");
    Ok(Json(request))
}

/// Status counts and monthly chart for a source
pub async fn source_stats(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
    query: DashboardQuery,
) -> ApiResult<StatsResponse> {
    let source = source_from_slug(&source)?;
    let snapshot = load_snapshot(&state, source, query.refresh == Some(true)).await?;

    Ok(Json(StatsResponse {
        source,
        stats: snapshot.counts(),
        chart: monthly_submissions(
            &snapshot.requests,
            state.config.dashboard.chart_months,
            Utc::now().date_naive(),
        ),
    }))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// JSON 404 for unmatched routes
pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

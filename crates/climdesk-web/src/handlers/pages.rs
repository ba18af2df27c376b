//! Page handlers rendering the dashboard

use super::{load_snapshot, parse_id};
use crate::components::Notice;
use crate::error::{ApiError, source_from_slug};
use crate::extractors::DashboardQuery;
use crate::pages::{DashboardView, Overlay, dashboard_page, not_found_page};
use crate::state::AppState;
use crate::store::Snapshot;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use climdesk_core::query::{monthly_submissions, paginate};
use climdesk_core::{DataSource, Decision, Error, Request, RequestFilter, RequestStatus, StatusCounts};
use maud::Markup;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Query of the confirmation dialog
#[derive(Debug, Deserialize)]
pub struct ConfirmParams {
    /// `approve` or `reject`
    #[serde(default)]
    pub action: String,
}

/// Form posted by the confirmation dialog
#[derive(Debug, Deserialize)]
pub struct DecisionForm {
    /// `approve` or `reject`
    #[serde(default)]
    pub action: String,
    /// Operator remarks
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Redirect the root to the first tab
pub async fn index() -> Redirect {
    Redirect::to(&format!("/requests/{}", DataSource::Station.slug()))
}

/// Dashboard for one source
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
    query: DashboardQuery,
) -> Response {
    let source = match source_from_slug(&source) {
        Ok(source) => source,
        Err(e) => return not_found(&e),
    };

    let (snapshot, notices) = fetch(&state, source, query.wants_refresh()).await;
    render(&state, source, &query, snapshot.as_deref(), notices, None).into_response()
}

/// Dashboard with the detail modal open
pub async fn request_detail(
    State(state): State<Arc<AppState>>,
    Path((source, id)): Path<(String, String)>,
    query: DashboardQuery,
) -> Response {
    let (source, id) = match resolve(&source, &id) {
        Ok(resolved) => resolved,
        Err(e) => return not_found(&e),
    };

    let (snapshot, notices) = fetch(&state, source, query.refresh == Some(true)).await;
    let overlay = match snapshot.as_deref() {
        Some(snapshot) => match snapshot.find(id) {
            Some(request) => Some(Overlay::Detail(request.clone())),
            None => return not_found(&missing(source, id)),
        },
        None => None,
    };
    render(&state, source, &query, snapshot.as_deref(), notices, overlay).into_response()
}

/// Dashboard with the approve/reject confirmation open
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path((source, id)): Path<(String, String)>,
    query: DashboardQuery,
    Query(params): Query<ConfirmParams>,
) -> Response {
    let (source, id) = match resolve(&source, &id) {
        Ok(resolved) => resolved,
        Err(e) => return not_found(&e),
    };

    let (snapshot, mut notices) = fetch(&state, source, false).await;
    let Some(snapshot) = snapshot else {
        return render(&state, source, &query, None, notices, None).into_response();
    };
    let Some(request) = snapshot.find(id) else {
        return not_found(&missing(source, id));
    };

    let decision = match params.action.parse::<Decision>() {
        Ok(decision) => decision,
        Err(e) => {
            notices.push(Notice::Error(e.to_string()));
            let markup = render(&state, source, &query, Some(&*snapshot), notices, None);
            return (StatusCode::UNPROCESSABLE_ENTITY, markup).into_response();
        }
    };
    if !request.is_pending() {
        notices.push(Notice::Error(format!(
            "Request #{id} is already {}",
            request.status
        )));
        let markup = render(&state, source, &query, Some(&*snapshot), notices, None);
        return (StatusCode::UNPROCESSABLE_ENTITY, markup).into_response();
    }

    let overlay = Overlay::Confirm {
        request: request.clone(),
        decision,
        error: None,
        remarks: String::new(),
    };
    render(&state, source, &query, Some(&*snapshot), notices, Some(overlay)).into_response()
}

/// Apply a confirmed decision and redirect back to the dashboard
///
/// The dashboard filters carried in the query string survive the redirect.
pub async fn decide(
    State(state): State<Arc<AppState>>,
    Path((source, id)): Path<(String, String)>,
    query: DashboardQuery,
    Form(form): Form<DecisionForm>,
) -> Response {
    let (source, id) = match resolve(&source, &id) {
        Ok(resolved) => resolved,
        Err(e) => return not_found(&e),
    };
    let remarks = form.remarks.unwrap_or_default();

    let outcome = match form.action.parse::<Decision>() {
        Ok(decision) => state
            .store
            .decide(state.backend.as_ref(), source, id, decision, Some(remarks.as_str()))
            .await
            .map(|request| (decision, request)),
        Err(e) => Err(e),
    };

    match outcome {
        Ok((decision, request)) => {
            info!(source = %source, id, decision = %decision, "Decision applied from dashboard");
            let notice = match request.status {
                RequestStatus::Rejected => "rejected",
                _ => "approved",
            };
            let carried = query.carried_params(query.page);
            let prefix = if carried.is_empty() { String::new() } else { format!("{carried}&") };
            let location = format!("/requests/{}?{prefix}notice={notice}&id={id}", source.slug());
            Redirect::to(&location).into_response()
        }
        Err(Error::NotFound { data_source, id }) => not_found(&missing(data_source, id)),
        Err(e) => {
            warn!(source = %source, id, "Decision failed: {}", e);
            let message = match &e {
                Error::Validation { message, .. } => capitalize(message),
                other if other.is_upstream() => {
                    "The backend did not accept the change. Try again.".to_string()
                }
                other => other.to_string(),
            };
            let status = ApiError::from(e).status();
            let retry = Retry {
                id,
                action: &form.action,
                status,
                message,
                remarks: &remarks,
            };
            retry_dialog(&state, source, &query, retry).await
        }
    }
}

/// A failed decision to show again
struct Retry<'a> {
    id: i64,
    action: &'a str,
    status: StatusCode,
    message: String,
    remarks: &'a str,
}

/// Re-open the confirmation dialog after a failed decision
async fn retry_dialog(
    state: &AppState,
    source: DataSource,
    query: &DashboardQuery,
    retry: Retry<'_>,
) -> Response {
    let Retry {
        id,
        action,
        status,
        message,
        remarks,
    } = retry;
    let snapshot = load_snapshot(state, source, false).await.ok();
    let request = snapshot.as_deref().and_then(|s| s.find(id)).cloned();

    let mut notices = Vec::new();
    let overlay = match (request, action.parse::<Decision>()) {
        (Some(request), Ok(decision)) if request.is_pending() => Some(Overlay::Confirm {
            request,
            decision,
            error: Some(message),
            remarks: remarks.to_string(),
        }),
        _ => {
            notices.push(Notice::Error(format!("Could not update request #{id}: {message}")));
            None
        }
    };

    let markup = render(state, source, query, snapshot.as_deref(), notices, overlay);
    (status, markup).into_response()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

async fn fetch(
    state: &AppState,
    source: DataSource,
    refetch: bool,
) -> (Option<Arc<Snapshot>>, Vec<Notice>) {
    match load_snapshot(state, source, refetch).await {
        Ok(snapshot) => (Some(snapshot), Vec::new()),
        Err(e) => {
            warn!(source = %source, "Rendering dashboard without data: {}", e);
            let notice = Notice::Error(format!("Could not load {}: {e}", source.label()));
            (None, vec![notice])
        }
    }
}

fn render(
    state: &AppState,
    source: DataSource,
    query: &DashboardQuery,
    snapshot: Option<&Snapshot>,
    mut notices: Vec<Notice>,
    overlay: Option<Overlay>,
) -> Markup {
    if let Some(outcome) = outcome_notice(query) {
        notices.insert(0, outcome);
    }
    let filter = query.filter().unwrap_or_else(|e| {
        notices.push(Notice::Error(e.to_string()));
        RequestFilter::default()
    });

    let requests: &[Request] = snapshot.map(|s| s.requests.as_slice()).unwrap_or_default();
    let page = paginate(
        filter.apply(requests),
        &query.page_request(state.config.dashboard.page_size),
    );

    let view = DashboardView {
        source,
        query,
        counts: StatusCounts::from_requests(requests),
        page,
        chart: monthly_submissions(
            requests,
            state.config.dashboard.chart_months,
            Utc::now().date_naive(),
        ),
        notices,
        overlay,
    };
    dashboard_page(&view)
}

fn outcome_notice(query: &DashboardQuery) -> Option<Notice> {
    let verb = match query.notice.as_deref()? {
        "approved" => "approved",
        "rejected" => "rejected",
        _ => return None,
    };
    Some(Notice::Success(match query.id {
        Some(id) => format!("Request #{id} has been {verb}."),
        None => format!("Request {verb}."),
    }))
}

fn resolve(source: &str, id: &str) -> Result<(DataSource, i64), ApiError> {
    Ok((source_from_slug(source)?, parse_id(id)?))
}

fn missing(source: DataSource, id: i64) -> ApiError {
    ApiError::Core(Error::NotFound {
        data_source: source,
        id,
    })
}

fn not_found(error: &ApiError) -> Response {
    (StatusCode::NOT_FOUND, not_found_page(&error.to_string())).into_response()
}

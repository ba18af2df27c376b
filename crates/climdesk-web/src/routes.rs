//! Route definitions for the web interface

use crate::{
    handlers::{api, pages},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Server-rendered dashboard pages
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::index))
        .route("/requests/:source", get(pages::dashboard))
        .route("/requests/:source/:id", get(pages::request_detail))
        .route("/requests/:source/:id/confirm", get(pages::confirm))
        .route("/requests/:source/:id/decision", post(pages::decide))
}

/// JSON API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/requests/:source", get(api::list_requests))
        .route("/api/requests/:source/:id", get(api::get_request))
        .route("/api/requests/:source/:id/status", post(api::update_status))
        .route("/api/stats/:source", get(api::source_stats))
}

/// Build the complete web application router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(page_routes())
        .merge(api_routes())
        .route("/health", get(api::health_check))
        .fallback(api::fallback)
}

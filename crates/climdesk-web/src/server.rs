//! Web server setup and configuration

use crate::api_client::RequestBackend;
use crate::{routes::build_routes, state::AppState};
use axum::Router;
use climdesk_core::config::HttpConfig;
use climdesk_core::{Config, Result};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the backend client cannot be created.
pub fn build_app(config: Config) -> Result<Router> {
    let state = AppState::new(config)?;
    Ok(router_with_state(state))
}

/// Build the application around a caller-provided backend
pub fn build_app_with_backend(config: Config, backend: Arc<dyn RequestBackend>) -> Router {
    router_with_state(AppState::with_backend(config, backend))
}

/// Backend calls a decision can make: fetch when nothing is stored, update, refresh
const BACKEND_CALLS_PER_DECISION: u64 = 3;

fn request_timeout(http: &HttpConfig) -> Duration {
    Duration::from_secs(
        http.timeout_secs
            .saturating_mul(BACKEND_CALLS_PER_DECISION)
            .max(1),
    )
}

fn router_with_state(state: AppState) -> Router {
    let timeout = request_timeout(&state.config.http);

    build_routes()
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_covers_every_decision_call() {
        let http = HttpConfig {
            timeout_secs: 10,
            ..HttpConfig::default()
        };
        assert_eq!(request_timeout(&http), Duration::from_secs(30));

        let http = HttpConfig {
            timeout_secs: u64::MAX,
            ..HttpConfig::default()
        };
        assert_eq!(request_timeout(&http), Duration::from_secs(u64::MAX));
    }
}

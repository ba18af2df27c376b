//! Application state management

use crate::api_client::{ApiClient, RequestBackend};
use crate::store::RequestStore;
use climdesk_core::{Config, Result};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Backend the requests are fetched from and decided against
    pub backend: Arc<dyn RequestBackend>,
    /// Per-source request snapshots
    pub store: Arc<RequestStore>,
}

impl AppState {
    /// Create state backed by the configured HTTP backends
    ///
    /// # Errors
    ///
    /// Returns an error if the auth token cannot be read or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let backend = ApiClient::from_config(&config)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Create state around an existing backend
    #[must_use]
    pub fn with_backend(config: Config, backend: Arc<dyn RequestBackend>) -> Self {
        Self {
            config,
            backend,
            store: Arc::new(RequestStore::new()),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

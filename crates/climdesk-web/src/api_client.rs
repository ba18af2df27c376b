//! HTTP client for the three request backends

use async_trait::async_trait;
use climdesk_core::config::{HttpConfig, SourcesConfig, UpdateMethod};
use climdesk_core::{Config, DataSource, Error, Request, RequestStatus, Result, normalize_records};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Longest upstream error body kept in [`Error::UpstreamStatus`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Operations the dashboard needs from a backend
#[async_trait]
pub trait RequestBackend: Send + Sync {
    /// Fetch and normalize every request held by `source`
    async fn fetch_requests(&self, source: DataSource) -> Result<Vec<Request>>;

    /// Move request `id` to `status`, attaching operator remarks
    async fn update_status(
        &self,
        source: DataSource,
        id: i64,
        status: RequestStatus,
        remarks: Option<&str>,
    ) -> Result<()>;
}

/// API client for the station, historical and secondary backends
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    sources: SourcesConfig,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("sources", &self.sources)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(sources: SourcesConfig, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(http.user_agent.clone())
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            sources,
            token: None,
        })
    }

    /// Create a client from the full configuration, resolving the auth token
    ///
    /// # Errors
    ///
    /// Returns an error if the token file is unreadable or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(config.sources.clone(), &config.http)?;
        match config.auth.resolve_token()? {
            Some(token) => Ok(client.with_token(token)),
            None => {
                warn!("No auth token configured; backend calls will be unauthenticated");
                Ok(client)
            }
        }
    }

    /// Set the bearer token sent with every call
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, source: DataSource, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| transport_error(source, &e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        error!(
            source = %source,
            status = status.as_u16(),
            "Backend returned error: {}",
            body
        );
        Err(Error::UpstreamStatus {
            data_source: source,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RequestBackend for ApiClient {
    async fn fetch_requests(&self, source: DataSource) -> Result<Vec<Request>> {
        let url = self.sources.get(source).list_url();
        debug!(source = %source, "GET {}", url);

        let response = self.send(source, self.client.get(&url)).await?;
        let body: Value = response.json().await.map_err(|e| Error::Decode {
            data_source: source,
            message: e.to_string(),
        })?;

        let requests = normalize_records(source, body)?;
        info!(source = %source, count = requests.len(), "Fetched requests");
        Ok(requests)
    }

    async fn update_status(
        &self,
        source: DataSource,
        id: i64,
        status: RequestStatus,
        remarks: Option<&str>,
    ) -> Result<()> {
        let endpoint = self.sources.get(source);
        let url = endpoint.update_url(id);

        let mut body = Map::new();
        body.insert(
            "status".to_string(),
            Value::String(endpoint.status_case.apply(status)),
        );
        if let Some(remarks) = remarks {
            body.insert(
                endpoint.remarks_field.clone(),
                Value::String(remarks.to_string()),
            );
        }

        let request = match endpoint.update_method {
            UpdateMethod::Patch => self.client.patch(&url),
            UpdateMethod::Put => self.client.put(&url),
        };
        debug!(source = %source, id, "{:?} {}", endpoint.update_method, url);

        self.send(source, request.json(&body)).await?;
        info!(source = %source, id, status = %status, "Updated request status");
        Ok(())
    }
}

fn transport_error(source: DataSource, e: &reqwest::Error) -> Error {
    let message = if e.is_timeout() {
        format!("timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    };
    error!(source = %source, "Backend request failed: {}", message);
    Error::Http {
        data_source: source,
        message,
    }
}

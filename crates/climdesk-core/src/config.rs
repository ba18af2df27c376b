//! Configuration management for the request dashboard

use crate::types::{DataSource, RequestStatus};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `CLIMDESK__SERVER__PORT`
pub const ENV_PREFIX: &str = "CLIMDESK";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dashboard server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend endpoints, one per data source
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Auth token used against the backends
    #[serde(default)]
    pub auth: AuthConfig,

    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Dashboard presentation settings
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Endpoints for all three backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Weather station data backend
    #[serde(default = "SourceConfig::station_defaults")]
    pub station: SourceConfig,

    /// Historical climate data backend
    #[serde(default = "SourceConfig::historical_defaults")]
    pub historical: SourceConfig,

    /// Secondary-source data backend
    #[serde(default = "SourceConfig::secondary_defaults")]
    pub secondary: SourceConfig,
}

impl SourcesConfig {
    /// Endpoint settings for `source`
    #[must_use]
    pub const fn get(&self, source: DataSource) -> &SourceConfig {
        match source {
            DataSource::Station => &self.station,
            DataSource::Historical => &self.historical,
            DataSource::Secondary => &self.secondary,
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            station: SourceConfig::station_defaults(),
            historical: SourceConfig::historical_defaults(),
            secondary: SourceConfig::secondary_defaults(),
        }
    }
}

/// HTTP method used for status updates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMethod {
    /// `PATCH`
    Patch,
    /// `PUT`
    Put,
}

/// Spelling of the status value sent to a backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusCase {
    /// `approved`
    Lower,
    /// `APPROVED`
    Upper,
    /// `Approved`
    Title,
}

impl StatusCase {
    /// Spell `status` for the wire
    #[must_use]
    pub fn apply(self, status: RequestStatus) -> String {
        let canonical = status.as_str();
        match self {
            Self::Lower => canonical.to_lowercase(),
            Self::Upper => canonical.to_uppercase(),
            Self::Title => canonical.to_string(),
        }
    }
}

/// One backend's endpoints and wire conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Scheme, host and optional port of the backend
    pub base_url: String,

    /// Path of the list endpoint
    pub list_path: String,

    /// Path of the status-update endpoint; `{id}` is replaced by the request id
    pub update_path: String,

    /// Method of the status-update call
    pub update_method: UpdateMethod,

    /// Spelling of the status value
    pub status_case: StatusCase,

    /// JSON key that carries operator remarks
    pub remarks_field: String,
}

impl SourceConfig {
    /// Defaults for the weather station backend
    #[must_use]
    pub fn station_defaults() -> Self {
        Self {
            base_url: default_base_url(),
            list_path: "/api/weather-station-requests".to_string(),
            update_path: "/api/weather-station-requests/{id}/status".to_string(),
            update_method: UpdateMethod::Patch,
            status_case: StatusCase::Lower,
            remarks_field: "remarks".to_string(),
        }
    }

    /// Defaults for the historical climate backend
    #[must_use]
    pub fn historical_defaults() -> Self {
        Self {
            base_url: default_base_url(),
            list_path: "/api/historical-data-requests".to_string(),
            update_path: "/api/historical-data-requests/{id}/status".to_string(),
            update_method: UpdateMethod::Put,
            status_case: StatusCase::Upper,
            remarks_field: "rejectionReason".to_string(),
        }
    }

    /// Defaults for the secondary-source backend
    #[must_use]
    pub fn secondary_defaults() -> Self {
        Self {
            base_url: default_base_url(),
            list_path: "/api/secondary-data-requests".to_string(),
            update_path: "/api/secondary-data-requests/{id}".to_string(),
            update_method: UpdateMethod::Patch,
            status_case: StatusCase::Title,
            remarks_field: "rejectionReason".to_string(),
        }
    }

    /// Full URL of the list endpoint
    #[must_use]
    pub fn list_url(&self) -> String {
        join_url(&self.base_url, &self.list_path)
    }

    /// Full URL of the status-update endpoint for `id`
    #[must_use]
    pub fn update_url(&self, id: i64) -> String {
        join_url(&self.base_url, &self.update_path.replace("{id}", &id.to_string()))
    }

    fn validate(&self, source: DataSource) -> crate::Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(invalid(format!("sources.{source}.base_url must not be empty")));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(invalid(format!(
                "sources.{source}.base_url must start with http:// or https://, got '{base}'"
            )));
        }
        if !self.update_path.contains("{id}") {
            return Err(invalid(format!(
                "sources.{source}.update_path must contain the {{id}} placeholder"
            )));
        }
        if self.remarks_field.trim().is_empty() {
            return Err(invalid(format!(
                "sources.{source}.remarks_field must not be empty"
            )));
        }
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Locally stored auth token
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token given inline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// File holding the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| REDACTED))
            .field("token_file", &self.token_file)
            .finish()
    }
}

impl AuthConfig {
    /// The bearer token to send, if any
    ///
    /// An inline token wins over `token_file`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `token_file` is set but unreadable.
    pub fn resolve_token(&self) -> crate::Result<Option<String>> {
        if let Some(token) = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(Some(token.to_string()));
        }
        let Some(path) = &self.token_file else {
            return Ok(None);
        };
        let contents = std::fs::read_to_string(path).map_err(|e| crate::Error::Configuration {
            message: format!("cannot read token file {}: {e}", path.display()),
        })?;
        let token = contents.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Dashboard presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Table rows per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Months shown in the submissions chart
    #[serde(default = "default_chart_months")]
    pub chart_months: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            chart_months: default_chart_months(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8088
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("climdesk/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_page_size() -> u32 {
    10
}

const fn default_chart_months() -> u32 {
    6
}

fn default_log_level() -> String {
    "info".to_string()
}

const REDACTED: &str = "<redacted>";

fn invalid(message: String) -> crate::Error {
    crate::Error::Configuration { message }
}

impl Config {
    /// Load configuration from `climdesk.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `climdesk.toml` when given
    ///
    /// Built-in defaults are overlaid by the file, then by `CLIMDESK__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or anything fails to
    /// parse.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("climdesk").required(false),
        };

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Copy with the inline token masked, for display
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.auth.token.is_some() {
            config.auth.token = Some(REDACTED.to_string());
        }
        config
    }

    /// Reject settings the dashboard cannot run with
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] describing the first problem.
    pub fn validate(&self) -> crate::Result<()> {
        for source in DataSource::ALL {
            self.sources.get(source).validate(source)?;
        }
        if self.dashboard.page_size == 0 || self.dashboard.page_size > crate::query::MAX_PER_PAGE {
            return Err(invalid(format!(
                "dashboard.page_size must be between 1 and {}",
                crate::query::MAX_PER_PAGE
            )));
        }
        if self.dashboard.chart_months == 0 {
            return Err(invalid("dashboard.chart_months must be at least 1".to_string()));
        }
        if self.http.timeout_secs == 0 {
            return Err(invalid("http.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

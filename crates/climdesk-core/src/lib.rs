//! Core types and logic for the climate data-access request dashboard
//!
//! Three backends (weather station data, historical climate data and
//! secondary-source data) each report requests in their own shape. This crate
//! folds them into one [`Request`] model and provides the in-memory filtering,
//! pagination and summaries the dashboard renders.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use normalize::normalize_records;
pub use query::{ChartSeries, Page, PageRequest, RequestFilter, StatusCounts};
pub use types::{DataSource, Decision, Request, RequestPeriod, RequestStatus};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(logging: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match logging.format {
        config::LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        config::LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init(),
    };

    installed.map_err(|e| Error::Configuration {
        message: format!("failed to initialize logging: {e}"),
    })
}

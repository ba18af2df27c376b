//! Climate data-access request dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use clap::{Parser, Subcommand, ValueEnum};
use climdesk_core::config::LogFormat;
use climdesk_core::{Config, DataSource, Decision, Error, RequestFilter, RequestStatus, Result};
use climdesk_web::{ApiClient, RequestStore, build_app};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

/// Command line interface for the request dashboard
#[derive(Parser)]
#[command(
    name = "climdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Review and decide climate data-access requests",
    long_about = "Serves an admin dashboard over the weather station, historical climate and secondary-source request backends, and offers the same listing and decisions from the command line."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for listings
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Start the web dashboard
    Serve,

    /// List requests from one backend
    List {
        /// Data source (station, historical, secondary)
        #[arg(value_name = "SOURCE")]
        source: DataSource,

        /// Only show requests with this status
        #[arg(short, long)]
        status: Option<RequestStatus>,

        /// Search name, organization, email, designation or id
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Approve or reject a pending request
    Decide {
        /// Data source (station, historical, secondary)
        #[arg(value_name = "SOURCE")]
        source: DataSource,

        /// Request id
        #[arg(value_name = "ID")]
        id: i64,

        /// approve or reject
        #[arg(value_name = "ACTION")]
        action: Decision,

        /// Remarks sent with the decision; required to reject
        #[arg(short, long)]
        remarks: Option<String>,
    },

    /// Validate configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env file is normal outside development
        if !e.not_found() {
            eprintln!("Note: .env file not loaded: {e}");
        }
    }

    let cli = Cli::parse();
    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.format = LogFormat::Json;
    }
    climdesk_core::init_logging(&config.logging)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::List {
            source,
            status,
            search,
            format,
        } => list(&config, source, status, search, format).await,
        Commands::Decide {
            source,
            id,
            action,
            remarks,
        } => decide(&config, source, id, action, remarks.as_deref()).await,
        Commands::Config { show } => show_config(&config, show),
    }
}

/// Run the web server until Ctrl+C
async fn serve(config: Config) -> Result<()> {
    let host: IpAddr = config.server.host.parse().map_err(|e| Error::Configuration {
        message: format!("Invalid server host '{}': {e}", config.server.host),
    })?;
    let addr = SocketAddr::new(host, config.server.port);
    let app = build_app(config)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting dashboard on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Print the requests of one backend
async fn list(
    config: &Config,
    source: DataSource,
    status: Option<RequestStatus>,
    search: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let store = RequestStore::new();
    let snapshot = store.refresh(&client, source).await?;

    let filter = RequestFilter {
        search,
        status,
        ..RequestFilter::default()
    };
    let requests = filter.apply(&snapshot.requests);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&requests)?),
        OutputFormat::Table => {
            println!(
                "{:<8} {:<24} {:<28} {:<17} {:<9}",
                "ID", "NAME", "ORGANIZATION", "SUBMITTED", "STATUS"
            );
            for request in &requests {
                let submitted = request
                    .submit_time
                    .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
                println!(
                    "{:<8} {:<24} {:<28} {:<17} {:<9}",
                    request.id,
                    truncate(&request.name, 24),
                    truncate(&request.organization, 28),
                    submitted,
                    request.status
                );
            }
            println!("{} of {} {} requests", requests.len(), snapshot.requests.len(), source);
        }
    }
    Ok(())
}

/// Apply a decision from the command line
async fn decide(
    config: &Config,
    source: DataSource,
    id: i64,
    decision: Decision,
    remarks: Option<&str>,
) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let store = RequestStore::new();
    let request = store.decide(&client, source, id, decision, remarks).await?;
    println!("Request #{} is now {}", request.id, request.status);
    Ok(())
}

/// Validate and optionally print the configuration
fn show_config(config: &Config, show: bool) -> Result<()> {
    config.validate()?;
    config.auth.resolve_token()?;
    if show {
        let rendered = toml::to_string_pretty(&config.redacted()).map_err(|e| Error::Configuration {
            message: format!("Failed to render configuration: {e}"),
        })?;
        println!("{rendered}");
    } else {
        println!("Configuration is valid");
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

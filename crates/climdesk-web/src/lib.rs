//! Web dashboard for reviewing climate data-access requests
//!
//! Serves server-rendered pages and a small JSON API over the station,
//! historical and secondary request backends.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod components;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

// Re-export the main entry points
pub use api_client::{ApiClient, RequestBackend};
pub use error::ApiError;
pub use server::{build_app, build_app_with_backend};
pub use state::AppState;
pub use store::{RequestStore, Snapshot};

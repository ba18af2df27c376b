//! Server-rendered view components

pub mod chart;
pub mod confirm_dialog;
pub mod detail_modal;
pub mod filter_bar;
pub mod layout;
pub mod pagination;
pub mod request_table;
pub mod stats_panel;

pub use chart::chart;
pub use confirm_dialog::confirm_dialog;
pub use detail_modal::detail_modal;
pub use filter_bar::filter_bar;
pub use layout::{Notice, notice, page, tabs};
pub use pagination::pagination;
pub use request_table::{request_table, status_badge};
pub use stats_panel::stats_panel;

use chrono::{DateTime, Utc};
use climdesk_core::DataSource;

/// Path of the dashboard for `source`
#[must_use]
pub fn source_href(source: DataSource) -> String {
    format!("/requests/{}", source.slug())
}

/// Submission time as shown in tables and details
#[must_use]
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

//! Full-page views

pub mod dashboard;
pub mod not_found;

pub use dashboard::{DashboardView, Overlay, dashboard_page};
pub use not_found::not_found_page;

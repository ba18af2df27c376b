//! 404 page

use crate::components::{page, source_href};
use climdesk_core::DataSource;
use maud::{Markup, html};

/// Page shown for an unknown source or request
#[must_use]
pub fn not_found_page(message: &str) -> Markup {
    page(
        "Not found",
        html! {
            section class="card" {
                h2 { "Not found" }
                p { (message) }
                p { a href=(source_href(DataSource::Station)) { "Back to the dashboard" } }
            }
        },
    )
}

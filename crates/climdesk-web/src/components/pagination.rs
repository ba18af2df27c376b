//! Previous/next navigation for the request table

use crate::extractors::DashboardQuery;
use climdesk_core::{DataSource, Page};
use maud::{Markup, html};

use super::source_href;

/// Pagination controls that keep the active filters
#[must_use]
pub fn pagination<T>(source: DataSource, page: &Page<T>, query: &DashboardQuery) -> Markup {
    let base = source_href(source);
    html! {
        nav class="pagination" {
            @if page.has_prev {
                a href={ (base) (query.href_params(Some(page.page - 1))) } { "Previous" }
            } @else {
                span class="disabled" { "Previous" }
            }

            span class="pagination-info" {
                "Page " (page.page) " of " (page.total_pages) " (" (page.total) " requests)"
            }

            @if page.has_next {
                a href={ (base) (query.href_params(Some(page.page + 1))) } { "Next" }
            } @else {
                span class="disabled" { "Next" }
            }
        }
    }
}

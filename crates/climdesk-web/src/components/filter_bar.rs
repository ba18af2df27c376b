//! Search, status and date filters

use super::source_href;
use crate::extractors::DashboardQuery;
use climdesk_core::{DataSource, RequestStatus};
use maud::{Markup, html};

/// GET form that re-renders the dashboard with new filters
///
/// Submitting always returns to the first page.
#[must_use]
pub fn filter_bar(source: DataSource, query: &DashboardQuery) -> Markup {
    let selected = query.status.as_deref().unwrap_or_default();
    html! {
        form class="card filters" method="get" action=(source_href(source)) {
            label {
                "Search"
                input type="search" name="q" placeholder="Name, organization, email or id"
                    value=(query.q.as_deref().unwrap_or_default());
            }
            label {
                "Status"
                select name="status" {
                    option value="" selected[selected.is_empty()] { "All" }
                    @for status in RequestStatus::ALL {
                        option value=(status.as_str())
                            selected[selected.eq_ignore_ascii_case(status.as_str())] { (status) }
                    }
                }
            }
            label {
                "From"
                input type="date" name="from" value=(query.from.as_deref().unwrap_or_default());
            }
            label {
                "To"
                input type="date" name="to" value=(query.to.as_deref().unwrap_or_default());
            }
            input type="hidden" name="page" value="1";
            button type="submit" { "Apply" }
            a href=(source_href(source)) { "Reset" }
            a href={ (source_href(source)) "?refresh=true" } { "Refresh" }
        }
    }
}

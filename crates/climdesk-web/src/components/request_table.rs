//! Paginated request table

use super::{format_time, pagination, source_href};
use crate::extractors::DashboardQuery;
use climdesk_core::{DataSource, Decision, Page, Request, RequestStatus};
use maud::{Markup, html};

/// Colored badge for a status
#[must_use]
pub fn status_badge(status: RequestStatus) -> Markup {
    let class = match status {
        RequestStatus::Pending => "badge pending",
        RequestStatus::Approved => "badge approved",
        RequestStatus::Rejected => "badge rejected",
    };
    html! { span class=(class) { (status) } }
}

/// Table of the current page of requests
///
/// Approve and reject links appear only on pending rows.
#[must_use]
pub fn request_table(source: DataSource, page: &Page<&Request>, query: &DashboardQuery) -> Markup {
    let base = source_href(source);
    let keep = query.href_params(Some(page.page));
    let carried = query.carried_params(Some(page.page));
    html! {
        section class="card" {
            table {
                thead {
                    tr {
                        th { "ID" }
                        th { "Name" }
                        th { "Organization" }
                        th { "Submitted" }
                        th { "Status" }
                        th { "Actions" }
                    }
                }
                tbody {
                    @if page.items.is_empty() {
                        tr { td class="empty" colspan="6" { "No requests match the current filters." } }
                    }
                    @for request in &page.items {
                        tr {
                            td { (request.id) }
                            td { (request.name) }
                            td { (request.organization) }
                            td { (format_time(request.submit_time)) }
                            td { (status_badge(request.status)) }
                            td class="actions" {
                                a href={ (base) "/" (request.id) (keep) } { "View" }
                                @if request.is_pending() {
                                    @for (decision, label) in [(Decision::Approve, "Approve"), (Decision::Reject, "Reject")] {
                                        a href={ (base) "/" (request.id) "/confirm?action=" (decision.as_str()) "&" (carried) } { (label) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            (pagination(source, page, query))
        }
    }
}

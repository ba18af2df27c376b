//! Full request details in a modal overlay

use super::{format_time, status_badge};
use climdesk_core::{DataSource, Request};
use maud::{Markup, html};

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

fn text(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

/// Every field of `request`; closing returns to `back_href`
#[must_use]
pub fn detail_modal(request: &Request, back_href: &str) -> Markup {
    html! {
        div class="overlay" {
            div class="modal" role="dialog" aria-labelledby="detail-title" {
                h2 id="detail-title" { "Request #" (request.id) " " (status_badge(request.status)) }
                dl {
                    dt { "Source" } dd { (request.source.label()) }
                    dt { "Name" } dd { (text(&request.name)) }
                    dt { "Organization" } dd { (text(&request.organization)) }
                    dt { "Designation" } dd { (text(&request.designation)) }
                    dt { "Email" } dd { (text(&request.email)) }
                    dt { "Mobile" } dd { (text(&request.mobile)) }
                    dt { "Address" } dd { (text(&request.address)) }
                    dt { "Submitted" } dd { (format_time(request.submit_time)) }
                    dt { "Period" } dd { (request.period.describe()) }
                    @if request.source == DataSource::Secondary {
                        dt { "Purpose" } dd { (request.purpose.as_deref().map_or("-", text)) }
                        dt { "Methodology" } dd { (request.methodology.as_deref().map_or("-", text)) }
                        dt { "Data sources" } dd { (list(&request.data_sources)) }
                        dt { "Data types" } dd { (list(&request.parameters)) }
                    } @else {
                        dt { "Stations" } dd { (list(&request.stations)) }
                        dt { "Parameters" } dd { (list(&request.parameters)) }
                        dt { "Formats" } dd { (list(&request.formats)) }
                    }
                    @if let Some(remarks) = &request.remarks {
                        dt { "Remarks" } dd { (remarks) }
                    }
                }
                p { a href=(back_href) { "Close" } }
            }
        }
    }
}

//! Per-status summary cards

use climdesk_core::{RequestStatus, StatusCounts};
use maud::{Markup, html};

/// Total, pending, approved and rejected counts
#[must_use]
pub fn stats_panel(counts: &StatusCounts) -> Markup {
    html! {
        section class="stats" {
            div class="card stat" {
                div class="label" { "Total Requests" }
                div class="value" { (counts.total) }
            }
            @for status in RequestStatus::ALL {
                div class="card stat" {
                    div class="label" { (status) }
                    div class="value" { (counts.get(status)) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_panel_shows_every_count() {
        let counts = StatusCounts {
            total: 9,
            pending: 4,
            approved: 3,
            rejected: 2,
        };
        let html = stats_panel(&counts).into_string();
        for expected in ["Total Requests", ">9<", ">4<", ">3<", ">2<", "Rejected"] {
            assert!(html.contains(expected), "missing {expected}");
        }
    }
}

//! Dashboard page for one data source

use crate::components::{
    Notice, chart, confirm_dialog, detail_modal, filter_bar, notice, page, request_table,
    stats_panel, tabs,
};
use crate::extractors::DashboardQuery;
use climdesk_core::{ChartSeries, DataSource, Decision, Page, Request, StatusCounts};
use maud::{Markup, html};

/// Dialog drawn over the dashboard
#[derive(Debug, Clone)]
pub enum Overlay {
    /// Detail view of a request
    Detail(Request),
    /// Approve/reject confirmation
    Confirm {
        /// Request being decided
        request: Request,
        /// Decision awaiting confirmation
        decision: Decision,
        /// Validation or backend error from a previous attempt
        error: Option<String>,
        /// Remarks typed so far
        remarks: String,
    },
}

/// Everything the dashboard renders
#[derive(Debug)]
pub struct DashboardView<'a> {
    /// Active tab
    pub source: DataSource,
    /// Parsed query parameters
    pub query: &'a DashboardQuery,
    /// Counts over the whole snapshot
    pub counts: StatusCounts,
    /// Filtered page of requests
    pub page: Page<&'a Request>,
    /// Monthly submissions
    pub chart: ChartSeries,
    /// Banners to show above the table
    pub notices: Vec<Notice>,
    /// Optional dialog
    pub overlay: Option<Overlay>,
}

/// Render the dashboard
#[must_use]
pub fn dashboard_page(view: &DashboardView<'_>) -> Markup {
    page(view.source.label(), dashboard_content(view))
}

/// Dashboard body without the document shell
#[must_use]
pub fn dashboard_content(view: &DashboardView<'_>) -> Markup {
    let keep = view.query.href_params(Some(view.page.page));
    let back_href = format!("/requests/{}{keep}", view.source.slug());
    html! {
        (tabs(view.source))
        @for banner in &view.notices {
            (notice(banner))
        }
        (stats_panel(&view.counts))
        (filter_bar(view.source, view.query))
        (request_table(view.source, &view.page, view.query))
        (chart(&view.chart))

        @match &view.overlay {
            Some(Overlay::Detail(request)) => {
                (detail_modal(request, &back_href))
            }
            Some(Overlay::Confirm { request, decision, error, remarks }) => {
                (confirm_dialog(request, *decision, error.as_deref(), remarks, &keep))
            }
            None => {}
        }
    }
}

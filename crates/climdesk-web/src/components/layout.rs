//! Document shell, source tabs and notice banners

use super::source_href;
use climdesk_core::DataSource;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLES: &str = r"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f8; color: #1f2933; }
header { background: #0b4f6c; color: #fff; padding: 1rem 2rem; }
header h1 { margin: 0; font-size: 1.4rem; }
main { padding: 1.5rem 2rem; }
a { color: #0b4f6c; }
.tabs { display: flex; gap: .5rem; margin-bottom: 1rem; }
.tab { padding: .5rem 1rem; border-radius: 4px 4px 0 0; background: #dde3e8; text-decoration: none; }
.tab.active { background: #fff; font-weight: 600; }
.card { background: #fff; border-radius: 6px; padding: 1rem; margin-bottom: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
.stat .value { font-size: 1.8rem; font-weight: 700; }
.filters { display: flex; flex-wrap: wrap; gap: .75rem; align-items: end; }
.filters label { display: flex; flex-direction: column; font-size: .85rem; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: .5rem; border-bottom: 1px solid #e4e7eb; }
.badge { padding: .15rem .5rem; border-radius: 999px; font-size: .8rem; }
.badge.pending { background: #fff3c4; }
.badge.approved { background: #c6f7e2; }
.badge.rejected { background: #ffd0d0; }
.actions a { margin-right: .5rem; }
.pagination { display: flex; gap: 1rem; align-items: center; margin-top: 1rem; }
.chart { display: flex; align-items: end; gap: .5rem; height: 160px; }
.chart .bar { flex: 1; display: flex; flex-direction: column; justify-content: end; align-items: center; height: 100%; }
.chart .fill { width: 100%; background: #2186eb; border-radius: 3px 3px 0 0; }
.chart .label { font-size: .75rem; margin-top: .25rem; }
.notice { padding: .75rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.notice.success { background: #c6f7e2; }
.notice.error { background: #ffd0d0; }
.overlay { position: fixed; inset: 0; background: rgba(15,23,42,.45); display: flex; align-items: center; justify-content: center; }
.modal { background: #fff; border-radius: 6px; padding: 1.5rem; width: min(720px, 92vw); max-height: 85vh; overflow: auto; }
.modal dl { display: grid; grid-template-columns: 12rem 1fr; gap: .4rem 1rem; }
.modal dt { font-weight: 600; }
textarea { width: 100%; min-height: 6rem; }
.empty { text-align: center; color: #7b8794; padding: 2rem; }
";

/// Banner shown above the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An operation completed
    Success(String),
    /// An operation or fetch failed
    Error(String),
}

/// Full HTML document around `body`
#[must_use]
pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Climate Data Requests" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                header { h1 { "Climate Data Requests" } }
                main { (body) }
            }
        }
    }
}

/// One tab per data source, with `current` highlighted
#[must_use]
pub fn tabs(current: DataSource) -> Markup {
    html! {
        nav class="tabs" {
            @for source in DataSource::ALL {
                a.tab.active[source == current] href=(source_href(source)) {
                    (source.label())
                }
            }
        }
    }
}

/// Render a notice banner
#[must_use]
pub fn notice(notice: &Notice) -> Markup {
    let (class, text) = match notice {
        Notice::Success(text) => ("notice success", text),
        Notice::Error(text) => ("notice error", text),
    };
    html! {
        div class=(class) role="status" { (text) }
    }
}

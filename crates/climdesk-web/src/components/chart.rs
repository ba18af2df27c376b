//! Monthly submissions bar chart

use climdesk_core::ChartSeries;
use maud::{Markup, html};

/// CSS bar chart, bars scaled to the busiest month
#[must_use]
pub fn chart(series: &ChartSeries) -> Markup {
    let max = series.max_count().max(1);
    html! {
        section class="card" {
            h3 { "Submissions per month" }
            div class="chart" {
                @for bucket in &series.buckets {
                    div class="bar" title={ (bucket.label) ": " (bucket.count) } {
                        span class="count" { (bucket.count) }
                        div class="fill" style={ "height: " (bucket.count * 100 / max) "%" } {}
                        span class="label" { (bucket.label) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climdesk_core::query::ChartBucket;

    #[test]
    fn test_bars_scale_to_max() {
        let series = ChartSeries {
            buckets: vec![
                ChartBucket { label: "2024-04".to_string(), count: 0 },
                ChartBucket { label: "2024-05".to_string(), count: 2 },
                ChartBucket { label: "2024-06".to_string(), count: 4 },
            ],
        };
        let html = chart(&series).into_string();
        assert!(html.contains("height: 0%"));
        assert!(html.contains("height: 50%"));
        assert!(html.contains("height: 100%"));
        assert!(html.contains("2024-06"));
    }

    #[test]
    fn test_empty_series_renders() {
        let html = chart(&ChartSeries::default()).into_string();
        assert!(html.contains("Submissions per month"));
    }
}

//! Filtering, ordering, pagination and summaries over the in-memory list

use crate::types::{Request, RequestStatus};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default number of rows per page
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size a caller may ask for
pub const MAX_PER_PAGE: u32 = 100;

/// Criteria from the filter bar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    /// Free-text search over name, organization, email, designation and id
    pub search: Option<String>,
    /// Only requests in this state
    pub status: Option<RequestStatus>,
    /// Submitted on or after this day
    pub submitted_from: Option<NaiveDate>,
    /// Submitted on or before this day
    pub submitted_to: Option<NaiveDate>,
}

impl RequestFilter {
    /// Whether no criterion is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle().is_none()
            && self.status.is_none()
            && self.submitted_from.is_none()
            && self.submitted_to.is_none()
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether `request` passes every set criterion
    #[must_use]
    pub fn matches(&self, request: &Request) -> bool {
        if let Some(status) = self.status {
            if request.status != status {
                return false;
            }
        }

        if self.submitted_from.is_some() || self.submitted_to.is_some() {
            let Some(submitted) = request.submit_time.map(|t| t.date_naive()) else {
                return false;
            };
            if self.submitted_from.is_some_and(|from| submitted < from) {
                return false;
            }
            if self.submitted_to.is_some_and(|to| submitted > to) {
                return false;
            }
        }

        self.needle().is_none_or(|needle| {
            [
                request.name.as_str(),
                request.organization.as_str(),
                request.email.as_str(),
                request.designation.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
                || request.id.to_string().contains(&needle)
        })
    }

    /// Requests that pass the filter, in their original order
    #[must_use]
    pub fn apply<'a>(&self, requests: &'a [Request]) -> Vec<&'a Request> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Order newest submission first; undated requests last, ties by id descending
pub fn sort_newest_first(requests: &mut [Request]) {
    requests.sort_by(|a, b| match (a.submit_time, b.submit_time) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| b.id.cmp(&a.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.id.cmp(&a.id),
    });
}

/// Which page of results to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based)
    pub page: u32,
    /// Rows per page
    pub per_page: u32,
}

impl PageRequest {
    /// Build a page request, clamping both values into range
    #[must_use]
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results with navigation metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,
    /// Page number actually shown (1-based)
    pub page: u32,
    /// Rows per page
    pub per_page: u32,
    /// Rows across all pages
    pub total: usize,
    /// Number of pages, at least 1
    pub total_pages: u32,
    /// Whether a previous page exists
    pub has_prev: bool,
    /// Whether a next page exists
    pub has_next: bool,
}

/// Slice `items` into the requested page
///
/// A page past the end is clamped to the last page.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Page<T> {
    let per_page = request.per_page.max(1);
    let total = items.len();
    let per_page_usize = per_page as usize;
    let total_pages = u32::try_from(total.div_ceil(per_page_usize))
        .unwrap_or(u32::MAX)
        .max(1);
    let page = request.page.clamp(1, total_pages);
    let offset = (page as usize - 1) * per_page_usize;

    let items: Vec<T> = items
        .into_iter()
        .skip(offset)
        .take(per_page_usize)
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
        total_pages,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}

/// Per-status counts for the stats panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// All requests
    pub total: usize,
    /// Awaiting decision
    pub pending: usize,
    /// Approved
    pub approved: usize,
    /// Rejected
    pub rejected: usize,
}

impl StatusCounts {
    /// Count requests by status
    #[must_use]
    pub fn from_requests<'a, I>(requests: I) -> Self
    where
        I: IntoIterator<Item = &'a Request>,
    {
        requests.into_iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.status {
                RequestStatus::Pending => acc.pending += 1,
                RequestStatus::Approved => acc.approved += 1,
                RequestStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
    }

    /// Count for a single status
    #[must_use]
    pub const fn get(&self, status: RequestStatus) -> usize {
        match status {
            RequestStatus::Pending => self.pending,
            RequestStatus::Approved => self.approved,
            RequestStatus::Rejected => self.rejected,
        }
    }
}

/// One bar of the submissions chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBucket {
    /// Month as `YYYY-MM`
    pub label: String,
    /// Requests submitted in that month
    pub count: usize,
}

/// Monthly submission counts, oldest month first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// One bucket per month
    pub buckets: Vec<ChartBucket>,
}

impl ChartSeries {
    /// Largest bucket count, 0 when empty
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Count submissions per month over the `months` months ending with `today`
///
/// Months without submissions are included with a zero count. Requests with
/// no submit time are not counted.
#[must_use]
pub fn monthly_submissions(requests: &[Request], months: u32, today: NaiveDate) -> ChartSeries {
    let end = (today.year(), today.month());
    let mut keys: Vec<(i32, u32)> = Vec::with_capacity(months as usize);
    let (mut year, mut month) = end;
    for _ in 0..months {
        keys.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    keys.reverse();

    let buckets = keys
        .into_iter()
        .map(|(year, month)| {
            let count = requests
                .iter()
                .filter_map(|r| r.submit_time)
                .filter(|t| t.year() == year && t.month() == month)
                .count();
            ChartBucket {
                label: format!("{year:04}-{month:02}"),
                count,
            }
        })
        .collect();

    ChartSeries { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataSource;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn request(id: i64, status: RequestStatus, submitted: Option<(i32, u32, u32)>) -> Request {
        let mut r = Request::new(DataSource::Station, id);
        r.status = status;
        r.name = format!("Person {id}");
        r.organization = if id % 2 == 0 {
            "Meteorological Department".to_string()
        } else {
            "Agricultural University".to_string()
        };
        r.email = format!("person{id}@example.org");
        r.submit_time =
            submitted.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap());
        r
    }

    fn sample() -> Vec<Request> {
        vec![
            request(1, RequestStatus::Pending, Some((2024, 1, 10))),
            request(2, RequestStatus::Approved, Some((2024, 2, 1))),
            request(3, RequestStatus::Rejected, Some((2024, 2, 20))),
            request(4, RequestStatus::Pending, None),
            request(5, RequestStatus::Pending, Some((2024, 3, 5))),
        ]
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let requests = sample();
        let filter = RequestFilter {
            search: Some("   ".to_string()),
            ..RequestFilter::default()
        };
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&requests).len(), 5);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let requests = sample();
        let by_org = RequestFilter {
            search: Some("meteorological".to_string()),
            ..RequestFilter::default()
        };
        let ids: Vec<i64> = by_org.apply(&requests).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4]);

        let by_email = RequestFilter {
            search: Some("PERSON5@".to_string()),
            ..RequestFilter::default()
        };
        assert_eq!(by_email.apply(&requests).len(), 1);

        let by_id = RequestFilter {
            search: Some("3".to_string()),
            ..RequestFilter::default()
        };
        assert_eq!(by_id.apply(&requests)[0].id, 3);
    }

    #[test]
    fn test_status_and_date_filters() {
        let requests = sample();
        let pending = RequestFilter {
            status: Some(RequestStatus::Pending),
            ..RequestFilter::default()
        };
        assert_eq!(pending.apply(&requests).len(), 3);

        let february = RequestFilter {
            submitted_from: NaiveDate::from_ymd_opt(2024, 2, 1),
            submitted_to: NaiveDate::from_ymd_opt(2024, 2, 20),
            ..RequestFilter::default()
        };
        let ids: Vec<i64> = february.apply(&requests).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);

        let from_only = RequestFilter {
            submitted_from: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..RequestFilter::default()
        };
        let ids: Vec<i64> = from_only.apply(&requests).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5], "undated requests drop out once a date bound is set");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut requests = sample();
        sort_newest_first(&mut requests);
        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 3, 2, 1, 4]);
    }

    #[test]
    fn test_page_request_clamps() {
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, per_page: 1 });
        assert_eq!(PageRequest::new(None, Some(500)).per_page, MAX_PER_PAGE);
        assert_eq!(PageRequest::default().per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_paginate_middle_and_last_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(items.clone(), &PageRequest::new(Some(2), Some(10)));
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev);
        assert!(page.has_next);

        let past_end = paginate(items, &PageRequest::new(Some(9), Some(10)));
        assert_eq!(past_end.page, 3);
        assert_eq!(past_end.items, vec![21, 22, 23, 24, 25]);
        assert!(!past_end.has_next);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate(Vec::<u32>::new(), &PageRequest::default());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_prev && !page.has_next);
    }

    #[test]
    fn test_status_counts() {
        let counts = StatusCounts::from_requests(&sample());
        assert_eq!(
            counts,
            StatusCounts {
                total: 5,
                pending: 3,
                approved: 1,
                rejected: 1,
            }
        );
        assert_eq!(counts.get(RequestStatus::Approved), 1);
    }

    #[test]
    fn test_monthly_submissions_spans_year_boundary() {
        let mut requests = sample();
        requests.push(request(6, RequestStatus::Pending, Some((2023, 12, 31))));
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();

        let series = monthly_submissions(&requests, 4, today);
        let labels: Vec<&str> = series.buckets.iter().map(|b| b.label.as_str()).collect();
        let counts: Vec<usize> = series.buckets.iter().map(|b| b.count).collect();

        assert_eq!(labels, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
        assert_eq!(counts, vec![0, 1, 1, 2]);
        assert_eq!(series.max_count(), 2);
    }
}

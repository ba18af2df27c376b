//! Benchmarks for climdesk-core normalization and query functionality

use chrono::{NaiveDate, TimeZone, Utc};
use climdesk_core::query::{monthly_submissions, paginate, sort_newest_first};
use climdesk_core::{
    DataSource, PageRequest, Request, RequestFilter, RequestStatus, normalize_records,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

fn synthetic_requests(count: usize) -> Vec<Request> {
    (0..count)
        .map(|i| {
            let id = i64::try_from(i).unwrap_or(i64::MAX);
            let mut request = Request::new(DataSource::Station, id);
            request.name = format!("Applicant {i}");
            request.organization = ["Meteorological Department", "University", "NGO"][i % 3].to_string();
            request.email = format!("applicant{i}@example.org");
            request.status = RequestStatus::ALL[i % 3];
            let day = u32::try_from(i % 28).unwrap_or(0) + 1;
            let month = u32::try_from(i % 12).unwrap_or(0) + 1;
            request.submit_time = Utc.with_ymd_and_hms(2024, month, day, 10, 0, 0).single();
            request
        })
        .collect()
}

/// Benchmark normalizing raw backend payloads
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    for size in [100_usize, 1_000, 10_000] {
        let records: Vec<serde_json::Value> = (0..size)
            .map(|i| {
                json!({
                    "id": i,
                    "fullName": format!("Applicant {i}"),
                    "status": ["PENDING", "approved", "Declined"][i % 3],
                    "submitTime": "2024-03-05T10:15:00Z",
                    "selectedStations": [{"stationName": "Dhaka"}, "Sylhet"],
                    "selectedParameters": "Rainfall, Humidity",
                    "timeInterval": "last_30_days"
                })
            })
            .collect();
        let body = serde_json::Value::Array(records);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("station", size), &body, |b, body| {
            b.iter(|| normalize_records(DataSource::Station, black_box(body.clone())));
        });
    }

    group.finish();
}

/// Benchmark the filter, sort and paginate path behind every table render
fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for size in [1_000_usize, 10_000, 50_000] {
        let requests = synthetic_requests(size);
        let filter = RequestFilter {
            search: Some("university".to_string()),
            status: Some(RequestStatus::Pending),
            submitted_from: NaiveDate::from_ymd_opt(2024, 3, 1),
            submitted_to: None,
        };

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("filter_paginate", size), &requests, |b, requests| {
            b.iter(|| {
                let matched = filter.apply(black_box(requests));
                paginate(matched, &PageRequest::new(Some(2), Some(25)))
            });
        });

        group.bench_with_input(BenchmarkId::new("sort", size), &requests, |b, requests| {
            b.iter(|| {
                let mut sorted = requests.clone();
                sort_newest_first(&mut sorted);
                sorted
            });
        });

        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("chart", size), &requests, |b, requests| {
            b.iter(|| monthly_submissions(black_box(requests), 12, today));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalization, bench_query);
criterion_main!(benches);

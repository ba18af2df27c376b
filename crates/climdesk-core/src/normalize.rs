//! Normalization of backend records into [`Request`]
//!
//! Each backend has its own record shape, key casing and status vocabulary.
//! The record types here accept every spelling seen in practice and fold it
//! into the single [`Request`] model.

use crate::types::{DataSource, Request, RequestPeriod, RequestStatus};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

const APPROVED_SYNONYMS: &[&str] = &[
    "approved",
    "approve",
    "accepted",
    "accept",
    "granted",
    "active",
    "completed",
    "complete",
    "done",
    "fulfilled",
];

const REJECTED_SYNONYMS: &[&str] = &[
    "rejected",
    "reject",
    "declined",
    "decline",
    "denied",
    "deny",
    "refused",
    "cancelled",
    "canceled",
];

const PENDING_SYNONYMS: &[&str] = &[
    "pending",
    "submitted",
    "new",
    "open",
    "in review",
    "under review",
    "review",
    "processing",
    "in progress",
    "awaiting approval",
    "waiting",
];

/// Keys tried, in order, when a list item is an object
const LIST_ITEM_KEYS: &[&str] = &[
    "name",
    "stationName",
    "station_name",
    "label",
    "title",
    "value",
];

/// Keys that may wrap the record array in a list response
const ENVELOPE_KEYS: &[&str] = &["data", "requests", "results"];

impl RequestStatus {
    /// Fold a backend status string into one of the canonical states
    ///
    /// Matching ignores case and treats `-`, `_` and runs of whitespace as a
    /// single space. Missing, empty and unrecognized values are `Pending`.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Pending;
        };
        let key = canonical_key(raw);
        if key.is_empty() {
            return Self::Pending;
        }

        if APPROVED_SYNONYMS.contains(&key.as_str()) {
            Self::Approved
        } else if REJECTED_SYNONYMS.contains(&key.as_str()) {
            Self::Rejected
        } else {
            if !PENDING_SYNONYMS.contains(&key.as_str()) {
                debug!("Unrecognized request status '{}', treating as pending", raw);
            }
            Self::Pending
        }
    }
}

fn canonical_key(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A canonical key and its alternative spellings, in priority order
pub type KeyGroup = (&'static str, &'static [&'static str]);

/// Submitter keys shared by all three backends
const SUBMITTER_KEYS: &[KeyGroup] = &[
    ("name", &["fullName", "full_name"]),
    ("organization", &["institution"]),
    ("mobile", &["phone", "contactNumber", "contact_number"]),
    ("submitTime", &["submit_time", "submittedAt", "createdAt", "created_at"]),
];

/// A backend record type that can be folded into a [`Request`]
pub trait SourceRecord: DeserializeOwned {
    /// Backend this record shape belongs to
    const SOURCE: DataSource;

    /// Alternative key spellings folded into the canonical key before decoding
    const KEYS: &'static [KeyGroup];

    /// Convert into the normalized model
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] when the record has no usable id.
    fn into_request(self) -> Result<Request>;
}

/// Record id as sent by a backend: a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id
    Number(i64),
    /// Stringified id
    Text(String),
}

impl RecordId {
    fn resolve(id: Option<Self>) -> Result<i64> {
        match id {
            Some(Self::Number(n)) => Ok(n),
            Some(Self::Text(text)) => text.trim().parse().map_err(|_| Error::InvalidRecord {
                message: format!("non-numeric id '{text}'"),
            }),
            None => Err(Error::InvalidRecord {
                message: "missing id".to_string(),
            }),
        }
    }
}

/// Submitter details shared by all three backends
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitterFields {
    /// Submitter name
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    /// Organization
    #[serde(default, deserialize_with = "loose_string")]
    pub organization: Option<String>,
    /// Job title
    #[serde(default, deserialize_with = "loose_string")]
    pub designation: Option<String>,
    /// Email address
    #[serde(default, deserialize_with = "loose_string")]
    pub email: Option<String>,
    /// Phone number
    #[serde(default, deserialize_with = "loose_string")]
    pub mobile: Option<String>,
    /// Postal address
    #[serde(default, deserialize_with = "loose_string")]
    pub address: Option<String>,
    /// Submission time
    #[serde(default)]
    pub submit_time: Option<Value>,
}

/// Weather station data request as sent by the station backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRequestRecord {
    /// Record id
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Submitter details
    #[serde(flatten)]
    pub submitter: SubmitterFields,
    /// Raw status
    #[serde(default, deserialize_with = "loose_string")]
    pub status: Option<String>,
    /// Operator remarks
    #[serde(default, deserialize_with = "loose_string")]
    pub remarks: Option<String>,
    /// Chosen stations
    #[serde(default, deserialize_with = "string_list")]
    pub selected_stations: Vec<String>,
    /// Chosen parameters
    #[serde(default, deserialize_with = "string_list")]
    pub selected_parameters: Vec<String>,
    /// Chosen formats
    #[serde(default, deserialize_with = "string_list")]
    pub data_format: Vec<String>,
    /// Range start
    #[serde(default)]
    pub start_date: Option<Value>,
    /// Range end
    #[serde(default)]
    pub end_date: Option<Value>,
    /// Preset interval
    #[serde(default, deserialize_with = "loose_string")]
    pub time_interval: Option<String>,
}

impl SourceRecord for StationRequestRecord {
    const SOURCE: DataSource = DataSource::Station;

    const KEYS: &'static [KeyGroup] = &[
        ("selectedStations", &["selected_stations"]),
        ("selectedParameters", &["selected_parameters"]),
        ("dataFormat", &["data_format", "selectedFormats", "formats"]),
        ("startDate", &["start_date"]),
        ("endDate", &["end_date"]),
        ("timeInterval", &["time_interval", "interval"]),
    ];

    fn into_request(self) -> Result<Request> {
        let mut request =
            base_request(Self::SOURCE, self.id, self.submitter, self.status.as_deref())?;
        request.remarks = non_empty(self.remarks);
        request.stations = self.selected_stations;
        request.parameters = self.selected_parameters;
        request.formats = self.data_format;
        request.period = build_period(
            self.start_date.as_ref(),
            self.end_date.as_ref(),
            self.time_interval,
        );
        Ok(request)
    }
}

/// Historical climate data request as sent by the historical backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRequestRecord {
    /// Record id
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Submitter details
    #[serde(flatten)]
    pub submitter: SubmitterFields,
    /// Raw status
    #[serde(default, deserialize_with = "loose_string")]
    pub status: Option<String>,
    /// Operator remarks
    #[serde(default, deserialize_with = "loose_string")]
    pub remarks: Option<String>,
    /// Reason given on rejection
    #[serde(default, deserialize_with = "loose_string")]
    pub rejection_reason: Option<String>,
    /// Chosen stations
    #[serde(default, deserialize_with = "string_list")]
    pub stations: Vec<String>,
    /// Chosen parameters
    #[serde(default, deserialize_with = "string_list")]
    pub parameters: Vec<String>,
    /// Chosen formats
    #[serde(default, deserialize_with = "string_list")]
    pub formats: Vec<String>,
    /// Range start
    #[serde(default)]
    pub from_date: Option<Value>,
    /// Range end
    #[serde(default)]
    pub to_date: Option<Value>,
    /// Preset interval
    #[serde(default, deserialize_with = "loose_string")]
    pub preset_interval: Option<String>,
}

impl SourceRecord for HistoricalRequestRecord {
    const SOURCE: DataSource = DataSource::Historical;

    const KEYS: &'static [KeyGroup] = &[
        ("rejectionReason", &["rejection_reason"]),
        ("stations", &["selectedStations"]),
        ("parameters", &["selectedParameters"]),
        ("formats", &["dataFormat", "selectedFormats"]),
        ("fromDate", &["from_date", "startDate", "start_date"]),
        ("toDate", &["to_date", "endDate", "end_date"]),
        ("presetInterval", &["preset_interval", "timeInterval", "interval"]),
    ];

    fn into_request(self) -> Result<Request> {
        let mut request =
            base_request(Self::SOURCE, self.id, self.submitter, self.status.as_deref())?;
        request.remarks = pick_remarks(self.rejection_reason, self.remarks);
        request.stations = self.stations;
        request.parameters = self.parameters;
        request.formats = self.formats;
        request.period = build_period(
            self.from_date.as_ref(),
            self.to_date.as_ref(),
            self.preset_interval,
        );
        Ok(request)
    }
}

/// Secondary-source data request as sent by the secondary backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryRequestRecord {
    /// Record id
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Submitter details
    #[serde(flatten)]
    pub submitter: SubmitterFields,
    /// Raw status
    #[serde(default, deserialize_with = "loose_string")]
    pub status: Option<String>,
    /// Operator remarks
    #[serde(default, deserialize_with = "loose_string")]
    pub remarks: Option<String>,
    /// Reason given on rejection
    #[serde(default, deserialize_with = "loose_string")]
    pub rejection_reason: Option<String>,
    /// Why the data is needed
    #[serde(default, deserialize_with = "loose_string")]
    pub purpose: Option<String>,
    /// How the data will be used
    #[serde(default, deserialize_with = "loose_string")]
    pub methodology: Option<String>,
    /// Referenced sources
    #[serde(default, deserialize_with = "string_list")]
    pub data_sources: Vec<String>,
    /// Requested data types
    #[serde(default, deserialize_with = "string_list")]
    pub parameters: Vec<String>,
    /// Range start
    #[serde(default)]
    pub start_date: Option<Value>,
    /// Range end
    #[serde(default)]
    pub end_date: Option<Value>,
}

impl SourceRecord for SecondaryRequestRecord {
    const SOURCE: DataSource = DataSource::Secondary;

    const KEYS: &'static [KeyGroup] = &[
        ("rejectionReason", &["rejection_reason"]),
        ("dataSources", &["data_sources", "sources"]),
        ("parameters", &["dataTypes", "data_types"]),
        ("startDate", &["start_date", "fromDate", "from_date"]),
        ("endDate", &["end_date", "toDate", "to_date"]),
    ];

    fn into_request(self) -> Result<Request> {
        let mut request =
            base_request(Self::SOURCE, self.id, self.submitter, self.status.as_deref())?;
        request.remarks = pick_remarks(self.rejection_reason, self.remarks);
        request.purpose = non_empty(self.purpose);
        request.methodology = non_empty(self.methodology);
        request.data_sources = self.data_sources;
        request.parameters = self.parameters;
        request.period = build_period(self.start_date.as_ref(), self.end_date.as_ref(), None);
        Ok(request)
    }
}

/// Normalize a list response from `source` into requests
///
/// Records that fail to decode or lack a usable id are skipped with a
/// warning; the rest of the list is kept.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the body is not a recognizable list envelope.
pub fn normalize_records(source: DataSource, body: Value) -> Result<Vec<Request>> {
    let items = unwrap_envelope(body).ok_or_else(|| Error::Decode {
        data_source: source,
        message: "expected a JSON array or an object with data/requests/results".to_string(),
    })?;

    let requests = match source {
        DataSource::Station => decode_all::<StationRequestRecord>(items),
        DataSource::Historical => decode_all::<HistoricalRequestRecord>(items),
        DataSource::Secondary => decode_all::<SecondaryRequestRecord>(items),
    };
    Ok(requests)
}

fn unwrap_envelope(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| map.remove(*key))
            .and_then(unwrap_envelope),
        _ => None,
    }
}

fn decode_all<R: SourceRecord>(items: Vec<Value>) -> Vec<Request> {
    let total = items.len();
    let requests: Vec<Request> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let item = fold_keys(fold_keys(item, SUBMITTER_KEYS), R::KEYS);
            let decoded = serde_json::from_value::<R>(item)
                .map_err(Error::from)
                .and_then(SourceRecord::into_request);
            match decoded {
                Ok(request) => Some(request),
                Err(e) => {
                    warn!(source = %R::SOURCE, index, "Skipping {} record: {}", R::SOURCE, e);
                    None
                }
            }
        })
        .collect();

    if requests.len() < total {
        warn!(
            source = %R::SOURCE,
            "Normalized {} of {} records",
            requests.len(),
            total
        );
    }
    requests
}

/// Collapse each key group onto its canonical key
///
/// The first non-blank spelling in priority order wins and the others are
/// dropped, so a record carrying two spellings decodes like one carrying a
/// single spelling.
fn fold_keys(item: Value, groups: &[KeyGroup]) -> Value {
    let Value::Object(mut map) = item else {
        return item;
    };
    for (canonical, alternatives) in groups {
        let candidates: Vec<Value> = std::iter::once(*canonical)
            .chain(alternatives.iter().copied())
            .filter_map(|key| map.remove(key))
            .collect();
        let pick = candidates.iter().position(|v| !is_blank(v)).unwrap_or(0);
        if let Some(value) = candidates.into_iter().nth(pick) {
            map.insert((*canonical).to_string(), value);
        }
    }
    Value::Object(map)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn base_request(
    source: DataSource,
    id: Option<RecordId>,
    submitter: SubmitterFields,
    status: Option<&str>,
) -> Result<Request> {
    let mut request = Request::new(source, RecordId::resolve(id)?);
    request.name = submitter.name.unwrap_or_default();
    request.organization = submitter.organization.unwrap_or_default();
    request.designation = submitter.designation.unwrap_or_default();
    request.email = submitter.email.unwrap_or_default();
    request.mobile = submitter.mobile.unwrap_or_default();
    request.address = submitter.address.unwrap_or_default();
    request.status = RequestStatus::normalize(status);
    request.submit_time = submitter.submit_time.as_ref().and_then(parse_timestamp);
    Ok(request)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn pick_remarks(rejection_reason: Option<String>, remarks: Option<String>) -> Option<String> {
    non_empty(rejection_reason).or_else(|| non_empty(remarks))
}

fn build_period(start: Option<&Value>, end: Option<&Value>, preset: Option<String>) -> RequestPeriod {
    let start = start.and_then(parse_date);
    let end = end.and_then(parse_date);
    if start.is_some() || end.is_some() {
        return RequestPeriod::Range { start, end };
    }
    match non_empty(preset) {
        Some(preset) => RequestPeriod::Preset {
            label: humanize_preset(&preset),
        },
        None => RequestPeriod::Unspecified,
    }
}

/// Turn `last_30_days` into `Last 30 days`
#[must_use]
pub fn humanize_preset(raw: &str) -> String {
    let spaced = canonical_key(raw);
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Parse a backend timestamp
///
/// Accepts RFC 3339, naive `YYYY-MM-DD[ T]HH:MM:SS[.f]` (taken as UTC), bare
/// dates, and epoch milliseconds as a number or numeric string.
#[must_use]
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    raw.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}

/// Parse a backend calendar date, or the date part of a timestamp
#[must_use]
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    if let Value::String(s) = value {
        if let Ok(date) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            return Some(date);
        }
    }
    parse_timestamp(value).map(|ts| ts.date_naive())
}

/// Accept strings, numbers and booleans as text; trims, and maps blank to `None`
fn loose_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| value_to_text(&v)))
}

/// Accept a list as an array of strings/numbers/named objects or as a
/// comma-separated string
fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(list_item_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        Some(other) => value_to_text(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

fn list_item_text(item: &Value) -> Option<String> {
    match item {
        Value::Object(map) => LIST_ITEM_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(value_to_text)),
        other => value_to_text(other),
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Some("Approved"), RequestStatus::Approved)]
    #[case(Some("APPROVED"), RequestStatus::Approved)]
    #[case(Some(" accepted "), RequestStatus::Approved)]
    #[case(Some("granted"), RequestStatus::Approved)]
    #[case(Some("Rejected"), RequestStatus::Rejected)]
    #[case(Some("DECLINED"), RequestStatus::Rejected)]
    #[case(Some("denied"), RequestStatus::Rejected)]
    #[case(Some("pending"), RequestStatus::Pending)]
    #[case(Some("IN_REVIEW"), RequestStatus::Pending)]
    #[case(Some("under-review"), RequestStatus::Pending)]
    #[case(Some("awaiting   approval"), RequestStatus::Pending)]
    #[case(Some("something else"), RequestStatus::Pending)]
    #[case(Some(""), RequestStatus::Pending)]
    #[case(None, RequestStatus::Pending)]
    fn test_status_normalization(#[case] raw: Option<&str>, #[case] expected: RequestStatus) {
        assert_eq!(RequestStatus::normalize(raw), expected);
    }

    #[test]
    fn test_station_record_camel_case() {
        let body = json!([{
            "id": 12,
            "fullName": "Asha Rahman",
            "organization": "Dhaka University",
            "designation": "Lecturer",
            "email": "asha@example.org",
            "phone": 8801700000000_i64,
            "address": "Dhaka",
            "status": "APPROVED",
            "submitTime": "2024-03-05T10:15:00Z",
            "remarks": "  ",
            "selectedStations": [{"stationName": "Dhaka"}, "Sylhet"],
            "selectedParameters": "Rainfall, Max Temperature",
            "dataFormat": ["CSV"],
            "startDate": "2020-01-01",
            "endDate": "2020-12-31"
        }]);

        let requests = normalize_records(DataSource::Station, body).unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        assert_eq!(request.id, 12);
        assert_eq!(request.source, DataSource::Station);
        assert_eq!(request.name, "Asha Rahman");
        assert_eq!(request.mobile, "8801700000000");
        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(request.remarks, None);
        assert_eq!(request.stations, vec!["Dhaka", "Sylhet"]);
        assert_eq!(request.parameters, vec!["Rainfall", "Max Temperature"]);
        assert_eq!(request.formats, vec!["CSV"]);
        assert_eq!(
            request.period,
            RequestPeriod::Range {
                start: NaiveDate::from_ymd_opt(2020, 1, 1),
                end: NaiveDate::from_ymd_opt(2020, 12, 31),
            }
        );
        let submitted = request.submit_time.unwrap();
        assert_eq!((submitted.year(), submitted.month(), submitted.hour()), (2024, 3, 10));
    }

    #[test]
    fn test_station_record_preset_interval() {
        let body = json!({"data": [{
            "id": "5",
            "name": "Karim",
            "status": "pending",
            "timeInterval": "last_30_days"
        }]});

        let requests = normalize_records(DataSource::Station, body).unwrap();
        assert_eq!(requests[0].id, 5);
        assert_eq!(
            requests[0].period,
            RequestPeriod::Preset {
                label: "Last 30 days".to_string()
            }
        );
    }

    #[test]
    fn test_historical_rejection_reason_wins() {
        let body = json!({"requests": [{
            "id": 3,
            "name": "Nadia",
            "status": "REJECTED",
            "remarks": "old note",
            "rejectionReason": "Insufficient justification",
            "created_at": "2023-11-02 08:30:00",
            "stations": "Khulna,Barisal",
            "fromDate": "1990-01-01"
        }]});

        let requests = normalize_records(DataSource::Historical, body).unwrap();
        let request = &requests[0];
        assert_eq!(request.status, RequestStatus::Rejected);
        assert_eq!(request.remarks.as_deref(), Some("Insufficient justification"));
        assert_eq!(request.stations, vec!["Khulna", "Barisal"]);
        assert_eq!(
            request.period,
            RequestPeriod::Range {
                start: NaiveDate::from_ymd_opt(1990, 1, 1),
                end: None,
            }
        );
        assert!(request.submit_time.is_some());
    }

    #[test]
    fn test_secondary_fields_and_nested_envelope() {
        let body = json!({"data": {"results": [{
            "id": 9,
            "name": "Rafiq",
            "status": "Submitted",
            "purpose": "Thesis research",
            "methodology": "Regression",
            "dataSources": [{"name": "ERA5"}, {"label": "CRU TS"}],
            "dataTypes": ["Humidity"],
            "createdAt": 1_700_000_000_000_i64
        }]}});

        let requests = normalize_records(DataSource::Secondary, body).unwrap();
        let request = &requests[0];
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.purpose.as_deref(), Some("Thesis research"));
        assert_eq!(request.methodology.as_deref(), Some("Regression"));
        assert_eq!(request.data_sources, vec!["ERA5", "CRU TS"]);
        assert_eq!(request.parameters, vec!["Humidity"]);
        assert_eq!(request.period, RequestPeriod::Unspecified);
        assert_eq!(request.submit_time.unwrap().year(), 2023);
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let body = json!([
            {"id": 1, "name": "ok"},
            {"id": "abc", "name": "bad id"},
            {"name": "no id"},
            "not an object",
            {"id": 2, "name": "also ok"}
        ]);

        let requests = normalize_records(DataSource::Station, body).unwrap();
        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_repeated_key_spellings_keep_the_record() {
        let body = json!([
            {
                "id": 1,
                "name": "Asha",
                "submitTime": "2024-05-02T10:00:00Z",
                "createdAt": "2020-01-01T00:00:00Z"
            },
            {"id": 2, "name": "B", "fullName": "B Full"},
            {"id": 3, "name": "  ", "full_name": "Karim Hossain", "phone": "017", "mobile": ""}
        ]);

        let requests = normalize_records(DataSource::Station, body).unwrap();
        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(requests[0].submit_time.unwrap().year(), 2024);
        assert_eq!(requests[1].name, "B");
        assert_eq!(requests[2].name, "Karim Hossain");
        assert_eq!(requests[2].mobile, "017");
    }

    #[test]
    fn test_repeated_range_spellings_on_historical() {
        let body = json!([{
            "id": 4,
            "fromDate": "2001-01-01",
            "startDate": "1999-01-01",
            "stations": [],
            "selectedStations": ["Sylhet"],
            "rejection_reason": "Late",
            "rejectionReason": ""
        }]);

        let requests = normalize_records(DataSource::Historical, body).unwrap();
        let request = &requests[0];
        assert_eq!(
            request.period,
            RequestPeriod::Range {
                start: NaiveDate::from_ymd_opt(2001, 1, 1),
                end: None,
            }
        );
        assert_eq!(request.stations, vec!["Sylhet"]);
        assert_eq!(request.remarks.as_deref(), Some("Late"));
    }

    #[test]
    fn test_unrecognized_envelope_is_decode_error() {
        let result = normalize_records(DataSource::Historical, json!({"message": "hello"}));
        assert!(matches!(
            result,
            Err(Error::Decode {
                data_source: DataSource::Historical,
                ..
            })
        ));
        assert!(normalize_records(DataSource::Station, json!("text")).is_err());
    }

    #[rstest]
    #[case(json!("2024-01-02T03:04:05+06:00"), Some((2024, 1, 1, 21)))]
    #[case(json!("2024-01-02 03:04:05"), Some((2024, 1, 2, 3)))]
    #[case(json!("2024-01-02T03:04:05.123"), Some((2024, 1, 2, 3)))]
    #[case(json!("2024-01-02"), Some((2024, 1, 2, 0)))]
    #[case(json!("1704164645000"), Some((2024, 1, 2, 3)))]
    #[case(json!("yesterday"), None)]
    #[case(json!(""), None)]
    #[case(json!(null), None)]
    fn test_parse_timestamp(#[case] value: Value, #[case] expected: Option<(i32, u32, u32, u32)>) {
        let parsed = parse_timestamp(&value).map(|t| (t.year(), t.month(), t.day(), t.hour()));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_humanize_preset() {
        assert_eq!(humanize_preset("last_30_days"), "Last 30 days");
        assert_eq!(humanize_preset("LAST-YEAR"), "Last year");
        assert_eq!(humanize_preset(""), "");
    }
}

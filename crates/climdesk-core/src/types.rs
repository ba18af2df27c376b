//! Core data types for the request dashboard

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Backend system a request was submitted through
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Weather station observation data requests
    Station,
    /// Historical climate data requests
    Historical,
    /// Secondary-source data requests
    Secondary,
}

impl DataSource {
    /// All sources in tab order
    pub const ALL: [Self; 3] = [Self::Station, Self::Historical, Self::Secondary];

    /// URL and config slug
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Station => "station",
            Self::Historical => "historical",
            Self::Secondary => "secondary",
        }
    }

    /// Human readable tab title
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Station => "Weather Station Data",
            Self::Historical => "Historical Climate Data",
            Self::Secondary => "Secondary Source Data",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for DataSource {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "station" | "weather-station" | "weather_station" => Ok(Self::Station),
            "historical" | "historical-climate" => Ok(Self::Historical),
            "secondary" | "secondary-source" => Ok(Self::Secondary),
            other => Err(crate::Error::Validation {
                field: "source".to_string(),
                message: format!("unknown data source '{other}'"),
            }),
        }
    }
}

/// Canonical lifecycle state of a request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum RequestStatus {
    /// Awaiting an operator decision
    #[default]
    Pending,
    /// Approved by an operator
    Approved,
    /// Rejected by an operator
    Rejected,
}

impl RequestStatus {
    /// All statuses in display order
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Canonical title-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse of a canonical name, ignoring case
///
/// Backend values go through [`RequestStatus::normalize`] instead.
impl std::str::FromStr for RequestStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::Validation {
                field: "status".to_string(),
                message: format!("unknown status '{s}'"),
            })
    }
}

/// Requested time span of the data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestPeriod {
    /// Explicit calendar range; either end may be open
    Range {
        /// First day requested
        start: Option<NaiveDate>,
        /// Last day requested
        end: Option<NaiveDate>,
    },
    /// Named interval such as "Last 30 days"
    Preset {
        /// Humanized interval name
        label: String,
    },
    /// Submitter gave no period
    #[default]
    Unspecified,
}

impl RequestPeriod {
    /// Render the period for humans
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Range { start, end } => {
                let fmt = |d: &Option<NaiveDate>| {
                    d.map_or_else(|| "open".to_string(), |d| d.format("%Y-%m-%d").to_string())
                };
                format!("{} to {}", fmt(start), fmt(end))
            }
            Self::Preset { label } => label.clone(),
            Self::Unspecified => "Not specified".to_string(),
        }
    }
}

/// A data-access request, normalized across all three backends
///
/// Fields that a source never populates stay empty; the secondary-only
/// fields (`purpose`, `methodology`, `data_sources`) are only filled for
/// [`DataSource::Secondary`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Identifier assigned by the owning backend
    pub id: i64,
    /// Backend the request belongs to
    pub source: DataSource,

    /// Submitter name
    pub name: String,
    /// Submitter organization
    pub organization: String,
    /// Submitter job title
    pub designation: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub mobile: String,
    /// Postal address
    pub address: String,

    /// Normalized lifecycle state
    pub status: RequestStatus,
    /// When the request was submitted
    pub submit_time: Option<DateTime<Utc>>,
    /// Operator remarks or rejection reason
    pub remarks: Option<String>,

    /// Stations selected by the submitter
    pub stations: Vec<String>,
    /// Parameters selected by the submitter
    pub parameters: Vec<String>,
    /// Delivery formats selected by the submitter
    pub formats: Vec<String>,
    /// Requested time span
    pub period: RequestPeriod,

    /// Stated purpose (secondary only)
    pub purpose: Option<String>,
    /// Stated methodology (secondary only)
    pub methodology: Option<String>,
    /// Referenced data sources (secondary only)
    pub data_sources: Vec<String>,
}

impl Request {
    /// Create an empty pending request with the given identity
    #[must_use]
    pub fn new(source: DataSource, id: i64) -> Self {
        Self {
            id,
            source,
            name: String::new(),
            organization: String::new(),
            designation: String::new(),
            email: String::new(),
            mobile: String::new(),
            address: String::new(),
            status: RequestStatus::Pending,
            submit_time: None,
            remarks: None,
            stations: Vec::new(),
            parameters: Vec::new(),
            formats: Vec::new(),
            period: RequestPeriod::Unspecified,
            purpose: None,
            methodology: None,
            data_sources: Vec::new(),
        }
    }

    /// Whether the request still awaits a decision
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Operator action on a pending request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Grant access
    Approve,
    /// Refuse access; requires remarks
    Reject,
}

impl Decision {
    /// Status the request moves to
    #[must_use]
    pub const fn target_status(self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }

    /// Lowercase verb used in URLs and forms
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    /// Decision that leads to `status`, if any
    #[must_use]
    pub const fn for_status(status: RequestStatus) -> Option<Self> {
        match status {
            RequestStatus::Approved => Some(Self::Approve),
            RequestStatus::Rejected => Some(Self::Reject),
            RequestStatus::Pending => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Decision {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" | "approved" => Ok(Self::Approve),
            "reject" | "rejected" => Ok(Self::Reject),
            other => Err(crate::Error::Validation {
                field: "action".to_string(),
                message: format!("unknown action '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_source_slug_round_trip() {
        for source in DataSource::ALL {
            assert_eq!(source.slug().parse::<DataSource>().unwrap(), source);
        }
        assert!("satellite".parse::<DataSource>().is_err());
    }

    #[test]
    fn test_data_source_serde_uses_slug() {
        let json = serde_json::to_string(&DataSource::Historical).unwrap();
        assert_eq!(json, "\"historical\"");
    }

    #[test]
    fn test_status_serializes_title_case() {
        let json = serde_json::to_string(&RequestStatus::Approved).unwrap();
        assert_eq!(json, "\"Approved\"");
        assert_eq!(RequestStatus::default(), RequestStatus::Pending);
    }

    #[test]
    fn test_status_from_str_is_strict() {
        assert_eq!("approved".parse::<RequestStatus>().unwrap(), RequestStatus::Approved);
        assert_eq!(" PENDING ".parse::<RequestStatus>().unwrap(), RequestStatus::Pending);
        assert!("declined".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_period_describe() {
        let range = RequestPeriod::Range {
            start: NaiveDate::from_ymd_opt(2020, 1, 1),
            end: None,
        };
        assert_eq!(range.describe(), "2020-01-01 to open");

        let preset = RequestPeriod::Preset {
            label: "Last 30 days".to_string(),
        };
        assert_eq!(preset.describe(), "Last 30 days");
        assert_eq!(RequestPeriod::Unspecified.describe(), "Not specified");
    }

    #[test]
    fn test_decision_parsing_and_target() {
        assert_eq!("Approve".parse::<Decision>().unwrap(), Decision::Approve);
        assert_eq!("rejected".parse::<Decision>().unwrap(), Decision::Reject);
        assert!("escalate".parse::<Decision>().is_err());
        assert_eq!(Decision::Reject.target_status(), RequestStatus::Rejected);
        assert_eq!(Decision::for_status(RequestStatus::Pending), None);
    }

    #[test]
    fn test_new_request_is_pending() {
        let request = Request::new(DataSource::Station, 7);
        assert!(request.is_pending());
        assert_eq!(request.period, RequestPeriod::Unspecified);
    }
}

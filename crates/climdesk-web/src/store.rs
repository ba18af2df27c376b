//! In-memory request snapshots, one per data source

use crate::api_client::RequestBackend;
use chrono::{DateTime, Utc};
use climdesk_core::query::sort_newest_first;
use climdesk_core::{DataSource, Decision, Error, Request, Result, StatusCounts};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// The list of requests last fetched from one backend
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Backend the requests came from
    pub source: DataSource,
    /// Requests sorted newest first
    pub requests: Vec<Request>,
    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot, sorting `requests` newest first
    #[must_use]
    pub fn new(source: DataSource, mut requests: Vec<Request>) -> Self {
        sort_newest_first(&mut requests);
        Self {
            source,
            requests,
            fetched_at: Utc::now(),
        }
    }

    /// Look up a request by id
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Copy with the request of the same id replaced by `request`
    #[must_use]
    pub fn with_request(&self, request: Request) -> Self {
        let mut requests = self.requests.clone();
        match requests.iter_mut().find(|r| r.id == request.id) {
            Some(slot) => *slot = request,
            None => requests.push(request),
        }
        Self {
            fetched_at: self.fetched_at,
            ..Self::new(self.source, requests)
        }
    }

    /// Status counts over every request in the snapshot
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_requests(&self.requests)
    }
}

/// Holds the current snapshot for each source
///
/// Snapshots are immutable; every change swaps in a new one.
#[derive(Debug, Default)]
pub struct RequestStore {
    snapshots: DashMap<DataSource, Arc<Snapshot>>,
}

impl RequestStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `source` and replace its snapshot
    ///
    /// # Errors
    ///
    /// Returns the backend error; the previous snapshot is kept in that case.
    pub async fn refresh(&self, backend: &dyn RequestBackend, source: DataSource) -> Result<Arc<Snapshot>> {
        let requests = backend.fetch_requests(source).await?;
        let snapshot = Arc::new(Snapshot::new(source, requests));
        self.snapshots.insert(source, Arc::clone(&snapshot));
        info!(
            source = %source,
            count = snapshot.requests.len(),
            "Replaced request snapshot"
        );
        Ok(snapshot)
    }

    /// Current snapshot for `source`, if one has been fetched
    #[must_use]
    pub fn snapshot(&self, source: DataSource) -> Option<Arc<Snapshot>> {
        self.snapshots.get(&source).map(|entry| Arc::clone(entry.value()))
    }

    /// Current snapshot for `source`, fetching it first if missing
    ///
    /// # Errors
    ///
    /// Returns the backend error when a fetch was needed and failed.
    pub async fn ensure(&self, backend: &dyn RequestBackend, source: DataSource) -> Result<Arc<Snapshot>> {
        match self.snapshot(source) {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh(backend, source).await,
        }
    }

    /// Look up a request in the current snapshot
    #[must_use]
    pub fn find(&self, source: DataSource, id: i64) -> Option<Request> {
        self.snapshot(source)
            .and_then(|snapshot| snapshot.find(id).cloned())
    }

    /// Apply an operator decision and return the updated request
    ///
    /// Rejections need a non-blank remark. Only pending requests can be
    /// decided. After the backend accepts the change the source is
    /// re-fetched. If that re-fetch fails the decision still stands: the
    /// stored snapshot gets the decided record so it cannot be decided twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a missing rejection remark or a
    /// request that is no longer pending, [`Error::NotFound`] for an unknown
    /// id, and any backend error.
    pub async fn decide(
        &self,
        backend: &dyn RequestBackend,
        source: DataSource,
        id: i64,
        decision: Decision,
        remarks: Option<&str>,
    ) -> Result<Request> {
        let remarks = remarks.map(str::trim).filter(|r| !r.is_empty());
        if decision == Decision::Reject && remarks.is_none() {
            return Err(Error::validation(
                "remarks",
                "a reason is required to reject a request",
            ));
        }

        let snapshot = self.ensure(backend, source).await?;
        let current = snapshot.find(id).ok_or(Error::NotFound {
            data_source: source,
            id,
        })?;
        if !current.is_pending() {
            return Err(Error::validation(
                "status",
                format!("request {id} is already {}", current.status),
            ));
        }

        let target = decision.target_status();
        backend.update_status(source, id, target, remarks).await?;
        info!(source = %source, id, decision = %decision, "Decision recorded");

        let mut decided = current.clone();
        decided.status = target;
        if let Some(remarks) = remarks {
            decided.remarks = Some(remarks.to_string());
        }

        match self.refresh(backend, source).await {
            Ok(refreshed) => {
                if let Some(request) = refreshed.find(id) {
                    return Ok(request.clone());
                }
                warn!(source = %source, id, "Decided request missing after refresh");
            }
            Err(e) => {
                warn!(
                    source = %source,
                    id,
                    "Refresh after decision failed, keeping decided record: {}",
                    e
                );
                let base = self.snapshot(source).unwrap_or(snapshot);
                self.snapshots
                    .insert(source, Arc::new(base.with_request(decided.clone())));
            }
        }
        Ok(decided)
    }
}

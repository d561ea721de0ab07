//! In-memory review-request store.
//!
//! The canonical backing store for tests and for embedders that poll a forge
//! into memory before running decision cycles. Mutations go through the same
//! `ReviewRequestStore` seam real forge clients implement.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::check::CheckRecord;
use crate::request::{RequestId, ReviewRequestSnapshot, RevisionHash};
use crate::store::{ForgeError, IssueDirectory, IssueSummary, ReviewRequestStore};

#[derive(Debug, Default)]
struct StoreState {
    requests: BTreeMap<RequestId, ReviewRequestSnapshot>,
    // Keyed by (request, revision hex), then by check name.
    checks: BTreeMap<(RequestId, String), BTreeMap<String, CheckRecord>>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a review request.
    pub fn put_request(&self, snapshot: ReviewRequestSnapshot) {
        let mut state = self.lock();
        state.requests.insert(snapshot.id.clone(), snapshot);
    }

    /// Record the state of a named check for one revision.
    pub fn put_check(
        &self,
        id: &RequestId,
        revision: &RevisionHash,
        check_name: &str,
        record: CheckRecord,
    ) {
        let mut state = self.lock();
        state
            .checks
            .entry((id.clone(), revision.hex().to_string()))
            .or_default()
            .insert(check_name.to_string(), record);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReviewRequestStore for InMemoryStore {
    fn fetch(&self, id: &RequestId) -> Result<ReviewRequestSnapshot, ForgeError> {
        self.lock()
            .requests
            .get(id)
            .cloned()
            .ok_or_else(|| ForgeError::MissingRequest(id.clone()))
    }

    fn update_title(&self, id: &RequestId, title: &str) -> Result<(), ForgeError> {
        let mut state = self.lock();
        let request = state
            .requests
            .get_mut(id)
            .ok_or_else(|| ForgeError::MissingRequest(id.clone()))?;
        request.title = title.to_string();
        Ok(())
    }

    fn check_results(
        &self,
        id: &RequestId,
        revision: &RevisionHash,
    ) -> Result<BTreeMap<String, CheckRecord>, ForgeError> {
        Ok(self
            .lock()
            .checks
            .get(&(id.clone(), revision.hex().to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// In-memory issue directory keyed by numeric issue id.
#[derive(Debug, Default)]
pub struct InMemoryIssueDirectory {
    issues: BTreeMap<String, IssueSummary>,
}

impl InMemoryIssueDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        self.issues.insert(
            id.clone(),
            IssueSummary {
                id,
                title: title.into(),
            },
        );
        self
    }
}

impl IssueDirectory for InMemoryIssueDirectory {
    fn lookup(&self, issue_id: &str) -> Result<Option<IssueSummary>, ForgeError> {
        Ok(self.issues.get(issue_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{RequestId, RevisionHash};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn snapshot(id: &str, title: &str) -> ReviewRequestSnapshot {
        ReviewRequestSnapshot {
            id: RequestId::new(id),
            title: title.to_string(),
            body: String::new(),
            head_revision: RevisionHash::new("cafe"),
            is_draft: false,
            comments: Vec::new(),
            reviews: Vec::new(),
            labels: BTreeSet::new(),
        }
    }

    #[test]
    fn fetch_returns_missing_request_for_unknown_id() {
        let store = InMemoryStore::new();
        let err = store
            .fetch(&RequestId::new("7"))
            .expect_err("unknown request should miss");
        assert!(matches!(err, ForgeError::MissingRequest(id) if id.as_str() == "7"));
    }

    #[test]
    fn update_title_is_visible_to_later_fetches() {
        let store = InMemoryStore::new();
        store.put_request(snapshot("7", "1234"));

        store
            .update_title(&RequestId::new("7"), "1234: Fix bug")
            .expect("title update should succeed");

        let fetched = store.fetch(&RequestId::new("7")).expect("request exists");
        assert_eq!(fetched.title, "1234: Fix bug");
    }

    #[test]
    fn check_results_are_scoped_to_revision() {
        let store = InMemoryStore::new();
        store.put_request(snapshot("7", "1234"));
        let started = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("fixed time");
        store.put_check(
            &RequestId::new("7"),
            &RevisionHash::new("cafe"),
            "revet",
            CheckRecord::running(started),
        );

        let same = store
            .check_results(&RequestId::new("7"), &RevisionHash::new("cafe"))
            .expect("check results should load");
        assert!(same.contains_key("revet"));

        let other = store
            .check_results(&RequestId::new("7"), &RevisionHash::new("beef"))
            .expect("check results should load");
        assert!(other.is_empty());
    }
}

//! Capability seams over externally-hosted review state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::check::CheckRecord;
use crate::request::{RequestId, ReviewRequestSnapshot, RevisionHash};

#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error("review request not found: {0}")]
    MissingRequest(RequestId),

    #[error("forge backend error: {0}")]
    Backend(String),

    #[error("i/o error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read/write capability over review requests hosted on a forge.
///
/// Every mutation and re-read a scheduling cycle performs goes through this
/// seam, so the component contract shows all the points where external state
/// is touched.
pub trait ReviewRequestStore {
    /// Capture the current state of a review request.
    fn fetch(&self, id: &RequestId) -> Result<ReviewRequestSnapshot, ForgeError>;

    /// Replace the title of a review request.
    fn update_title(&self, id: &RequestId, title: &str) -> Result<(), ForgeError>;

    /// Check records for one revision of a request, keyed by check name.
    fn check_results(
        &self,
        id: &RequestId,
        revision: &RevisionHash,
    ) -> Result<BTreeMap<String, CheckRecord>, ForgeError>;
}

/// A tracked issue as the issue tracker reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: String,
    pub title: String,
}

/// Issue-tracker directory used to derive canonical titles.
pub trait IssueDirectory {
    /// Look up a tracked issue by its numeric id. A miss is not an error.
    fn lookup(&self, issue_id: &str) -> Result<Option<IssueSummary>, ForgeError>;
}

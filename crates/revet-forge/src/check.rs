//! Stored check results: the per-revision record the validity decision reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one named check against one revision of a review request.
///
/// Created when a check run begins; `completed_at` and the metadata slot are
/// filled in when it finishes. A new head revision supersedes the record
/// under a fresh key. Records are never deleted from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRecord {
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Opaque metadata slot attached to the result by the check runner.
    /// Round-trips exact byte content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

impl CheckRecord {
    /// A run that has started and not yet finished.
    pub fn running(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            completed_at: None,
            metadata: None,
        }
    }

    /// A finished run, optionally carrying metadata.
    pub fn completed(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        metadata: Option<String>,
    ) -> Self {
        Self {
            started_at,
            completed_at: Some(completed_at),
            metadata,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

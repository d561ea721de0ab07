//! Review-request snapshot types: the immutable view one poll cycle works on.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Forge-assigned identifier of a review request.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Forge-assigned identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Commit hash of a revision under review, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RevisionHash(pub String);

impl RevisionHash {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review verdict as reported by the forge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    Approved,
    Disapproved,
    None,
}

/// One review cast on a review request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub reviewer: UserId,
    pub verdict: ReviewVerdict,
    /// The revision the verdict was cast against.
    pub revision: RevisionHash,
}

/// One comment on a review request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: UserId,
    pub body: String,
}

/// Immutable view of a review request captured by one poll cycle.
///
/// Comments and reviews are in the order the forge reported them
/// (chronological, oldest first). Downstream fingerprinting relies on that
/// order for comments; reviews and labels are normalized there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequestSnapshot {
    pub id: RequestId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub head_revision: RevisionHash,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
}

impl ReviewRequestSnapshot {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

/// Reduce a chronological review list to the active subset: one entry per
/// reviewer, the most recent verdict winning. The result is ordered by
/// reviewer id so callers see a deterministic list.
pub fn filter_active_reviews(reviews: &[Review]) -> Vec<Review> {
    let mut latest: BTreeMap<&UserId, &Review> = BTreeMap::new();
    for review in reviews {
        latest.insert(&review.reviewer, review);
    }
    latest.into_values().cloned().collect()
}

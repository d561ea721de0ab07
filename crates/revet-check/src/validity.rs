//! Validity decision over the stored check record.

use chrono::{DateTime, Duration, Utc};
use revet_forge::CheckRecord;

use crate::fingerprint::Fingerprint;

/// How long a running check may go without completing before it is
/// presumed crashed.
pub const DEFAULT_STALE_AFTER_MINUTES: i64 = 10;

/// Why the stored result still covers the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreshReason {
    /// Another run started recently and is presumably still going.
    RunInProgress { running_for: Duration },
    /// The last completed run covered an identical fingerprint.
    Unchanged,
}

/// Why the check must run again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecheckReason {
    /// No record exists for this revision.
    NeverChecked,
    /// A completed record carries no fingerprint to compare against.
    MissingFingerprint,
    /// The stored fingerprint differs from the current one.
    FingerprintChanged { previous: String },
}

/// Verdict over the stored check result for the current head revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckVerdict {
    /// Valid, skip execution.
    Fresh(FreshReason),
    /// A run started but never finished within the staleness threshold;
    /// presumed abandoned, run again. Worth a warning, not an error.
    StaleResume { running_for: Duration },
    /// The state changed since the last completed run, or none exists.
    Recheck(RecheckReason),
}

impl CheckVerdict {
    /// Whether the cycle must execute the check.
    pub fn requires_run(&self) -> bool {
        !matches!(self, CheckVerdict::Fresh(_))
    }
}

/// Decide whether the stored record still covers `current`.
///
/// Pure function of `(record, current, now, stale_after)`; does not mutate
/// the record. The record must belong to the request's current head
/// revision; fingerprints are never compared across revisions.
pub fn evaluate(
    record: Option<&CheckRecord>,
    current: &Fingerprint,
    now: DateTime<Utc>,
    stale_after: Duration,
) -> CheckVerdict {
    let Some(record) = record else {
        return CheckVerdict::Recheck(RecheckReason::NeverChecked);
    };

    if !record.is_completed() {
        let running_for = now - record.started_at;
        if running_for > stale_after {
            return CheckVerdict::StaleResume { running_for };
        }
        return CheckVerdict::Fresh(FreshReason::RunInProgress { running_for });
    }

    match record.metadata.as_deref() {
        Some(stored) if stored == current.as_str() => CheckVerdict::Fresh(FreshReason::Unchanged),
        Some(stored) => CheckVerdict::Recheck(RecheckReason::FingerprintChanged {
            previous: stored.to_string(),
        }),
        None => CheckVerdict::Recheck(RecheckReason::MissingFingerprint),
    }
}

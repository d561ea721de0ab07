//! The check scheduling cycle: decide whether the check must run, act on
//! the decision, and enqueue follow-up work for the outer queue.

use chrono::{DateTime, Utc};
use revet_census::{CensusError, CensusSource};
use revet_forge::{
    ForgeError, IssueDirectory, RequestId, ReviewRequestSnapshot, ReviewRequestStore,
    filter_active_reviews,
};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::CheckConfig;
use crate::fingerprint::Fingerprint;
use crate::run::{CheckExecutionError, CheckExecutor, CheckRunContext, CodeMaterializer};
use crate::title::{TitleOutcome, normalize_title};
use crate::validity::{CheckVerdict, FreshReason, RecheckReason, evaluate};

/// Label marking a review request whose change already landed. An
/// integrated request is never checked again.
pub const INTEGRATED_LABEL: &str = "integrated";

/// A unit of deferred work, identified by its review request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    /// A fresh check cycle: the same kind of work as the one that
    /// produced it (re-dispatch).
    Check(RequestId),
    /// The distinct post-check command handler.
    Commands(RequestId),
}

/// What the cycle decided, consumed by the outer scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleDecision {
    /// Integrated request: nothing to do, no successors.
    Skip,
    /// The title was rewritten; the same work item runs again so the next
    /// cycle fingerprints against the corrected title.
    Redispatch,
    /// The decision ran its course: the check executed, or the stored
    /// result was still fresh and execution was skipped.
    Execute { ran_check: bool },
}

/// Outcome of one scheduling cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub decision: CycleDecision,
    /// Successor work items for the outer queue.
    pub successors: Vec<WorkItem>,
    /// The request state re-fetched after the decision ran its course.
    /// Absent when the cycle terminated early (skip or re-dispatch).
    pub refreshed: Option<ReviewRequestSnapshot>,
}

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Forge(#[from] ForgeError),

    #[error(transparent)]
    Census(#[from] CensusError),

    #[error(transparent)]
    Execution(#[from] CheckExecutionError),
}

/// External collaborators one cycle runs against.
pub struct CycleDeps<'a> {
    pub store: &'a dyn ReviewRequestStore,
    pub issues: Option<&'a dyn IssueDirectory>,
    pub census: &'a dyn CensusSource,
    pub materializer: &'a dyn CodeMaterializer,
    pub executor: &'a dyn CheckExecutor,
}

/// One schedulable check work item.
///
/// The outer queue is expected to serialize cycles for the same request;
/// two concurrent cycles for one revision can both decide to run the check,
/// which is accepted as a rare idempotent-cost race rather than prevented
/// by locking.
#[derive(Debug, Clone)]
pub struct CheckWorkItem {
    request: RequestId,
    config: CheckConfig,
}

impl CheckWorkItem {
    pub fn new(request: RequestId, config: CheckConfig) -> Self {
        Self { request, config }
    }

    pub fn request(&self) -> &RequestId {
        &self.request
    }

    /// Run one scheduling cycle.
    ///
    /// `scratch` is scoped to this cycle: census data is resolved under
    /// `<scratch>/census` and the code under review materialized under
    /// `<scratch>/check/<request-id>`. The caller owns cleanup after the
    /// cycle returns. `now` is the wall clock the staleness decision is
    /// evaluated at.
    pub fn run(
        &self,
        deps: &CycleDeps<'_>,
        scratch: &Path,
        now: DateTime<Utc>,
    ) -> Result<CycleReport, CycleError> {
        let request = deps.store.fetch(&self.request)?;
        let census = deps.census.resolve(&scratch.join("census"))?;

        let active_reviews = filter_active_reviews(&request.reviews);
        let fingerprint = Fingerprint::compute(
            &census,
            &request.title,
            &request.body,
            &request.comments,
            &active_reviews,
            &request.labels,
            request.is_draft,
        );

        let records = deps
            .store
            .check_results(&self.request, &request.head_revision)?;
        let verdict = evaluate(
            records.get(self.config.check_name.as_str()),
            &fingerprint,
            now,
            self.config.stale_after(),
        );
        self.observe(&verdict, &fingerprint);

        // An already-integrated request is never checked again, whatever
        // the verdict says.
        if request.has_label(INTEGRATED_LABEL) {
            info!(request = %self.request, "skipping check of integrated request");
            return Ok(CycleReport {
                decision: CycleDecision::Skip,
                successors: Vec::new(),
                refreshed: None,
            });
        }

        let ran_check = if verdict.requires_run() {
            // A corrected title invalidates the fingerprint just computed;
            // run the whole cycle again instead of checking a stale title.
            let title = normalize_title(deps.store, deps.issues, &self.request, &request.title)?;
            if title == TitleOutcome::Changed {
                return Ok(CycleReport {
                    decision: CycleDecision::Redispatch,
                    successors: vec![WorkItem::Check(self.request.clone())],
                    refreshed: None,
                });
            }

            let checkout = scratch.join("check").join(self.request.as_str());
            let local_repo = deps.materializer.materialize(&request, &checkout)?;
            deps.executor.execute(CheckRunContext {
                request: &request,
                local_repo: &local_repo,
                active_reviews: &active_reviews,
                census: &census,
                fingerprint: &fingerprint,
                ignore_stale_reviews: self.config.ignore_stale_reviews,
            })?;
            true
        } else {
            false
        };

        // State may have moved while the check ran; hand the command
        // handler a fresh view.
        let refreshed = deps.store.fetch(&self.request)?;
        Ok(CycleReport {
            decision: CycleDecision::Execute { ran_check },
            successors: vec![WorkItem::Commands(self.request.clone())],
            refreshed: Some(refreshed),
        })
    }

    fn observe(&self, verdict: &CheckVerdict, current: &Fingerprint) {
        let request = &self.request;
        let check = self.config.check_name.as_str();
        match verdict {
            CheckVerdict::Fresh(FreshReason::RunInProgress { running_for }) => {
                debug!(
                    request = %request,
                    check,
                    minutes = running_for.num_minutes(),
                    "check in progress, not starting another one"
                );
            }
            CheckVerdict::Fresh(FreshReason::Unchanged) => {
                debug!(request = %request, check, "no activity since last check, not checking again");
            }
            CheckVerdict::StaleResume { running_for } => {
                warn!(
                    request = %request,
                    check,
                    minutes = running_for.num_minutes(),
                    "running check exceeded the staleness threshold, checking again"
                );
            }
            CheckVerdict::Recheck(RecheckReason::NeverChecked) => {
                debug!(request = %request, check, "no check recorded for this revision");
            }
            CheckVerdict::Recheck(RecheckReason::MissingFingerprint) => {
                info!(request = %request, check, "completed check carries no fingerprint, checking again");
            }
            CheckVerdict::Recheck(RecheckReason::FingerprintChanged { previous }) => {
                info!(request = %request, check, "request updated after last check, checking again");
                debug!(previous = %previous, current = %current, "fingerprint changed");
            }
        }
    }
}

impl fmt::Display for CheckWorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CheckWorkItem@{}", self.request)
    }
}

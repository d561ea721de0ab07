//! Execution seams: materializing the code under review and running the
//! check itself. Both are expensive external collaborators; this crate only
//! decides when they run.

use revet_census::CensusContext;
use revet_forge::{ForgeError, Review, ReviewRequestSnapshot};
use std::path::{Path, PathBuf};

use crate::fingerprint::Fingerprint;

/// Materializes the code under review into the cycle's scratch area.
pub trait CodeMaterializer {
    /// Returns the path of the materialized local repository.
    ///
    /// I/O failures here are unrecoverable for the cycle; the outer
    /// scheduler's retry policy governs resubmission.
    fn materialize(
        &self,
        request: &ReviewRequestSnapshot,
        dest: &Path,
    ) -> Result<PathBuf, ForgeError>;
}

/// Everything one check run receives from the cycle that scheduled it.
///
/// The snapshot carries the full comment, review, and label state; the
/// active reviews are the deduplicated subset the fingerprint was computed
/// over. The fingerprint is handed along so the runner can persist it into
/// the check's metadata slot when the run completes.
pub struct CheckRunContext<'a> {
    pub request: &'a ReviewRequestSnapshot,
    pub local_repo: &'a Path,
    pub active_reviews: &'a [Review],
    pub census: &'a CensusContext,
    pub fingerprint: &'a Fingerprint,
    /// Disregard approvals cast against superseded revisions.
    pub ignore_stale_reviews: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckExecutionError {
    #[error("check execution failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Forge(#[from] ForgeError),
}

/// Runs the project's validation rules against a materialized revision.
///
/// Implementations create the check record when the run starts and fill in
/// the completion time and metadata slot when it finishes; this crate reads
/// those records on the next cycle.
pub trait CheckExecutor {
    fn execute(&self, ctx: CheckRunContext<'_>) -> Result<(), CheckExecutionError>;
}

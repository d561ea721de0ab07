//! Census resolution seam.

use revet_forge::UserId;
use std::path::Path;

use crate::roles::CensusSnapshot;

/// The role-resolution context one scheduling cycle runs under.
///
/// Carries the census view plus the bot's own service identity. The
/// identity is data here, not a process-global lookup, so comment
/// self-authorship filtering stays a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusContext {
    pub census: CensusSnapshot,
    pub service_identity: UserId,
}

#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    #[error("failed to materialize census data at {path}: {source}")]
    Materialize {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("census backend error: {0}")]
    Backend(String),
}

/// Resolves the organizational-role view for one scheduling cycle.
///
/// Implementations may materialize census data into `scratch` (the cycle's
/// scratch area; the caller owns cleanup after the cycle returns).
pub trait CensusSource {
    fn resolve(&self, scratch: &Path) -> Result<CensusContext, CensusError>;
}

/// A source that hands out a fixed, pre-resolved context.
#[derive(Debug, Clone)]
pub struct FixedCensus {
    context: CensusContext,
}

impl FixedCensus {
    pub fn new(context: CensusContext) -> Self {
        Self { context }
    }
}

impl CensusSource for FixedCensus {
    fn resolve(&self, _scratch: &Path) -> Result<CensusContext, CensusError> {
        Ok(self.context.clone())
    }
}

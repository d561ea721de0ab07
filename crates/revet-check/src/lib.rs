//! # revet-check
//!
//! The staleness core of a review-request bot. The project-specific "check"
//! run is expensive and side-effect-bearing, so it must not run on every
//! poll cycle. It must run again whenever anything semantically relevant
//! changed, and it must recover from runs that crashed or hung.
//!
//! This crate provides:
//! - `Fingerprint`: a deterministic digest over everything that matters to
//!   check validity (title, body, approvals, bot-maintained comment state,
//!   labels, draft flag)
//! - `evaluate`: the validity decision over the stored check record
//! - `normalize_title`: canonical titles derived from tracked issues
//! - `CheckWorkItem`: one scheduling cycle, producing successor work items
//!   for the outer queue
//!
//! Census resolution, code materialization, and the check run itself are
//! trait seams (`CensusSource`, `CodeMaterializer`, `CheckExecutor`);
//! nothing here talks to a forge directly.

pub mod config;
pub mod fingerprint;
pub mod reviewer;
pub mod run;
pub mod title;
pub mod validity;
pub mod workitem;

pub use config::{CheckConfig, ConfigError};
pub use fingerprint::Fingerprint;
pub use reviewer::encode_reviewer;
pub use run::{CheckExecutionError, CheckExecutor, CheckRunContext, CodeMaterializer};
pub use title::{TitleOutcome, normalize_title};
pub use validity::{
    CheckVerdict, DEFAULT_STALE_AFTER_MINUTES, FreshReason, RecheckReason, evaluate,
};
pub use workitem::{
    CheckWorkItem, CycleDecision, CycleDeps, CycleError, CycleReport, INTEGRATED_LABEL, WorkItem,
};

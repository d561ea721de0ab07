//! # revet-forge
//!
//! Forge-facing data model for review-request bots.
//!
//! This crate provides:
//! - snapshot types for review requests, reviews, and comments
//! - `CheckRecord` (per-revision state of a named check, with its opaque
//!   metadata slot)
//! - the `ReviewRequestStore` and `IssueDirectory` capability seams
//! - `InMemoryStore` (canonical in-memory backing store)
//!
//! It intentionally does not talk to any network forge. Real clients
//! implement the store seams; everything above them (`revet-check`) only
//! sees explicit request/response calls, so every mutation point of a
//! scheduling cycle is visible in the trait contract.

pub mod check;
pub mod memory;
pub mod request;
pub mod store;

pub use check::CheckRecord;
pub use memory::{InMemoryIssueDirectory, InMemoryStore};
pub use request::{
    Comment, RequestId, Review, ReviewRequestSnapshot, ReviewVerdict, RevisionHash, UserId,
    filter_active_reviews,
};
pub use store::{ForgeError, IssueDirectory, IssueSummary, ReviewRequestStore};

//! Content fingerprinting for review-request state.
//!
//! The fingerprint reduces everything that can invalidate a check result to
//! one compact digest: title, body, who approved what, the bot-maintained
//! state lines inside its own comments, labels, and the draft flag. Review
//! and label order are normalized away; filtered comment-line order is kept,
//! so callers must supply comments in a stable (chronological) order.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use regex::Regex;
use revet_census::CensusContext;
use revet_forge::{Comment, Review, ReviewVerdict};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use crate::reviewer::encode_reviewer;

// Lines the bot writes into its own comments to track review state.
fn metadata_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            "<!-- (?:(add|remove) (?:contributor|reviewer))|(?:summary: ')|(?:solves: ')|(?:additional required reviewers)",
        )
        .expect("metadata marker regex must compile")
    })
}

/// Deterministic digest over all content relevant to check validity,
/// rendered as URL-safe base64 without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of one review-request state.
    ///
    /// Approvals are the encoded reviewer plus the hex of the approved
    /// revision, sorted lexicographically so review order and duplicate
    /// stale entries cannot move the digest. Comment lines are kept only
    /// from comments authored by the bot's own service identity, filtered
    /// to metadata markers, and concatenated in their original order.
    pub fn compute(
        ctx: &CensusContext,
        title: &str,
        body: &str,
        comments: &[Comment],
        reviews: &[Review],
        labels: &BTreeSet<String>,
        is_draft: bool,
    ) -> Self {
        let mut approvals: Vec<String> = reviews
            .iter()
            .filter(|review| review.verdict == ReviewVerdict::Approved)
            .map(|review| {
                format!(
                    "{}{}",
                    encode_reviewer(ctx, &review.reviewer),
                    review.revision.hex()
                )
            })
            .collect();
        approvals.sort();
        let approvals = approvals.concat();

        let comment_lines: String = comments
            .iter()
            .filter(|comment| comment.author == ctx.service_identity)
            .flat_map(|comment| comment.body.lines())
            .filter(|line| metadata_marker_re().is_match(line))
            .collect();

        let labels: String = labels.iter().map(String::as_str).collect();

        let mut digest = Sha256::new();
        digest.update(title.as_bytes());
        digest.update(body.as_bytes());
        digest.update(approvals.as_bytes());
        digest.update(comment_lines.as_bytes());
        digest.update(labels.as_bytes());
        digest.update([if is_draft { 0u8 } else { 1u8 }]);

        Self(URL_SAFE_NO_PAD.encode(digest.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

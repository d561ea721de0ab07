//! Stable textual encoding of a reviewer's organizational role.

use revet_census::CensusContext;
use revet_forge::UserId;

/// Encode a reviewer as username plus role flags (lead, reviewer,
/// committer, author, in that order) at the context's census version.
///
/// An identity with no namespace entry encodes as `unknown-<id>`: stable
/// and deterministic, but opaque. It flags missing organizational data
/// without failing the run.
pub fn encode_reviewer(ctx: &CensusContext, reviewer: &UserId) -> String {
    match ctx.census.contributor(reviewer) {
        None => format!("unknown-{}", reviewer.as_str()),
        Some(contributor) => {
            let username = contributor.username.as_str();
            let census = &ctx.census;
            format!(
                "{username}{}{}{}{}",
                census.is_lead(username),
                census.is_reviewer(username),
                census.is_committer(username),
                census.is_author(username),
            )
        }
    }
}

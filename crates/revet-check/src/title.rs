//! Canonical titles derived from tracked issues.

use regex::Regex;
use revet_forge::{ForgeError, IssueDirectory, RequestId, ReviewRequestStore};
use std::sync::OnceLock;
use tracing::info;

// Optional alphanumeric project prefix, dash, numeric issue id. Anchored;
// group 1 is the id.
fn issue_reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("^(?:[A-Za-z][A-Za-z0-9]+-)?([0-9]+)$")
            .expect("issue reference regex must compile")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleOutcome {
    Changed,
    Unchanged,
}

/// Rewrite an issue-reference title to `"<id>: <issue title>"`.
///
/// The rewrite happens only when the whole title is an issue reference, an
/// issue directory is configured, and the lookup hits. Anything else,
/// including a lookup miss, is a no-op. A rewrite goes through the store
/// so the corrected title is visible to the next cycle.
pub fn normalize_title(
    store: &dyn ReviewRequestStore,
    issues: Option<&dyn IssueDirectory>,
    request: &RequestId,
    title: &str,
) -> Result<TitleOutcome, ForgeError> {
    let Some(directory) = issues else {
        return Ok(TitleOutcome::Unchanged);
    };
    let Some(captures) = issue_reference_re().captures(title) else {
        return Ok(TitleOutcome::Unchanged);
    };

    let id = &captures[1];
    let Some(issue) = directory.lookup(id)? else {
        return Ok(TitleOutcome::Unchanged);
    };

    let canonical = format!("{id}: {}", issue.title);
    if canonical == title {
        return Ok(TitleOutcome::Unchanged);
    }

    info!(request = %request, title = %canonical, "rewriting issue-reference title");
    store.update_title(request, &canonical)?;
    Ok(TitleOutcome::Changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use revet_forge::{
        InMemoryIssueDirectory, InMemoryStore, RequestId, ReviewRequestSnapshot, RevisionHash,
    };
    use std::collections::BTreeSet;

    fn store_with(title: &str) -> InMemoryStore {
        let store = InMemoryStore::new();
        store.put_request(ReviewRequestSnapshot {
            id: RequestId::new("42"),
            title: title.to_string(),
            body: String::new(),
            head_revision: RevisionHash::new("cafe"),
            is_draft: false,
            comments: Vec::new(),
            reviews: Vec::new(),
            labels: BTreeSet::new(),
        });
        store
    }

    #[test]
    fn bare_issue_id_is_rewritten_from_the_directory() {
        let store = store_with("1234");
        let issues = InMemoryIssueDirectory::new().with_issue("1234", "Fix bug");

        let outcome = normalize_title(&store, Some(&issues), &RequestId::new("42"), "1234")
            .expect("normalization should succeed");

        assert_eq!(outcome, TitleOutcome::Changed);
        let refreshed = store.fetch(&RequestId::new("42")).expect("request exists");
        assert_eq!(refreshed.title, "1234: Fix bug");
    }

    #[test]
    fn prefixed_issue_id_resolves_through_the_numeric_part() {
        let store = store_with("JDK-1234");
        let issues = InMemoryIssueDirectory::new().with_issue("1234", "Fix bug");

        let outcome = normalize_title(&store, Some(&issues), &RequestId::new("42"), "JDK-1234")
            .expect("normalization should succeed");
        assert_eq!(outcome, TitleOutcome::Changed);
        let refreshed = store.fetch(&RequestId::new("42")).expect("request exists");
        assert_eq!(refreshed.title, "1234: Fix bug");
    }

    #[test]
    fn non_reference_title_is_left_alone() {
        let store = store_with("not-an-id");
        let issues = InMemoryIssueDirectory::new().with_issue("1234", "Fix bug");

        let outcome = normalize_title(&store, Some(&issues), &RequestId::new("42"), "not-an-id")
            .expect("normalization should succeed");
        assert_eq!(outcome, TitleOutcome::Unchanged);
    }

    #[test]
    fn lookup_miss_is_a_no_op() {
        let store = store_with("JDK-8");
        let issues = InMemoryIssueDirectory::new();

        let outcome = normalize_title(&store, Some(&issues), &RequestId::new("42"), "JDK-8")
            .expect("normalization should succeed");
        assert_eq!(outcome, TitleOutcome::Unchanged);
        let refreshed = store.fetch(&RequestId::new("42")).expect("request exists");
        assert_eq!(refreshed.title, "JDK-8");
    }

    #[test]
    fn missing_directory_is_a_no_op() {
        let store = store_with("1234");
        let outcome = normalize_title(&store, None, &RequestId::new("42"), "1234")
            .expect("normalization should succeed");
        assert_eq!(outcome, TitleOutcome::Unchanged);
    }

    #[test]
    fn canonical_title_no_longer_matches_the_pattern() {
        // A rewritten title is not an issue reference, so the next cycle
        // leaves it alone instead of looping on rewrites.
        let store = store_with("1234: Fix bug");
        let issues = InMemoryIssueDirectory::new().with_issue("1234", "Fix bug");

        let outcome =
            normalize_title(&store, Some(&issues), &RequestId::new("42"), "1234: Fix bug")
                .expect("normalization should succeed");
        assert_eq!(outcome, TitleOutcome::Unchanged);
    }
}

//! Contributor namespace and role flags at one census version.

use revet_forge::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A person in the census namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub username: String,
}

/// Role flags one contributor holds at a census version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFlags {
    pub lead: bool,
    pub reviewer: bool,
    pub committer: bool,
    pub author: bool,
}

/// Read-only view of the census at one version.
///
/// Maps forge user ids to contributors, and contributor usernames to role
/// flags. All queries are implicitly scoped to `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CensusSnapshot {
    version: String,
    namespace: BTreeMap<UserId, Contributor>,
    roles: BTreeMap<String, RoleFlags>,
}

impl CensusSnapshot {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            namespace: BTreeMap::new(),
            roles: BTreeMap::new(),
        }
    }

    pub fn with_contributor(
        mut self,
        id: impl Into<String>,
        username: impl Into<String>,
        flags: RoleFlags,
    ) -> Self {
        let username = username.into();
        self.namespace.insert(
            UserId::new(id),
            Contributor {
                username: username.clone(),
            },
        );
        self.roles.insert(username, flags);
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Resolve a forge user id to a contributor, if the namespace knows it.
    pub fn contributor(&self, id: &UserId) -> Option<&Contributor> {
        self.namespace.get(id)
    }

    /// Role flags for a username; unknown usernames hold no roles.
    pub fn roles(&self, username: &str) -> RoleFlags {
        self.roles.get(username).copied().unwrap_or_default()
    }

    pub fn is_lead(&self, username: &str) -> bool {
        self.roles(username).lead
    }

    pub fn is_reviewer(&self, username: &str) -> bool {
        self.roles(username).reviewer
    }

    pub fn is_committer(&self, username: &str) -> bool {
        self.roles(username).committer
    }

    pub fn is_author(&self, username: &str) -> bool {
        self.roles(username).author
    }
}

//! The Agent Directory (spec.md §3, §4.4): data only — maps each
//! principal/RA/TimeService name to a network endpoint and the set of
//! protocol roles it plays.
//!
//! Real endpoint resolution and delivery are the out-of-scope transport's
//! job (spec.md §1); `Endpoint` here is the opaque address value the
//! directory hands back, whatever shape the transport wants it in.

use std::collections::{HashMap, HashSet};

use rt_core::AgentName;

use crate::error::{DirectoryError, DirectoryResult};

/// An opaque network address for a participant. The core never interprets
/// this beyond storing and returning it — resolving it into an actual
/// socket is the transport's job.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Endpoint { host: host.into(), port }
    }
}

struct DirectoryEntry {
    endpoint: Endpoint,
    roles: HashSet<String>,
}

/// Name → endpoint and role-set lookup, snapshotted at run start (spec.md
/// §4.4: "later changes come only from watchdog eviction", which this
/// type does not itself model — eviction lives in `rt-timeservice` and
/// only ever shrinks *its own* live-participant set, never this registry).
#[derive(Default)]
pub struct AgentDirectory {
    entries: HashMap<AgentName, DirectoryEntry>,
}

impl AgentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with its endpoint and roles. Re-registering the same
    /// name overwrites the previous entry.
    pub fn register(&mut self, name: AgentName, endpoint: Endpoint, roles: &[&str]) {
        self.entries.insert(
            name,
            DirectoryEntry {
                endpoint,
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
        );
    }

    /// Resolve `name`'s endpoint. Spec.md §4.1, §4.2 treat an unresolved
    /// endpoint at send time as a logged, non-fatal-to-the-round error —
    /// callers should log and continue rather than propagate this as a
    /// hard failure wherever that applies.
    pub fn endpoint_of(&self, name: &AgentName) -> DirectoryResult<&Endpoint> {
        self.entries
            .get(name)
            .map(|e| &e.endpoint)
            .ok_or_else(|| DirectoryError::AgentNotFound(name.clone()))
    }

    pub fn plays_role(&self, name: &AgentName, role: &str) -> bool {
        self.entries.get(name).is_some_and(|e| e.roles.contains(role))
    }

    /// All registered names that play `role`, in a stable (sorted) order so
    /// participant enumeration (spec.md §4.4) is deterministic across runs.
    pub fn names_with_role(&self, role: &str) -> Vec<AgentName> {
        let mut names: Vec<AgentName> = self
            .entries
            .iter()
            .filter(|(_, e)| e.roles.contains(role))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_enumeration_is_sorted_and_filtered() {
        let mut dir = AgentDirectory::new();
        dir.register(AgentName::from("seller"), Endpoint::new("127.0.0.1", 9001), &["Agent"]);
        dir.register(AgentName::from("buyer"), Endpoint::new("127.0.0.1", 9000), &["Agent"]);
        dir.register(AgentName::from("packer_ra_1"), Endpoint::new("127.0.0.1", 9100), &["Agent"]);
        dir.register(AgentName::from("timeservice"), Endpoint::new("127.0.0.1", 9999), &["TimeService"]);

        let agents = dir.names_with_role("Agent");
        assert_eq!(
            agents,
            vec![
                AgentName::from("buyer"),
                AgentName::from("packer_ra_1"),
                AgentName::from("seller"),
            ]
        );
    }

    #[test]
    fn unknown_endpoint_is_an_error() {
        let dir = AgentDirectory::new();
        assert!(dir.endpoint_of(&AgentName::from("nobody")).is_err());
    }
}

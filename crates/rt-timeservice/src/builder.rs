//! Fluent builder for constructing a [`TimeService`].

use std::collections::HashSet;
use std::time::Duration;

use rt_core::AgentName;
use rt_directory::AgentDirectory;

use crate::{TimeService, TimeServiceError, TimeServiceResult};

/// Fluent builder for [`TimeService`].
///
/// Participant discovery follows spec.md §4.4: every agent that plays role
/// `"Agent"` in `directory` is enumerated and snapshotted as a participant;
/// `resource_agents` additionally marks which of those names are RAs, so
/// the service knows how to split its two-phase broadcast (spec.md §4.1
/// step 1) without otherwise distinguishing them.
pub struct TimeServiceBuilder {
    directory: Option<AgentDirectory>,
    resource_agents: HashSet<AgentName>,
    max_rounds: u64,
    round_timeout: Duration,
    round_gap: Duration,
    liveness_warn_after: u64,
}

impl Default for TimeServiceBuilder {
    fn default() -> Self {
        TimeServiceBuilder {
            directory: None,
            resource_agents: HashSet::new(),
            max_rounds: 1000,
            round_timeout: Duration::from_secs(30),
            round_gap: Duration::from_millis(50),
            liveness_warn_after: 5,
        }
    }
}

impl TimeServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, directory: AgentDirectory) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn resource_agent(mut self, name: AgentName) -> Self {
        self.resource_agents.insert(name);
        self
    }

    pub fn max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn round_timeout(mut self, round_timeout: Duration) -> Self {
        self.round_timeout = round_timeout;
        self
    }

    /// Real-time pause between the business and resource-agent broadcast
    /// phases (spec.md §4.1 step 1). Defaults to 50ms.
    pub fn round_gap(mut self, round_gap: Duration) -> Self {
        self.round_gap = round_gap;
        self
    }

    pub fn liveness_warn_after(mut self, rounds: u64) -> Self {
        self.liveness_warn_after = rounds;
        self
    }

    pub fn build(self) -> TimeServiceResult<TimeService> {
        let directory = self
            .directory
            .ok_or_else(|| TimeServiceError::Config("directory is required".to_string()))?;
        let participants = directory.names_with_role("Agent");
        if participants.is_empty() {
            return Err(TimeServiceError::Config(
                "no agents play role \"Agent\" in the directory".to_string(),
            ));
        }
        Ok(TimeService::new(
            participants,
            self.resource_agents,
            self.max_rounds,
            self.round_timeout,
            self.round_gap,
            self.liveness_warn_after,
        ))
    }
}

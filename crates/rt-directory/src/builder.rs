//! Fluent construction of a [`Directory`], in the same builder idiom the
//! rest of this workspace uses for multi-part, validated configuration.

use rt_core::{AgentName, DurationSpec};

use crate::directory::{AgentDirectory, Endpoint};
use crate::error::{DirectoryError, DirectoryResult};
use crate::pool::{PoolStrategy, ResourcePools};
use crate::route::{TaskRoute, TaskRoutingTable};

/// The combined, immutable-after-`build` view of everything a run's
/// participants need to find each other and route work: who exists and
/// what roles they play, which RAs back which `(principal, task_type)`
/// pairs, and which duration a given handler's tasks realize to.
pub struct Directory {
    pub agents: AgentDirectory,
    pub pools: ResourcePools,
    pub routes: TaskRoutingTable,
}

#[derive(Default)]
pub struct DirectoryBuilder {
    agents: AgentDirectory,
    pools: ResourcePools,
    routes: TaskRoutingTable,
}

impl DirectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent(mut self, name: impl Into<String>, endpoint: Endpoint, roles: &[&str]) -> Self {
        self.agents.register(AgentName::from(name.into()), endpoint, roles);
        self
    }

    pub fn pool(
        mut self,
        principal: impl Into<String>,
        task_type: impl Into<String>,
        members: Vec<AgentName>,
        strategy: PoolStrategy,
    ) -> Self {
        self.pools
            .register(AgentName::from(principal.into()), task_type, members, strategy);
        self
    }

    pub fn route(
        mut self,
        handler_name: impl Into<String>,
        task_type: impl Into<String>,
        principal: impl Into<String>,
        duration: DurationSpec,
    ) -> Self {
        self.routes.register(
            handler_name,
            TaskRoute {
                task_type: task_type.into(),
                principal: AgentName::from(principal.into()),
                duration,
            },
        );
        self
    }

    /// Validate and assemble. Currently rejects only a wholly empty
    /// directory — per-pool emptiness is a dispatch-time concern (spec.md
    /// §4.3), not a construction-time one.
    pub fn build(self) -> DirectoryResult<Directory> {
        if self.agents.is_empty() {
            return Err(DirectoryError::Config(
                "directory must register at least one agent".to_string(),
            ));
        }
        Ok(Directory { agents: self.agents, pools: self.pools, routes: self.routes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assembles_a_directory() {
        let dir = DirectoryBuilder::new()
            .agent("seller", Endpoint::new("127.0.0.1", 9001), &["Agent"])
            .agent("ra_1", Endpoint::new("127.0.0.1", 9100), &["Agent"])
            .pool("seller", "pack", vec![AgentName::from("ra_1")], PoolStrategy::RoundRobin)
            .route(
                "pack_order",
                "pack",
                "seller",
                DurationSpec::fixed(2.0).unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(dir.agents.len(), 2);
        assert!(dir.routes.lookup("pack_order").is_ok());
    }

    #[test]
    fn empty_directory_is_rejected() {
        assert!(DirectoryBuilder::new().build().is_err());
    }
}

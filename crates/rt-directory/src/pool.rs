//! Resource pools (spec.md §3, §4.3): for a given `(principal, task_type)`
//! pair, the ordered set of resource agents eligible to run the task, and
//! the strategy used to pick one of them at dispatch time.

use std::collections::HashMap;

use rt_core::{AgentName, RunRng};

use crate::error::{DirectoryError, DirectoryResult};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolStrategy {
    RoundRobin,
    Random,
}

/// One `(principal, task_type)` pool: the member RAs plus a round-robin
/// cursor that persists across calls for the lifetime of the run (spec.md
/// §8 property 7 — fairness requires the cursor to advance monotonically
/// rather than reset per call).
struct Pool {
    members: Vec<AgentName>,
    strategy: PoolStrategy,
    cursor: usize,
}

/// The full table of resource pools for a run, keyed by `(principal,
/// task_type)`.
#[derive(Default)]
pub struct ResourcePools {
    pools: HashMap<(AgentName, String), Pool>,
}

impl ResourcePools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pool. `members` must be non-empty — an empty pool is only
    /// ever surfaced as an error at dispatch time, not at directory
    /// construction, since a handler that never routes to it is harmless.
    pub fn register(
        &mut self,
        principal: AgentName,
        task_type: impl Into<String>,
        members: Vec<AgentName>,
        strategy: PoolStrategy,
    ) {
        self.pools.insert(
            (principal, task_type.into()),
            Pool { members, strategy, cursor: 0 },
        );
    }

    /// Pick the next RA for `(principal, task_type)` according to the
    /// pool's configured strategy, advancing the round-robin cursor if
    /// applicable.
    pub fn select(
        &mut self,
        principal: &AgentName,
        task_type: &str,
        rng: &mut RunRng,
    ) -> DirectoryResult<AgentName> {
        let key = (principal.clone(), task_type.to_string());
        let pool = self.pools.get_mut(&key).ok_or_else(|| DirectoryError::UnknownPool {
            principal: principal.clone(),
            task_type: task_type.to_string(),
        })?;
        if pool.members.is_empty() {
            return Err(DirectoryError::EmptyPool {
                principal: principal.clone(),
                task_type: task_type.to_string(),
            });
        }
        let idx = match pool.strategy {
            PoolStrategy::RoundRobin => {
                let idx = pool.cursor % pool.members.len();
                pool.cursor = pool.cursor.wrapping_add(1);
                idx
            }
            PoolStrategy::Random => rng
                .gen_index(pool.members.len())
                .expect("members checked non-empty above"),
        };
        Ok(pool.members[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_cycles_and_persists_across_calls() {
        let mut pools = ResourcePools::new();
        let principal = AgentName::from("seller");
        pools.register(
            principal.clone(),
            "pack",
            vec![AgentName::from("ra_1"), AgentName::from("ra_2"), AgentName::from("ra_3")],
            PoolStrategy::RoundRobin,
        );
        let mut rng = RunRng::new(1);
        let picks: Vec<AgentName> = (0..7)
            .map(|_| pools.select(&principal, "pack", &mut rng).unwrap())
            .collect();
        assert_eq!(
            picks,
            vec![
                AgentName::from("ra_1"),
                AgentName::from("ra_2"),
                AgentName::from("ra_3"),
                AgentName::from("ra_1"),
                AgentName::from("ra_2"),
                AgentName::from("ra_3"),
                AgentName::from("ra_1"),
            ]
        );
    }

    #[test]
    fn unknown_pool_is_an_error() {
        let mut pools = ResourcePools::new();
        let mut rng = RunRng::new(1);
        assert!(pools.select(&AgentName::from("seller"), "pack", &mut rng).is_err());
    }

    #[test]
    fn empty_pool_is_a_dispatch_time_error() {
        let mut pools = ResourcePools::new();
        let principal = AgentName::from("seller");
        pools.register(principal.clone(), "pack", vec![], PoolStrategy::RoundRobin);
        let mut rng = RunRng::new(1);
        assert!(pools.select(&principal, "pack", &mut rng).is_err());
    }
}

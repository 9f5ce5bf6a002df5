//! CSV loaders assembling a [`rt_directory::Directory`] from config files:
//! one CSV for the Agent Directory, one for resource pools, one for the
//! task routing table (spec.md §3, grounds on `dt-schedule::loader`'s
//! `csv` + `serde::Deserialize` pattern).
//!
//! # CSV formats
//!
//! `agents.csv`:
//! ```csv
//! name,host,port,roles
//! seller,127.0.0.1,9001,Agent
//! packer_ra_1,127.0.0.1,9100,Agent
//! ```
//! `roles` is a `|`-separated list (most agents play exactly one role).
//!
//! `pools.csv`:
//! ```csv
//! principal,task_type,members,strategy
//! seller,pack,packer_ra_1|packer_ra_2,round_robin
//! ```
//! `members` is `|`-separated, in priority order for `round_robin`.
//! `strategy` is `round_robin` or `random`.
//!
//! `routes.csv`:
//! ```csv
//! handler_name,task_type,principal,duration
//! pack_order,pack,seller,2d±0.5d
//! ```
//! `duration` is parsed with [`rt_core::DurationSpec::parse`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rt_core::DurationSpec;
use rt_directory::{Directory, DirectoryBuilder, Endpoint, PoolStrategy};

use crate::error::{ScheduleError, ScheduleResult};

#[derive(Deserialize)]
struct AgentRecord {
    name: String,
    host: String,
    port: u16,
    roles: String,
}

#[derive(Deserialize)]
struct PoolRecord {
    principal: String,
    task_type: String,
    members: String,
    strategy: String,
}

#[derive(Deserialize)]
struct RouteRecord {
    handler_name: String,
    task_type: String,
    principal: String,
    duration: String,
}

/// Load the three config files and assemble a complete [`Directory`].
pub fn load_directory_csv(
    agents_path: &Path,
    pools_path: &Path,
    routes_path: &Path,
) -> ScheduleResult<Directory> {
    let agents = std::fs::File::open(agents_path)?;
    let pools = std::fs::File::open(pools_path)?;
    let routes = std::fs::File::open(routes_path)?;
    load_directory_readers(agents, pools, routes)
}

/// Like [`load_directory_csv`] but accepts any `Read` source per file —
/// useful for tests (`std::io::Cursor`) without touching the filesystem.
pub fn load_directory_readers<A: Read, P: Read, R: Read>(
    agents: A,
    pools: P,
    routes: R,
) -> ScheduleResult<Directory> {
    let mut builder = DirectoryBuilder::new();

    let mut agents_reader = csv::Reader::from_reader(agents);
    for result in agents_reader.deserialize::<AgentRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let role_list: Vec<&str> = row.roles.split('|').map(str::trim).collect();
        builder = builder.agent(row.name, Endpoint::new(row.host, row.port), &role_list);
    }

    let mut pools_reader = csv::Reader::from_reader(pools);
    for result in pools_reader.deserialize::<PoolRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let members = row
            .members
            .split('|')
            .map(str::trim)
            .map(rt_core::AgentName::from)
            .collect();
        let strategy = parse_strategy(&row.strategy)?;
        builder = builder.pool(row.principal, row.task_type, members, strategy);
    }

    let mut routes_reader = csv::Reader::from_reader(routes);
    for result in routes_reader.deserialize::<RouteRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let duration = DurationSpec::parse(&row.duration)
            .map_err(|e| ScheduleError::Parse(e.to_string()))?;
        builder = builder.route(row.handler_name, row.task_type, row.principal, duration);
    }

    Ok(builder.build()?)
}

fn parse_strategy(s: &str) -> ScheduleResult<PoolStrategy> {
    match s.trim() {
        "round_robin" => Ok(PoolStrategy::RoundRobin),
        "random" => Ok(PoolStrategy::Random),
        other => Err(ScheduleError::Parse(format!(
            "unknown pool strategy {other:?}: expected \"round_robin\" or \"random\""
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_a_complete_directory() {
        let agents = "name,host,port,roles\nseller,127.0.0.1,9001,Agent\npacker_ra_1,127.0.0.1,9100,Agent\n";
        let pools = "principal,task_type,members,strategy\nseller,pack,packer_ra_1,round_robin\n";
        let routes = "handler_name,task_type,principal,duration\npack_order,pack,seller,2d\n";

        let dir = load_directory_readers(
            Cursor::new(agents),
            Cursor::new(pools),
            Cursor::new(routes),
        )
        .unwrap();

        assert_eq!(dir.agents.len(), 2);
        assert!(dir.routes.lookup("pack_order").is_ok());
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(parse_strategy("whatever").is_err());
    }
}

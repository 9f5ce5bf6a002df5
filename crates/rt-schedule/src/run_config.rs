//! Top-level run configuration (spec.md §6 "CLI-ish configuration"),
//! loaded from a small TOML file with `serde` + `toml` (grounds on the
//! rest of the retrieval pack's run-config loaders, not on the teacher —
//! `dt-sim::SimConfig` is built in code, not loaded from a file).
//!
//! ```toml
//! simulation_id       = "bspl_demo"
//! run_id              = 1
//! start_time_days     = 0.0
//! max_rounds          = 1000
//! round_timeout_secs  = 30
//! liveness_warn_after = 5
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use rt_core::{RunSeq, SimulationId, VirtualTime};

use crate::error::ScheduleResult;

#[derive(Deserialize)]
struct RunConfigRecord {
    simulation_id: String,
    run_id: u64,
    start_time_days: f64,
    max_rounds: u64,
    round_timeout_secs: u64,
    liveness_warn_after: u64,
}

/// A run's top-level settings: namespaces logs and output rows, and
/// supplies the round bookkeeping a `TimeServiceBuilder` needs
/// (`max_rounds`, `round_timeout`, `liveness_warn_after`).
pub struct RunConfig {
    pub simulation_id: SimulationId,
    pub run_id: RunSeq,
    pub start_time: VirtualTime,
    pub max_rounds: u64,
    pub round_timeout: Duration,
    pub liveness_warn_after: u64,
}

impl From<RunConfigRecord> for RunConfig {
    fn from(record: RunConfigRecord) -> Self {
        RunConfig {
            simulation_id: SimulationId::from(record.simulation_id),
            run_id: RunSeq(record.run_id),
            start_time: VirtualTime::days(record.start_time_days),
            max_rounds: record.max_rounds,
            round_timeout: Duration::from_secs(record.round_timeout_secs),
            liveness_warn_after: record.liveness_warn_after,
        }
    }
}

/// Parse a `RunConfig` from an already-read TOML string.
pub fn load_run_config_str(toml_source: &str) -> ScheduleResult<RunConfig> {
    let record: RunConfigRecord = toml::from_str(toml_source)?;
    Ok(RunConfig::from(record))
}

/// Read and parse a `RunConfig` from a TOML file.
pub fn load_run_config(path: &Path) -> ScheduleResult<RunConfig> {
    let contents = std::fs::read_to_string(path)?;
    load_run_config_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
simulation_id = \"bspl_demo\"\n\
run_id = 3\n\
start_time_days = 0.0\n\
max_rounds = 500\n\
round_timeout_secs = 15\n\
liveness_warn_after = 4\n\
";

    #[test]
    fn loads_a_run_config() {
        let config = load_run_config_str(SAMPLE).unwrap();
        assert_eq!(config.simulation_id.to_string(), "bspl_demo");
        assert_eq!(config.run_id, RunSeq(3));
        assert_eq!(config.max_rounds, 500);
        assert_eq!(config.round_timeout, Duration::from_secs(15));
        assert_eq!(config.liveness_warn_after, 4);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(load_run_config_str("not valid toml = = =").is_err());
    }
}

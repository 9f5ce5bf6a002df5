//! The default [`RunObserver`] — logs every event via `tracing` instead of
//! writing to a file.

use rt_core::{TaskId, VirtualTime};

use crate::observer::RunObserver;

/// Logs run events at `info`/`debug` level. This is the observer a run
/// gets if no output backend is configured.
#[derive(Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_round_start(&mut self, round: u64, now: VirtualTime) {
        tracing::debug!(round, %now, "round start");
    }

    fn on_round_end(&mut self, round: u64, now: VirtualTime) {
        tracing::debug!(round, %now, "round end");
    }

    fn on_task_given(&mut self, task_id: &TaskId, case_id: &str, task_type: &str, ra: &str) {
        tracing::info!(%task_id, case_id, task_type, ra, "task given");
    }

    fn on_task_started(&mut self, task_id: &TaskId, case_id: &str, task_type: &str, ra: &str) {
        tracing::info!(%task_id, case_id, task_type, ra, "task started");
    }

    fn on_task_complete(&mut self, task_id: &TaskId, case_id: &str, task_type: &str) {
        tracing::info!(%task_id, case_id, task_type, "task complete");
    }

    fn on_eviction(&mut self, agent: &str, round: u64) {
        tracing::error!(agent, round, "participant evicted");
    }

    fn on_run_end(&mut self, final_round: u64, final_time: VirtualTime) {
        tracing::info!(final_round, %final_time, "run end");
    }
}

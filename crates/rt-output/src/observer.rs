//! `RunObserver` — callbacks invoked at key points in a run, generalized
//! from the teacher's `SimObserver` tick-loop hooks to BSPL's round loop
//! and task dispatch events.

use rt_core::{TaskId, VirtualTime};

/// Callbacks a caller (typically `demos/in_process_bus`) invokes as the
/// round loop and dispatcher produce events.
///
/// All methods have default no-op implementations so implementors only
/// need to override what they care about.
pub trait RunObserver {
    /// Called when a round's `TimeUpdate` broadcast goes out.
    fn on_round_start(&mut self, _round: u64, _now: VirtualTime) {}

    /// Called once a round has advanced.
    fn on_round_end(&mut self, _round: u64, _now: VirtualTime) {}

    /// Called when a `GiveTask` is dispatched to a resource agent.
    fn on_task_given(&mut self, _task_id: &TaskId, _case_id: &str, _task_type: &str, _ra: &str) {}

    /// Called when a queued task moves onto the RA's `current` slot
    /// (queue → executing) — may happen many rounds after `on_task_given`
    /// if the RA's queue was backed up, so this is the only event that
    /// marks when a task's duration actually starts elapsing.
    fn on_task_started(&mut self, _task_id: &TaskId, _case_id: &str, _task_type: &str, _ra: &str) {}

    /// Called when a `CompleteTask` resumes its suspended handler.
    fn on_task_complete(&mut self, _task_id: &TaskId, _case_id: &str, _task_type: &str) {}

    /// Called when the watchdog evicts an unresponsive participant.
    fn on_eviction(&mut self, _agent: &str, _round: u64) {}

    /// Called once after the run terminates.
    fn on_run_end(&mut self, _final_round: u64, _final_time: VirtualTime) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

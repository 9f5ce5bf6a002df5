//! `ResourceAgent` — at-most-one task execution (spec.md §4.2).
//!
//! Grounded on the teacher's `dt-mobility::engine`/`store` shape: an
//! engine owning per-entity state transitions (`in_transit` → arrival →
//! re-queue) driven by tick arrivals, generalized here from "journeys" to
//! "tasks" and from "many agents in SoA arrays" to "one RA, one queue".

use rt_core::{AgentName, CompleteTask, DurationField, DurationRng, DurationSpec, VirtualTime, EPSILON_DAYS};
use rt_directory::{AgentDirectory, Endpoint};
use rt_schedule::{RoundReply, Task, TaskQueue};

/// A task currently executing on this RA.
#[derive(Clone, Debug, PartialEq)]
pub struct Executing {
    pub task: Task,
    pub completion_time: VirtualTime,
}

/// What happened to this RA's queue/`current` slot during one
/// `on_time_update` call. A single `TimeUpdate` can both finish the
/// running task and pull the next one off the queue in the same tick, so
/// `started` and `completed` are independent and either, both, or
/// neither may be set (spec.md §6 "TASK_STARTED"/"TASK_COMPLETED" are
/// reported separately for exactly this reason — property 5, spec.md §8,
/// measures the gap between them).
#[derive(Default)]
pub struct TimeUpdateOutcome {
    pub started: Option<Task>,
    pub completed: Option<(Endpoint, CompleteTask)>,
}

/// One resource agent: a strict FIFO queue plus at most one task running.
pub struct ResourceAgent {
    name: AgentName,
    /// The business principal that owns this RA and receives its
    /// `CompleteTask` replies (spec.md §3 "resource pool ... the
    /// principal owns the pool").
    principal: AgentName,
    queue: TaskQueue,
    current: Option<Executing>,
    rng: DurationRng,
}

impl ResourceAgent {
    pub fn new(name: AgentName, principal: AgentName, run_seed: u64) -> Self {
        let rng = DurationRng::new(run_seed, &name);
        ResourceAgent { name, principal, queue: TaskQueue::new(), current: None, rng }
    }

    pub fn name(&self) -> &AgentName {
        &self.name
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Enqueue a task. Spec.md §4.2: parse `duration` (§4.5); an invalid or
    /// non-positive duration is logged and the task dropped entirely —
    /// this never surfaces as an error to the caller, matching the
    /// teacher's "log and continue" treatment of per-agent configuration
    /// problems.
    pub fn give_task(&mut self, task_id: rt_core::TaskId, case_id: String, task_type: String, duration: DurationField) {
        let spec = match duration {
            DurationField::Days(days) => DurationSpec::fixed(days),
            DurationField::Text(text) => DurationSpec::parse(&text),
        };
        let spec = match spec {
            Ok(spec) => spec,
            Err(err) => {
                tracing::warn!(ra = %self.name, %task_id, %err, "invalid task duration, dropping task");
                return;
            }
        };
        let duration_days = spec.realize(&mut self.rng);
        self.queue.push(Task { task_id, case_id, task_type, duration_days });
    }

    /// Advance on a `TimeUpdate{now}` (spec.md §4.2 steps 1-2).
    ///
    /// Returns the task that started (queue → `current`) and the
    /// principal's endpoint plus `CompleteTask` to deliver if a task just
    /// finished — either, both, or neither may be set (see
    /// [`TimeUpdateOutcome`]). A resolved completion is dropped (logged)
    /// if the principal's endpoint can't be found, per spec.md §4.2
    /// "completion addressing"; the `started` signal never depends on
    /// that lookup.
    pub fn on_time_update(&mut self, now: VirtualTime, directory: &AgentDirectory) -> TimeUpdateOutcome {
        let mut completed_task = None;

        if let Some(exec) = &self.current {
            if now.0 >= exec.completion_time.0 {
                let exec = self.current.take().expect("checked Some above");
                completed_task = Some(exec.task);
            }
        }

        let mut started = None;
        if self.current.is_none() {
            if let Some(task) = self.queue.pop_front() {
                let mut completion_time = now.plus(task.duration_days);
                if completion_time.0 <= now.0 {
                    tracing::error!(ra = %self.name, task_id = %task.task_id, "completion_time did not advance past now, clamping by epsilon");
                    completion_time = now.plus(EPSILON_DAYS);
                }
                started = Some(task.clone());
                self.current = Some(Executing { task, completion_time });
            }
        }

        let completed = completed_task.and_then(|task| match directory.endpoint_of(&self.principal) {
            Ok(endpoint) => Some((
                endpoint.clone(),
                CompleteTask { task_id: task.task_id, case_id: task.case_id, task_type: task.task_type },
            )),
            Err(err) => {
                tracing::error!(ra = %self.name, principal = %self.principal, %err, "cannot resolve principal endpoint, dropping completion");
                None
            }
        });

        TimeUpdateOutcome { started, completed }
    }

    /// Reply to the self-addressed `Reminder` (spec.md §4.2 step 4).
    /// Clamps `completion_time` to `now + ε` if a `Reminder` is observed at
    /// a `now` at or past it (the race spec.md §4.2 step 4 names).
    pub fn on_reminder(&self, now: VirtualTime) -> RoundReply {
        match &self.current {
            Some(exec) => {
                let next_time = if exec.completion_time.0 <= now.0 {
                    now.plus(EPSILON_DAYS)
                } else {
                    exec.completion_time
                };
                RoundReply::Hold(next_time)
            }
            None => RoundReply::Passivate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::TaskId;

    fn directory_with(principal: &str) -> AgentDirectory {
        let mut dir = AgentDirectory::new();
        dir.register(AgentName::from(principal), Endpoint::new("127.0.0.1", 9001), &["Agent"]);
        dir
    }

    #[test]
    fn idle_agent_passivates() {
        let ra = ResourceAgent::new(AgentName::from("ra_1"), AgentName::from("seller"), 1);
        assert!(matches!(ra.on_reminder(VirtualTime::ZERO), RoundReply::Passivate));
    }

    #[test]
    fn task_runs_and_completes_after_duration_elapses() {
        let dir = directory_with("seller");
        let mut ra = ResourceAgent::new(AgentName::from("ra_1"), AgentName::from("seller"), 1);
        ra.give_task(TaskId("task_0".to_string()), "case_1".to_string(), "pack".to_string(), DurationField::Days(2.0));
        assert_eq!(ra.queue_len(), 1);

        // First TimeUpdate at T=0 starts the task (queue -> current).
        let outcome = ra.on_time_update(VirtualTime::ZERO, &dir);
        assert_eq!(outcome.started.unwrap().task_id, TaskId("task_0".to_string()));
        assert!(outcome.completed.is_none());
        assert!(!ra.is_idle());
        assert!(matches!(ra.on_reminder(VirtualTime::ZERO), RoundReply::Hold(_)));

        // TimeUpdate before completion still holds, nothing starts or completes.
        let outcome = ra.on_time_update(VirtualTime::days(1.0), &dir);
        assert!(outcome.started.is_none());
        assert!(outcome.completed.is_none());

        // TimeUpdate at/after completion_time finishes the task.
        let outcome = ra.on_time_update(VirtualTime::days(2.0), &dir);
        let (endpoint, complete_task) = outcome.completed.unwrap();
        assert_eq!(endpoint.port, 9001);
        assert_eq!(complete_task.task_id, TaskId("task_0".to_string()));
        assert!(ra.is_idle());
        assert!(matches!(ra.on_reminder(VirtualTime::days(2.0)), RoundReply::Passivate));
    }

    #[test]
    fn fifo_order_preserved_across_two_tasks() {
        let dir = directory_with("seller");
        let mut ra = ResourceAgent::new(AgentName::from("ra_1"), AgentName::from("seller"), 1);
        ra.give_task(TaskId("task_0".to_string()), "case_1".to_string(), "pack".to_string(), DurationField::Days(1.0));
        ra.give_task(TaskId("task_1".to_string()), "case_1".to_string(), "pack".to_string(), DurationField::Days(1.0));

        let outcome = ra.on_time_update(VirtualTime::ZERO, &dir);
        assert_eq!(outcome.started.unwrap().task_id, TaskId("task_0".to_string()));

        let outcome = ra.on_time_update(VirtualTime::days(1.0), &dir);
        assert_eq!(outcome.completed.unwrap().1.task_id, TaskId("task_0".to_string()));
        assert_eq!(outcome.started.unwrap().task_id, TaskId("task_1".to_string()));

        let outcome = ra.on_time_update(VirtualTime::days(2.0), &dir);
        assert_eq!(outcome.completed.unwrap().1.task_id, TaskId("task_1".to_string()));
        assert!(outcome.started.is_none());
    }

    #[test]
    fn invalid_duration_is_dropped_not_queued() {
        let mut ra = ResourceAgent::new(AgentName::from("ra_1"), AgentName::from("seller"), 1);
        ra.give_task(TaskId("task_0".to_string()), "case_1".to_string(), "pack".to_string(), DurationField::Days(0.0));
        assert_eq!(ra.queue_len(), 0);
    }

    #[test]
    fn unresolvable_principal_drops_completion() {
        let dir = AgentDirectory::new();
        let mut ra = ResourceAgent::new(AgentName::from("ra_1"), AgentName::from("seller"), 1);
        ra.give_task(TaskId("task_0".to_string()), "case_1".to_string(), "pack".to_string(), DurationField::Days(1.0));
        ra.on_time_update(VirtualTime::ZERO, &dir);
        assert!(ra.on_time_update(VirtualTime::days(1.0), &dir).completed.is_none());
    }
}

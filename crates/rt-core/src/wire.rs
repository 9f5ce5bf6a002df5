//! Wire message types (spec.md §6).
//!
//! These are plain data carriers. Encoding, transport, and the per-agent
//! adapter loop are out of scope (spec.md §1) — a real transport crate
//! serializes these with `serde` under the `serde` feature and moves them
//! over whatever datagram channel it has; this workspace's own tests and
//! demo drive them directly as in-process values.

use crate::{AgentName, TaskId, VirtualTime};

/// `TimeService -> participant`: the clock has reached `now` for round
/// `round_id.round`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeUpdate {
    pub round_id: String,
    pub now: VirtualTime,
}

/// `participant -> TimeService`: will act no earlier than `next_time`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hold {
    pub round_id: String,
    pub agent_name: AgentName,
    pub next_time: VirtualTime,
}

/// `participant -> TimeService`: no work scheduled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passivate {
    pub round_id: String,
    pub agent_name: AgentName,
}

/// `RA -> RA` (self-addressed): a deferred trigger delivered once per
/// `TimeUpdate`, used to act after the tick's queue bookkeeping but before
/// replying to the `TimeService` (spec.md §4.2, §9).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reminder {
    pub round_id: String,
}

/// `principal -> RA`: enqueue a task. Never starts it immediately.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GiveTask {
    pub task_id: TaskId,
    pub case_id: String,
    pub task_type: String,
    /// Either a duration string (`"2d±0.5d"`) or an already-resolved day
    /// count; spec.md §6 allows both on the wire.
    pub duration: DurationField,
}

/// The `duration` field of `GiveTask` as it appears on the wire — either a
/// textual spec or a pre-resolved day count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DurationField {
    Text(String),
    Days(f64),
}

/// `RA -> principal`: the task finished.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompleteTask {
    pub task_id: TaskId,
    pub case_id: String,
    pub task_type: String,
}

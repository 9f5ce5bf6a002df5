//! Strongly typed identifier wrappers.
//!
//! Numeric IDs use the `typed_id!` macro so they stay `Copy + Ord + Hash`
//! without ceremony at each call site. Named agents are addressed by
//! `AgentName`, a thin `String` wrapper — the directory is keyed by name,
//! not by a dense index, because the participant set is tens of entries,
//! not millions.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Monotonic per-run counter backing generated `task_id`s.
    pub struct TaskSeq(u64);
}

typed_id! {
    /// Index of a run within a simulation (for log namespacing only).
    pub struct RunSeq(u64);
}

// ── AgentName ───────────────────────────────────────────────────────────────

/// The name of a participant: a business principal, a resource agent, or the
/// `TimeService` itself. Directory lookups, pool membership, and round
/// response sets are all keyed by this type.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentName(pub String);

impl AgentName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentName {
    fn from(s: &str) -> Self {
        AgentName(s.to_string())
    }
}

impl From<String> for AgentName {
    fn from(s: String) -> Self {
        AgentName(s)
    }
}

// ── TaskId ────────────────────────────────────────────────────────────────

/// A task identifier, unique within a run.
///
/// Generated from a [`TaskSeq`] as `task_<n>` (spec.md §4.3: "any
/// collision-resistant scheme is fine"). Kept as an opaque string rather
/// than the bare counter so it survives round-tripping through the wire
/// message structs unchanged.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskId(pub String);

impl TaskId {
    pub fn from_seq(seq: TaskSeq) -> Self {
        TaskId(format!("task_{}", seq.0))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── SimulationId ────────────────────────────────────────────────────────────

/// The human-chosen name of a simulation, read from the run's top-level
/// config (spec.md §6 "CLI-ish configuration"). Pairs with [`RunSeq`] —
/// which already covers the numeric "which run of this simulation" axis —
/// to namespace logs and output rows per run.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationId(pub String);

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SimulationId {
    fn from(s: &str) -> Self {
        SimulationId(s.to_string())
    }
}

impl From<String> for SimulationId {
    fn from(s: String) -> Self {
        SimulationId(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_from_seq_is_stable() {
        assert_eq!(TaskId::from_seq(TaskSeq(7)).0, "task_7");
    }

    #[test]
    fn simulation_id_displays_as_its_name() {
        let id = SimulationId::from("bspl_demo");
        assert_eq!(id.to_string(), "bspl_demo");
    }
}

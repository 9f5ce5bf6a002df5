//! `rt-core` — virtual clock, typed IDs, duration parsing, and wire
//! message types for the BSPL virtual-time scheduling core.
//!
//! This crate is a dependency of every other `rt-*` crate. It intentionally
//! has no `rt-*` dependencies and minimal external ones (`rand`,
//! `rand_distr`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                             |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `AgentName`, `TaskId`, `TaskSeq`, `RunSeq`,           |
//! |              | `SimulationId`                                        |
//! | [`clock`]    | `VirtualTime`, `RoundId`                              |
//! | [`duration`] | `DurationSpec` parsing and realization                |
//! | [`rng`]      | `DurationRng` (per-RA), `RunRng` (run-level)          |
//! | [`wire`]     | `TimeUpdate`, `Hold`, `Passivate`, `Reminder`,        |
//! |              | `GiveTask`, `CompleteTask`                            |
//! | [`error`]    | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod clock;
pub mod duration;
pub mod error;
pub mod ids;
pub mod rng;
pub mod wire;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{RoundId, VirtualTime};
pub use duration::{DurationSpec, EPSILON_DAYS};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentName, RunSeq, SimulationId, TaskId, TaskSeq};
pub use rng::{DurationRng, RunRng};
pub use wire::{CompleteTask, DurationField, GiveTask, Hold, Passivate, Reminder, TimeUpdate};

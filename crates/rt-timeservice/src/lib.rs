//! `rt-timeservice` — the round-based barrier scheduler (spec.md §4.1,
//! §4.4).
//!
//! | Module          | Contents                                           |
//! |------------------|------------------------------------------------------|
//! | [`time_service`] | `TimeService`, `RoundBroadcast`, `AdvanceOutcome`,  |
//! |                  | `WatchdogOutcome`                                  |
//! | [`builder`]      | `TimeServiceBuilder`                               |
//! | [`error`]        | `TimeServiceError`, `TimeServiceResult<T>`         |
//!
//! # Design notes
//!
//! Like every other `rt-*` protocol crate, `TimeService` is
//! transport-agnostic: it exposes plain synchronous methods
//! (`broadcast`, `handle_hold`, `handle_passivate`, `advance`,
//! `check_watchdog`) that a caller drives from whatever transport it has
//! — a real UDP adapter, or this workspace's own `demos/in_process_bus`.

pub mod builder;
pub mod error;
pub mod time_service;

pub use builder::TimeServiceBuilder;
pub use error::{TimeServiceError, TimeServiceResult};
pub use time_service::{AdvanceOutcome, RoundBroadcast, TimeService, WatchdogOutcome};

//! `rt-output` — run observation for the BSPL virtual-time scheduling
//! core: a `RunObserver` trait with a tracing-backed default and an
//! optional CSV task-event log.
//!
//! | Observer          | Behavior                                        |
//! |--------------------|---------------------------------------------------|
//! | [`NoopObserver`]   | Discards every event.                            |
//! | [`TracingObserver`]| Logs every event via `tracing` (the default).    |
//! | [`CsvObserver`]    | Writes `task_events.csv` in a configured dir.    |
//!
//! # Usage
//!
//! ```rust,ignore
//! use rt_output::{CsvObserver, RunObserver};
//!
//! let mut obs = CsvObserver::new(Path::new("./output")).unwrap();
//! obs.on_task_given(&task_id, "case_1", "pack", "packer_ra_1");
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv_observer;
pub mod error;
pub mod observer;
pub mod tracing_observer;

#[cfg(test)]
mod tests;

pub use csv_observer::CsvObserver;
pub use error::{OutputError, OutputResult};
pub use observer::{NoopObserver, RunObserver};
pub use tracing_observer::TracingObserver;

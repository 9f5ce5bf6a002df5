//! `rt-schedule` — round response tracking, per-RA task queues, and
//! CSV/TOML config loading for the BSPL virtual-time scheduling core.
//!
//! | Module           | Contents                                           |
//! |------------------|------------------------------------------------------|
//! | [`round_tracker`]| `RoundTracker`, `RoundReply` — `Resp[R]`/`N[R]`     |
//! | [`task_queue`]   | `TaskQueue`, `Task` — per-RA FIFO                   |
//! | [`config`]       | CSV loaders building a `rt_directory::Directory`    |
//! | [`run_config`]   | TOML loader for top-level run settings              |
//! | [`error`]        | `ScheduleError`, `ScheduleResult<T>`                |

pub mod config;
pub mod error;
pub mod round_tracker;
pub mod run_config;
pub mod task_queue;

pub use config::{load_directory_csv, load_directory_readers};
pub use error::{ScheduleError, ScheduleResult};
pub use round_tracker::{RoundReply, RoundTracker};
pub use run_config::{load_run_config, load_run_config_str, RunConfig};
pub use task_queue::{Task, TaskQueue};

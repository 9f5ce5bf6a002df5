//! `rt-dispatch` — deferred-reaction dispatch: transparently turns
//! `on_message` calls into "schedule a task, resume on completion"
//! (spec.md §4.3).
//!
//! | Module         | Contents                                               |
//! |-----------------|----------------------------------------------------------|
//! | [`message`]    | `Message` — the inbound payload a handler receives      |
//! | [`effect`]     | `Effect` (`GiveTask`, `Reply`, `Resume`)                |
//! | [`context`]    | `DispatchContext<'a>` — read-only per-call view         |
//! | [`handler`]    | `Handler` trait                                         |
//! | [`noop`]       | `NoopHandler` — placeholder that never produces effects |
//! | [`dispatcher`] | `Dispatcher` — routing, RA selection, suspend/resume    |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                    |
//!
//! # Design notes
//!
//! The split mirrors the teacher's two-phase tick loop, generalized from
//! "travel intents" to "business effects":
//!
//! 1. **Decide** (pure): [`Dispatcher::dispatch`] decides — from the task
//!    routing table alone — whether `handler_name` runs now or is
//!    deferred. The [`Handler`] itself never sees this decision.
//! 2. **Apply** (side-effecting): the caller carries out the returned
//!    [`Effect`]s — sending a `GiveTask`, delivering a `Reply` — over
//!    whatever transport it has.

pub mod context;
pub mod dispatcher;
pub mod effect;
pub mod error;
pub mod handler;
pub mod message;
pub mod noop;

pub use context::DispatchContext;
pub use dispatcher::Dispatcher;
pub use effect::Effect;
pub use error::{DispatchError, DispatchResult};
pub use handler::Handler;
pub use message::Message;
pub use noop::NoopHandler;

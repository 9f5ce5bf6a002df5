//! The `Handler` trait — the main extension point for business logic.

use crate::context::DispatchContext;
use crate::effect::Effect;
use crate::message::Message;

/// Business-protocol message handling, pluggable per deployment.
///
/// Implement this trait for each principal's handler logic. The
/// [`Dispatcher`][crate::Dispatcher] decides — based on the task routing
/// table, not on anything `Handler` does — whether a given call runs
/// immediately or is deferred to a resource agent and resumed later; the
/// handler body itself is unaware of the difference (spec.md §4.3).
///
/// # Thread safety
///
/// A handler may be invoked by the in-process bus from a different thread
/// than the one that dispatched it, so implementations must be
/// `Send + Sync`.
pub trait Handler: Send + Sync + 'static {
    fn on_message(&self, message: &Message, ctx: &DispatchContext<'_>) -> Vec<Effect>;
}

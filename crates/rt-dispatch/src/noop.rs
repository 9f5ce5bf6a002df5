//! A no-op handler — produces no effects for any message.

use crate::context::DispatchContext;
use crate::effect::Effect;
use crate::handler::Handler;
use crate::message::Message;

/// A [`Handler`] that always returns an empty effect list.
///
/// Useful as a placeholder in tests, or for routed handlers whose entire
/// purpose is the deferral itself — the business logic resumes with a
/// message the caller already has everything it needs from.
pub struct NoopHandler;

impl Handler for NoopHandler {
    fn on_message(&self, _message: &Message, _ctx: &DispatchContext<'_>) -> Vec<Effect> {
        vec![]
    }
}

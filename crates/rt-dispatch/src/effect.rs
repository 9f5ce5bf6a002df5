//! The actions a dispatched or resumed handler call produces.

use rt_core::{AgentName, GiveTask, TaskId};

use crate::message::Message;

/// A side effect for the caller (an `InProcessBus`, or a real transport
/// adapter) to carry out. Replaces the teacher's `Intent` — the same
/// "pure decision, side-effecting apply" split, generalized from "travel
/// to a node" to "route a business message".
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Deliver `give_task` to resource agent `ra` (spec.md §4.3 step 4).
    GiveTask { ra: AgentName, give_task: GiveTask },
    /// Deliver `message` to participant `to`.
    Reply { to: AgentName, message: Message },
    /// A suspended invocation for `task_id` was resumed with `message`.
    /// Not itself wire traffic — an auditable marker so observers can log
    /// dispatch resumption distinctly from the handler's own effects.
    Resume { task_id: TaskId, message: Message },
}

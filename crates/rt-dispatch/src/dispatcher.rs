//! `Dispatcher` — turns "call handler `h`" into "schedule a task, resume
//! on completion" for every `h` listed in the task routing table
//! (spec.md §4.3).
//!
//! Grounded on the teacher's `dt-sim::Sim` message queue's "buffer until
//! the right moment, then redeliver" shape — generalized from "buffer an
//! intent until next tick" to "buffer a handler invocation until its task
//! completes".

use std::collections::HashMap;

use rt_core::{AgentName, DurationField, GiveTask, RunRng, TaskId, TaskSeq};

use crate::context::DispatchContext;
use crate::effect::Effect;
use crate::handler::Handler;
use crate::message::Message;
use crate::DispatchResult;

struct Suspended {
    handler_name: String,
    message: Message,
}

/// Owns the task routing table, the resource pools it selects from, and
/// the suspended-invocation map keyed by `task_id`.
pub struct Dispatcher {
    routes: rt_directory::TaskRoutingTable,
    pools: rt_directory::ResourcePools,
    suspended: HashMap<TaskId, Suspended>,
    next_seq: u64,
}

impl Dispatcher {
    pub fn new(routes: rt_directory::TaskRoutingTable, pools: rt_directory::ResourcePools) -> Self {
        Dispatcher { routes, pools, suspended: HashMap::new(), next_seq: 0 }
    }

    fn next_task_id(&mut self) -> TaskId {
        let id = TaskId::from_seq(TaskSeq(self.next_seq));
        self.next_seq += 1;
        id
    }

    /// Route a call to `handler_name` carrying `message`.
    ///
    /// If `handler_name` is absent from the routing table, runs `handler`
    /// inline and returns its effects directly (spec.md §4.3 step 1). If
    /// present, picks a target RA, generates a `task_id`, suspends the
    /// invocation, and returns a single [`Effect::GiveTask`] — `handler` is
    /// not called until the matching `CompleteTask` resumes it via
    /// [`Dispatcher::complete`].
    pub fn dispatch(
        &mut self,
        handler_name: &str,
        message: Message,
        handler: &dyn Handler,
        rng: &mut RunRng,
    ) -> DispatchResult<Vec<Effect>> {
        let route = match self.routes.lookup(handler_name) {
            Ok(route) => route.clone(),
            Err(_) => {
                let case_id = message.case_id_or_unknown().to_string();
                let ctx = DispatchContext::new(handler_name, &case_id);
                return Ok(handler.on_message(&message, &ctx));
            }
        };

        let ra = self.pools.select(&route.principal, &route.task_type, rng)?;
        let task_id = self.next_task_id();
        let case_id = message.case_id_or_unknown().to_string();

        let give_task = GiveTask {
            task_id: task_id.clone(),
            case_id,
            task_type: route.task_type.clone(),
            duration: DurationField::Text(route.duration.to_string()),
        };

        self.suspended.insert(
            task_id,
            Suspended { handler_name: handler_name.to_string(), message },
        );

        Ok(vec![Effect::GiveTask { ra, give_task }])
    }

    /// Resume the invocation suspended under `task_id`, if any. A
    /// duplicate or unknown `task_id` is logged and dropped rather than
    /// treated as an error (spec.md §4.3 idempotence clause).
    pub fn complete(&mut self, task_id: &TaskId, handler: &dyn Handler) -> Vec<Effect> {
        let Some(suspended) = self.suspended.remove(task_id) else {
            tracing::warn!(%task_id, "CompleteTask for unknown or already-resumed task_id, dropping");
            return vec![];
        };

        let case_id = suspended.message.case_id_or_unknown().to_string();
        let ctx = DispatchContext::new(&suspended.handler_name, &case_id);
        let mut effects = vec![Effect::Resume { task_id: task_id.clone(), message: suspended.message.clone() }];
        effects.extend(handler.on_message(&suspended.message, &ctx));
        effects
    }

    pub fn suspended_count(&self) -> usize {
        self.suspended.len()
    }

    pub fn is_routed(&self, handler_name: &str) -> bool {
        self.routes.lookup(handler_name).is_ok()
    }

    /// Resolve the destination endpoint for `ra` so the caller can deliver
    /// a `GiveTask` effect over whatever transport it has.
    pub fn resolve(&self, directory: &rt_directory::AgentDirectory, name: &AgentName) -> rt_directory::DirectoryResult<rt_directory::Endpoint> {
        directory.endpoint_of(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::DurationSpec;
    use rt_directory::{PoolStrategy, TaskRoute};

    struct EchoHandler;
    impl Handler for EchoHandler {
        fn on_message(&self, message: &Message, _ctx: &DispatchContext<'_>) -> Vec<Effect> {
            vec![Effect::Reply { to: AgentName::from("buyer"), message: message.clone() }]
        }
    }

    fn dispatcher_with_route() -> Dispatcher {
        let mut routes = rt_directory::TaskRoutingTable::new();
        routes.register(
            "pack_order",
            TaskRoute {
                task_type: "pack".to_string(),
                principal: AgentName::from("seller"),
                duration: DurationSpec::fixed(2.0).unwrap(),
            },
        );
        let mut pools = rt_directory::ResourcePools::new();
        pools.register(
            AgentName::from("seller"),
            "pack",
            vec![AgentName::from("ra_1")],
            PoolStrategy::RoundRobin,
        );
        Dispatcher::new(routes, pools)
    }

    #[test]
    fn routed_handler_defers_instead_of_running_inline() {
        let mut dispatcher = dispatcher_with_route();
        let mut rng = RunRng::new(1);
        let effects = dispatcher
            .dispatch("pack_order", Message::new("order").with_case_id("case_1"), &EchoHandler, &mut rng)
            .unwrap();
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::GiveTask { .. }));
        assert_eq!(dispatcher.suspended_count(), 1);
    }

    #[test]
    fn unrouted_handler_runs_inline() {
        let mut dispatcher = dispatcher_with_route();
        let mut rng = RunRng::new(1);
        let effects = dispatcher
            .dispatch("ship_order", Message::new("order"), &EchoHandler, &mut rng)
            .unwrap();
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::Reply { .. }));
        assert_eq!(dispatcher.suspended_count(), 0);
    }

    #[test]
    fn complete_resumes_and_then_is_a_no_op_on_duplicate() {
        let mut dispatcher = dispatcher_with_route();
        let mut rng = RunRng::new(1);
        let effects = dispatcher
            .dispatch("pack_order", Message::new("order").with_case_id("case_1"), &EchoHandler, &mut rng)
            .unwrap();
        let task_id = match &effects[0] {
            Effect::GiveTask { give_task, .. } => give_task.task_id.clone(),
            _ => panic!("expected GiveTask"),
        };

        let resumed = dispatcher.complete(&task_id, &EchoHandler);
        assert_eq!(resumed.len(), 2);
        assert!(matches!(resumed[0], Effect::Resume { .. }));
        assert!(matches!(resumed[1], Effect::Reply { .. }));

        let duplicate = dispatcher.complete(&task_id, &EchoHandler);
        assert!(duplicate.is_empty());
    }
}

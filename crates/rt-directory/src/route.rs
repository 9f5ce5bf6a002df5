//! The task routing table (spec.md §3, §4.3): which `(task_type,
//! principal, duration)` a deferred handler name routes to.

use std::collections::HashMap;

use rt_core::{AgentName, DurationSpec};

use crate::error::{DirectoryError, DirectoryResult};

#[derive(Clone)]
pub struct TaskRoute {
    pub task_type: String,
    pub principal: AgentName,
    pub duration: DurationSpec,
}

#[derive(Default)]
pub struct TaskRoutingTable {
    routes: HashMap<String, TaskRoute>,
}

impl TaskRoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler_name: impl Into<String>, route: TaskRoute) {
        self.routes.insert(handler_name.into(), route);
    }

    pub fn lookup(&self, handler_name: &str) -> DirectoryResult<&TaskRoute> {
        self.routes
            .get(handler_name)
            .ok_or_else(|| DirectoryError::UnknownRoute(handler_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_roundtrips() {
        let mut table = TaskRoutingTable::new();
        table.register(
            "pack_order",
            TaskRoute {
                task_type: "pack".to_string(),
                principal: AgentName::from("seller"),
                duration: DurationSpec::fixed(2.0).unwrap(),
            },
        );
        let route = table.lookup("pack_order").unwrap();
        assert_eq!(route.task_type, "pack");
        assert_eq!(route.principal, AgentName::from("seller"));
    }

    #[test]
    fn unknown_handler_is_an_error() {
        let table = TaskRoutingTable::new();
        assert!(table.lookup("nope").is_err());
    }
}

//! Read-only context passed to every [`Handler`][crate::Handler] call.

/// A read-only view of the routing decision under which a handler is
/// executing — present whether the call ran inline or was resumed after
/// a deferred task completed.
pub struct DispatchContext<'a> {
    pub handler_name: &'a str,
    pub case_id: &'a str,
}

impl<'a> DispatchContext<'a> {
    pub fn new(handler_name: &'a str, case_id: &'a str) -> Self {
        DispatchContext { handler_name, case_id }
    }
}

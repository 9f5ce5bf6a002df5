//! The inbound message a business handler receives.
//!
//! BSPL message schemas are protocol-specific and arbitrary; this crate
//! only needs enough structure to route and resume calls, so a message is
//! a message type tag, an optional enactment identifier, and an opaque
//! field bag.

use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub message_type: String,
    pub case_id: Option<String>,
    pub fields: HashMap<String, String>,
}

impl Message {
    pub fn new(message_type: impl Into<String>) -> Self {
        Message { message_type: message_type.into(), case_id: None, fields: HashMap::new() }
    }

    pub fn with_case_id(mut self, case_id: impl Into<String>) -> Self {
        self.case_id = Some(case_id.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The enactment identifier threaded through for observability
    /// (spec.md §4.3 step 3: "derived from the inbound message, falling
    /// back to `\"unknown\"` only if truly absent — log at warn").
    pub fn case_id_or_unknown(&self) -> &str {
        match &self.case_id {
            Some(id) => id.as_str(),
            None => {
                tracing::warn!(message_type = %self.message_type, "message has no case_id, using \"unknown\"");
                "unknown"
            }
        }
    }
}

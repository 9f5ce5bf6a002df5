//! `rt-resource` — resource agent at-most-one task execution (spec.md
//! §4.2).
//!
//! | Module   | Contents                                                 |
//! |----------|------------------------------------------------------------|
//! | [`agent`]| `ResourceAgent`, `Executing`, `TimeUpdateOutcome`         |
//!
//! Every fallible outcome here (an invalid duration, an unresolvable
//! principal) is a per-task condition to log and drop, not a crate-level
//! error — there is no `rt_resource::error` module.

pub mod agent;

pub use agent::{Executing, ResourceAgent, TimeUpdateOutcome};

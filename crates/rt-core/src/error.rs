//! Core error type.
//!
//! Sub-crates define their own error enums (`AgentNotFound`, `Config`, ...)
//! and convert `CoreError` into a variant via `From`, rather than the other
//! way around — `rt-core` never depends on its callers.

use thiserror::Error;

/// The error type for `rt-core`. Parsing (`DurationSpec::parse`) is the
/// only fallible operation `rt-core` itself exposes.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `rt-core`.
pub type CoreResult<T> = Result<T, CoreError>;

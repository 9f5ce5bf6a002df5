//! `rt-directory` — the Agent Directory, resource pools, and the task
//! routing table (spec.md §3, §4.3, §4.4).
//!
//! | Module        | Contents                                              |
//! |----------------|--------------------------------------------------------|
//! | [`directory`] | `AgentDirectory`, `Endpoint` — name → endpoint/roles   |
//! | [`pool`]      | `ResourcePools`, `PoolStrategy` — RA selection         |
//! | [`route`]     | `TaskRoutingTable`, `TaskRoute` — handler → route      |
//! | [`builder`]   | `DirectoryBuilder`, `Directory` — fluent assembly      |
//! | [`error`]     | `DirectoryError`, `DirectoryResult`                    |

pub mod builder;
pub mod directory;
pub mod error;
pub mod pool;
pub mod route;

pub use builder::{Directory, DirectoryBuilder};
pub use directory::{AgentDirectory, Endpoint};
pub use error::{DirectoryError, DirectoryResult};
pub use pool::{PoolStrategy, ResourcePools};
pub use route::{TaskRoute, TaskRoutingTable};

use rt_core::AgentName;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("unknown agent {0:?}")]
    AgentNotFound(AgentName),
    #[error("no resource pool registered for principal {principal:?}, task type {task_type:?}")]
    UnknownPool { principal: AgentName, task_type: String },
    #[error("resource pool for principal {principal:?}, task type {task_type:?} is empty")]
    EmptyPool { principal: AgentName, task_type: String },
    #[error("no route registered for handler {0:?}")]
    UnknownRoute(String),
    #[error("invalid directory configuration: {0}")]
    Config(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeServiceError {
    #[error("time service configuration error: {0}")]
    Config(String),
}

pub type TimeServiceResult<T> = Result<T, TimeServiceError>;

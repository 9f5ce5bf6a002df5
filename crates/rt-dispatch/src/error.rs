use rt_directory::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

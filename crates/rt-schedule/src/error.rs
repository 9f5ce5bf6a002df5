use rt_directory::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("config parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("run config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

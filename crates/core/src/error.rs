#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("file access error: {0}")]
    Files(#[from] docref_files::FilesError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

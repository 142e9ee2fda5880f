use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BragError>;

#[derive(Error, Debug)]
pub enum BragError {
    #[error("no directories specified")]
    NoDirectories,
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),
    #[error("Git error: {0}")]
    Git(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<tempfile::PersistError> for BragError {
    fn from(err: tempfile::PersistError) -> Self {
        BragError::Io(err.error)
    }
}

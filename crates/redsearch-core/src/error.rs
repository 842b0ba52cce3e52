use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Malformed record in {path:?} at line {line}: expected {expected} columns, found {found}")]
    MalformedRecord { path: PathBuf, line: u64, expected: usize, found: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

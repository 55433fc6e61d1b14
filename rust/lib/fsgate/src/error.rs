use thiserror::Error;

use crate::protocol::FsResult;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    #[error("path escapes the gateway root: {0:?}")]
    Traversal(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
}

impl From<std::io::Error> for FsError {
    fn from(e: std::io::Error) -> Self {
        FsError::Io(e.to_string())
    }
}

impl From<FsError> for FsResult {
    fn from(e: FsError) -> Self {
        FsResult::failure(e.to_string())
    }
}

//! Error types for dirmodel-fs

use std::path::PathBuf;

/// Result type for dirmodel-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dirmodel-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No such file or directory: {path}")]
    NotFound { path: PathBuf },

    #[error("Entry already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Too many levels of symbolic links: {path}")]
    SymlinkLoop { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

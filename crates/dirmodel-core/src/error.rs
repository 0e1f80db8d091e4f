//! Error types for dirmodel-core

use std::fmt;
use std::path::PathBuf;

/// Result type for dirmodel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of filesystem entry a node declares or finds on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "a directory"),
            Self::File => write!(f, "a file"),
        }
    }
}

/// Errors raised while loading or validating a schema.
///
/// A node's validation stops at the first of these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Expected '{path}' to be absolute")]
    PathNotAbsolute { path: PathBuf },

    #[error("Expected '{name}' to be the same path as '{path}'")]
    PathIdentityMismatch { name: String, path: PathBuf },

    #[error("'{path}' should be a directory because it has children")]
    DirectoryChildConflict { path: PathBuf },

    /// The entry on disk disagrees with the declared `is_dir`.
    #[error("Expected '{path}' to be {expected}, found {found}")]
    NotADirectory {
        path: PathBuf,
        expected: EntryKind,
        found: EntryKind,
    },

    #[error("Expected path '{path}' to be a symlink")]
    NotASymlink { path: PathBuf },

    #[error("Resolved path for '{name}' does not exist: {target}")]
    SymlinkTargetMissing { name: String, target: PathBuf },

    #[error(
        "Expected path '{path}' to be a symlink resolving to '{expected}' instead of resolving to '{actual}'"
    )]
    SymlinkTargetMismatch {
        path: PathBuf,
        expected: PathBuf,
        actual: PathBuf,
    },

    #[error("Expected '{path}' to exist")]
    RequiredPathMissing { path: PathBuf },

    #[error("Filesystem operation failed: {0}")]
    FilesystemOperationFailed(#[from] dirmodel_fs::Error),

    #[error("Failed to read schema at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Could not determine the working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

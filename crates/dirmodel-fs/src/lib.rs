//! Filesystem capability for dirmodel
//!
//! Every read and write the schema validator performs goes through the
//! [`FileSystem`] trait, so the engine can run against the real disk
//! ([`RealFs`]) or an in-memory fake ([`MemoryFs`]).

pub mod error;
pub mod memory;
pub mod path;
pub mod real;

pub use error::{Error, Result};
pub use memory::{MemoryFs, Operation};
pub use path::clean;
pub use real::RealFs;

use std::path::{Path, PathBuf};

/// The narrow set of filesystem operations needed to validate a schema.
///
/// All paths passed in are expected to be absolute.
pub trait FileSystem {
    /// Whether an entry exists at `path`, following symlinks.
    ///
    /// A dangling symlink does not exist.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` resolves to a directory, following symlinks.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether the entry at `path` is itself a symlink.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Whether `a` and `b` resolve to the same real filesystem object.
    ///
    /// Returns `false` when either side does not exist.
    fn same_entry(&self, a: &Path, b: &Path) -> Result<bool>;

    /// Resolve every symlink in `path` and return the real location.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Create `path` and any missing parents. Succeeds if it already is a directory.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Create a symlink at `link` pointing at `target`, verbatim.
    fn symlink(&self, target: &Path, link: &Path) -> Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        (**self).is_symlink(path)
    }

    fn same_entry(&self, a: &Path, b: &Path) -> Result<bool> {
        (**self).same_entry(a, b)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        (**self).canonicalize(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (**self).create_dir_all(path)
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        (**self).symlink(target, link)
    }
}

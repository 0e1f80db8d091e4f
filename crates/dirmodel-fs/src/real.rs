//! [`FileSystem`] backed by the real disk

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, FileSystem, Result};

/// Delegates every operation to `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn same_entry(&self, a: &Path, b: &Path) -> Result<bool> {
        if !a.exists() || !b.exists() {
            return Ok(false);
        }
        Ok(self.canonicalize(a)? == self.canonicalize(b)?)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        dunce::canonicalize(path).map_err(|e| Error::io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        tracing::debug!(link = %link.display(), target = %target.display(), "symlink");
        create_symlink(target, link).map_err(|e| Error::io(link, e))
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    // Windows needs to know the kind up front; relative targets resolve from the link's parent.
    let resolved = match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target.to_path_buf(),
    };
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

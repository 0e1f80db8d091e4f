//! The per-node validation pipeline
//!
//! Each node goes through, in order:
//!
//! 1. path resolution: compute or check the absolute path;
//! 2. child derivation: rebuild children under the resolved path with the
//!    shared policy and propagated flags;
//! 3. directory consistency: promote nodes with children, compare the
//!    declared kind with what is on disk;
//! 4. symlink consistency: check an existing link, or create a missing one;
//! 5. existence: create a missing directory, then require presence.
//!
//! Only after a node passes all of these are its children validated, left
//! to right. The first failure aborts the whole pass; entries created
//! before it stay on disk.

use std::path::{Path, PathBuf};

use dirmodel_fs::FileSystem;

use crate::{EntryKind, Error, Result, SchemaNode};

/// A filesystem mutation performed during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    CreatedDirectory(PathBuf),
    CreatedSymlink { link: PathBuf, target: PathBuf },
}

/// Runs the validation pipeline against one filesystem, recording what it creates.
pub struct Validator<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    changes: Vec<Change>,
}

impl<'a, F: FileSystem + ?Sized> Validator<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            changes: Vec::new(),
        }
    }

    /// Changes made so far, in the order they happened.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }

    /// Validate `node` and its subtree.
    ///
    /// `base` is the directory the node's `name` is relative to: the working
    /// directory for roots, the parent's path for children.
    pub fn validate(&mut self, node: SchemaNode, base: &Path) -> Result<SchemaNode> {
        let path = self.resolve_path(&node, base)?;
        tracing::debug!(path = %path.display(), "validating");

        let mut node = node;
        node.resolved_path = Some(path.clone());
        let children = std::mem::take(&mut node.children);
        node.children = children
            .into_iter()
            .map(|child| node.adopt(&path, child))
            .collect();

        self.check_directory(&mut node, &path)?;
        self.check_symlink(&node, &path)?;
        self.check_existence(&node, &path)?;

        let children = std::mem::take(&mut node.children);
        node.children = children
            .into_iter()
            .map(|child| self.validate(child, &path))
            .collect::<Result<_>>()?;
        Ok(node)
    }

    fn resolve_path(&self, node: &SchemaNode, base: &Path) -> Result<PathBuf> {
        let by_name = base.join(&node.name);
        let Some(declared) = &node.resolved_path else {
            return Ok(by_name);
        };

        if !declared.is_absolute() {
            return Err(Error::PathNotAbsolute {
                path: declared.clone(),
            });
        }
        if self.fs.exists(&by_name) && !self.fs.same_entry(&by_name, declared)? {
            return Err(Error::PathIdentityMismatch {
                name: node.name.clone(),
                path: declared.clone(),
            });
        }
        Ok(declared.clone())
    }

    fn check_directory(&self, node: &mut SchemaNode, path: &Path) -> Result<()> {
        if !node.children.is_empty() {
            if node.is_directory == Some(false) {
                return Err(Error::DirectoryChildConflict {
                    path: path.to_path_buf(),
                });
            }
            node.is_directory = Some(true);
        }

        let Some(declared_dir) = node.is_directory else {
            return Ok(());
        };
        if !self.fs.exists(path) {
            return Ok(());
        }
        let found_dir = self.fs.is_dir(path);
        if declared_dir != found_dir {
            return Err(Error::NotADirectory {
                path: path.to_path_buf(),
                expected: kind(declared_dir),
                found: kind(found_dir),
            });
        }
        Ok(())
    }

    fn check_symlink(&mut self, node: &SchemaNode, path: &Path) -> Result<()> {
        let Some(target) = &node.symlink_target else {
            return Ok(());
        };

        if self.fs.exists(path) {
            if !self.fs.is_symlink(path) {
                return Err(Error::NotASymlink {
                    path: path.to_path_buf(),
                });
            }
            let target_path = link_relative(path, target);
            if !self.fs.exists(&target_path) {
                return Err(Error::SymlinkTargetMissing {
                    name: node.name.clone(),
                    target: target_path,
                });
            }
            if !self.fs.same_entry(path, &target_path)? {
                return Err(Error::SymlinkTargetMismatch {
                    path: path.to_path_buf(),
                    expected: self.fs.canonicalize(&target_path)?,
                    actual: self.fs.canonicalize(path)?,
                });
            }
        } else if node.config.create_missing_symlinks {
            self.fs.symlink(target, path)?;
            tracing::info!("Created symlink: {} -> {}", path.display(), target.display());
            self.changes.push(Change::CreatedSymlink {
                link: path.to_path_buf(),
                target: target.clone(),
            });
        }
        Ok(())
    }

    fn check_existence(&mut self, node: &SchemaNode, path: &Path) -> Result<()> {
        if node.config.create_missing_directories && node.is_dir() && !self.fs.exists(path) {
            self.fs.create_dir_all(path)?;
            tracing::info!("Created directory: {}", path.display());
            self.changes.push(Change::CreatedDirectory(path.to_path_buf()));
        }

        if node.must_exist.is_truthy() && !self.fs.exists(path) {
            return Err(Error::RequiredPathMissing {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}

fn kind(is_dir: bool) -> EntryKind {
    if is_dir {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// A symlink target as the link itself sees it: relative targets start from the link's directory.
fn link_relative(link: &Path, target: &Path) -> PathBuf {
    match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target.to_path_buf(),
    }
}

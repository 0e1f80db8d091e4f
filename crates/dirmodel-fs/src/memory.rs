//! In-memory [`FileSystem`] for tests and dry runs
//!
//! Entries are keyed by their real (symlink-free) absolute path. Symlink
//! targets are stored verbatim and resolved on lookup, relative targets
//! against the directory holding the link.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::{Error, FileSystem, Result, clean};

/// Maximum number of symlinks followed while resolving one path.
const MAX_SYMLINK_HOPS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Dir,
    File,
    Symlink(PathBuf),
}

/// A mutation performed through the [`FileSystem`] trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateDir(PathBuf),
    Symlink { target: PathBuf, link: PathBuf },
}

/// An in-memory tree of directories, files and symlinks.
///
/// Seeding helpers (`add_*`) do not count as operations; only calls made
/// through [`FileSystem`] are recorded in [`MemoryFs::operations`].
#[derive(Debug)]
pub struct MemoryFs {
    entries: RefCell<BTreeMap<PathBuf, Entry>>,
    operations: RefCell<Vec<Operation>>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create a filesystem holding only the root directory.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PathBuf::from("/"), Entry::Dir);
        Self {
            entries: RefCell::new(entries),
            operations: RefCell::new(Vec::new()),
        }
    }

    /// Seed a directory and its parents.
    ///
    /// # Panics
    ///
    /// Panics if a non-directory entry is in the way.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        if let Err(e) = self.make_dirs(path) {
            panic!("MemoryFs::add_dir({}): {e}", path.display());
        }
        self
    }

    /// Seed an empty file, creating missing parents.
    pub fn add_file(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        if let Err(e) = self.insert_with_parents(path, Entry::File) {
            panic!("MemoryFs::add_file({}): {e}", path.display());
        }
        self
    }

    /// Seed a symlink at `link` pointing at `target`, creating missing parents.
    pub fn add_symlink(&self, link: impl AsRef<Path>, target: impl AsRef<Path>) -> &Self {
        let link = link.as_ref();
        let entry = Entry::Symlink(target.as_ref().to_path_buf());
        if let Err(e) = self.insert_with_parents(link, entry) {
            panic!("MemoryFs::add_symlink({}): {e}", link.display());
        }
        self
    }

    /// Mutations performed through the [`FileSystem`] trait, in order.
    pub fn operations(&self) -> Vec<Operation> {
        self.operations.borrow().clone()
    }

    /// Forget recorded operations, keeping the tree.
    pub fn clear_operations(&self) {
        self.operations.borrow_mut().clear();
    }

    fn insert_with_parents(&self, path: &Path, entry: Entry) -> Result<()> {
        let path = clean(path);
        let (parent, name) = split(&path)?;
        self.make_dirs(&parent)?;
        let key = self.resolve(&parent, true)?.join(name);
        self.entries.borrow_mut().insert(key, entry);
        Ok(())
    }

    /// Create every missing directory along `path`. Returns whether anything was created.
    fn make_dirs(&self, path: &Path) -> Result<bool> {
        let path = clean(path);
        let mut created = false;
        let mut prefix = PathBuf::new();
        for component in path.components() {
            prefix.push(component.as_os_str());
            if matches!(component, Component::RootDir | Component::Prefix(_)) {
                continue;
            }
            if self.exists(&prefix) {
                if !self.is_dir(&prefix) {
                    return Err(Error::NotADirectory { path: prefix });
                }
                continue;
            }
            if self.lookup_nofollow(&prefix).is_some() {
                // A dangling symlink occupies the name.
                return Err(Error::AlreadyExists { path: prefix });
            }
            let (parent, name) = split(&prefix)?;
            let key = self.resolve(&parent, true)?.join(name);
            self.entries.borrow_mut().insert(key, Entry::Dir);
            created = true;
        }
        Ok(created)
    }

    /// Resolve `path` to the key of its real entry.
    ///
    /// Intermediate symlinks are always followed; the final component only
    /// when `follow_last` is set. `..` is applied to the entry reached so
    /// far, after any symlink before it has been followed.
    fn resolve(&self, path: &Path, follow_last: bool) -> Result<PathBuf> {
        if !path.has_root() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        let entries = self.entries.borrow();
        let mut pending: VecDeque<OsString> = segments(path).into();
        let mut current = PathBuf::from("/");
        let mut hops = 0;

        while let Some(segment) = pending.pop_front() {
            if segment == ".." {
                current.pop();
                continue;
            }
            let candidate = current.join(&segment);
            match entries.get(&candidate) {
                Some(Entry::Symlink(target)) if follow_last || !pending.is_empty() => {
                    hops += 1;
                    if hops > MAX_SYMLINK_HOPS {
                        return Err(Error::SymlinkLoop {
                            path: path.to_path_buf(),
                        });
                    }
                    if target.has_root() {
                        current = PathBuf::from("/");
                    }
                    for part in segments(target).into_iter().rev() {
                        pending.push_front(part);
                    }
                }
                Some(Entry::File) if !pending.is_empty() => {
                    return Err(Error::NotADirectory { path: candidate });
                }
                Some(_) => current = candidate,
                None => {
                    return Err(Error::NotFound {
                        path: path.to_path_buf(),
                    });
                }
            }
        }
        Ok(current)
    }

    fn lookup(&self, path: &Path) -> Option<Entry> {
        let key = self.resolve(path, true).ok()?;
        self.entries.borrow().get(&key).cloned()
    }

    fn lookup_nofollow(&self, path: &Path) -> Option<Entry> {
        let key = self.resolve(path, false).ok()?;
        self.entries.borrow().get(&key).cloned()
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lookup(path) == Some(Entry::Dir)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        matches!(self.lookup_nofollow(path), Some(Entry::Symlink(_)))
    }

    fn same_entry(&self, a: &Path, b: &Path) -> Result<bool> {
        match (self.resolve(a, true), self.resolve(b, true)) {
            (Ok(a), Ok(b)) => Ok(a == b),
            (Err(Error::SymlinkLoop { path }), _) | (_, Err(Error::SymlinkLoop { path })) => {
                Err(Error::SymlinkLoop { path })
            }
            _ => Ok(false),
        }
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        self.resolve(path, true)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if self.make_dirs(path)? {
            self.operations
                .borrow_mut()
                .push(Operation::CreateDir(clean(path)));
        }
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        let link = clean(link);
        if self.lookup_nofollow(&link).is_some() {
            return Err(Error::AlreadyExists { path: link });
        }
        let (parent, name) = split(&link)?;
        if !self.is_dir(&parent) {
            return Err(Error::NotFound { path: parent });
        }
        let key = self.resolve(&parent, true)?.join(name);
        self.entries
            .borrow_mut()
            .insert(key, Entry::Symlink(target.to_path_buf()));
        self.operations.borrow_mut().push(Operation::Symlink {
            target: target.to_path_buf(),
            link,
        });
        Ok(())
    }
}

fn split(path: &Path) -> Result<(PathBuf, OsString)> {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => Ok((parent.to_path_buf(), name.to_os_string())),
        _ => Err(Error::AlreadyExists {
            path: path.to_path_buf(),
        }),
    }
}

/// Named segments of `path`, keeping `..` so it is applied during resolution.
fn segments(path: &Path) -> Vec<OsString> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_os_string()),
            Component::ParentDir => Some(OsString::from("..")),
            _ => None,
        })
        .collect()
}

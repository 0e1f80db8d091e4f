//! The root of a schema and whole-tree validation

use std::path::Path;
use std::sync::Arc;

use dirmodel_fs::{FileSystem, RealFs};

use crate::{Change, Config, Error, Result, SchemaNode, Validator};

/// Top-level declarations plus the policy they all share.
#[derive(Debug, Clone)]
pub struct SchemaTree {
    pub roots: Vec<SchemaNode>,
    pub config: Arc<Config>,
}

impl SchemaTree {
    pub fn new(roots: Vec<SchemaNode>, config: Config) -> Self {
        Self {
            roots,
            config: Arc::new(config),
        }
    }

    /// Validate against the real filesystem, relative to the working directory.
    pub fn validate(self) -> Result<ValidatedTree> {
        let base = std::env::current_dir().map_err(Error::WorkingDirectory)?;
        self.validate_with(&RealFs, &base)
    }

    /// Validate every root in declaration order.
    ///
    /// Roots are resolved against `base_dir`. Every node ends up sharing this
    /// tree's [`Config`]. Validation stops at the first failing node; roots
    /// declared after it are not visited.
    pub fn validate_with<F: FileSystem + ?Sized>(
        self,
        fs: &F,
        base_dir: &Path,
    ) -> Result<ValidatedTree> {
        let base_dir = std::path::absolute(base_dir).map_err(Error::WorkingDirectory)?;
        let total: usize = self.roots.iter().map(SchemaNode::node_count).sum();
        tracing::debug!(base = %base_dir.display(), nodes = total, "validating schema tree");

        let mut validator = Validator::new(fs);
        let mut roots = Vec::with_capacity(self.roots.len());
        for root in self.roots {
            let root = root.with_config(Arc::clone(&self.config));
            roots.push(validator.validate(root, &base_dir)?);
        }

        Ok(ValidatedTree {
            roots,
            config: self.config,
            changes: validator.into_changes(),
        })
    }
}

/// A tree that passed validation, with the changes it took to get there.
#[derive(Debug, Clone)]
pub struct ValidatedTree {
    roots: Vec<SchemaNode>,
    config: Arc<Config>,
    changes: Vec<Change>,
}

impl ValidatedTree {
    pub fn roots(&self) -> &[SchemaNode] {
        &self.roots
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Directories and symlinks created, in creation order.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Every node, parents before children.
    pub fn nodes(&self) -> impl Iterator<Item = &SchemaNode> {
        let mut stack: Vec<&SchemaNode> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

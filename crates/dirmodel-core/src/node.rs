//! Declared filesystem entries

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::{Config, TriStateFlag};

/// One declared file or directory.
///
/// Field names in schema documents: `name`, `is_dir`, `description`,
/// `exists`, `resolve`, `children` and `path`. The policy is never part of a
/// node declaration; it is handed down from the tree during validation.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaNode {
    /// File or directory name, relative to the parent (or the base directory for roots).
    pub name: String,

    /// `None` when not declared. Nodes with children are promoted to `Some(true)`.
    #[serde(default, rename = "is_dir")]
    pub is_directory: Option<bool>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "exists")]
    pub must_exist: TriStateFlag,

    /// Where this entry must resolve to when it is a symlink.
    #[serde(default, rename = "resolve")]
    pub symlink_target: Option<PathBuf>,

    #[serde(default)]
    pub children: Vec<SchemaNode>,

    /// Absolute path; computed from `name` when absent, checked when given.
    #[serde(default, rename = "path")]
    pub resolved_path: Option<PathBuf>,

    #[serde(skip)]
    pub config: Arc<Config>,
}

impl SchemaNode {
    /// A node with nothing but a name. Its kind is left undeclared.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: None,
            description: None,
            must_exist: TriStateFlag::default(),
            symlink_target: None,
            children: Vec::new(),
            resolved_path: None,
            config: Arc::default(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            is_directory: Some(false),
            ..Self::new(name)
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            is_directory: Some(true),
            ..Self::new(name)
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_must_exist(mut self, must_exist: impl Into<TriStateFlag>) -> Self {
        self.must_exist = must_exist.into();
        self
    }

    pub fn with_symlink_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.symlink_target = Some(target.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.resolved_path = Some(path.into());
        self
    }

    pub fn with_config(mut self, config: Arc<Config>) -> Self {
        self.config = config;
        self
    }

    /// Whether this node is (or was promoted to) a directory.
    pub fn is_dir(&self) -> bool {
        self.is_directory == Some(true)
    }

    pub fn path(&self) -> Option<&Path> {
        self.resolved_path.as_deref()
    }

    /// Rebuild `child` as a child of this node.
    ///
    /// The child's path is forced under this node's path and it shares this
    /// node's policy; a path the child declared itself is discarded.
    pub(crate) fn adopt(&self, parent_path: &Path, child: SchemaNode) -> SchemaNode {
        if let Some(declared) = &child.resolved_path {
            tracing::debug!(
                child = %child.name,
                declared = %declared.display(),
                "ignoring path declared on child node"
            );
        }
        let must_exist = child.must_exist.propagated_from(&self.must_exist);
        SchemaNode {
            resolved_path: Some(parent_path.join(&child.name)),
            config: Arc::clone(&self.config),
            must_exist,
            ..child
        }
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SchemaNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TriState;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_defaults() {
        let node: SchemaNode = serde_yaml::from_str("name: src").unwrap();

        assert_eq!(node.name, "src");
        assert_eq!(node.is_directory, None);
        assert_eq!(node.description, None);
        assert_eq!(node.must_exist, TriStateFlag::default());
        assert!(node.must_exist == false);
        assert_eq!(node.must_exist.initial_value(), TriState::False);
        assert!(!node.must_exist.is_declared());
        assert_eq!(node.symlink_target, None);
        assert!(node.children.is_empty());
        assert_eq!(node.resolved_path, None);
        assert_eq!(*node.config, Config::default());
    }

    #[test]
    fn test_deserialize_full_declaration() {
        let yaml = r#"
name: assets
is_dir: true
description: Shared assets
exists: true
resolve: /srv/assets
path: /work/assets
children:
  - name: logo.png
"#;
        let node: SchemaNode = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(node.is_directory, Some(true));
        assert_eq!(node.description.as_deref(), Some("Shared assets"));
        assert!(node.must_exist.is_truthy());
        assert_eq!(node.symlink_target, Some(PathBuf::from("/srv/assets")));
        assert_eq!(node.resolved_path, Some(PathBuf::from("/work/assets")));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].name, "logo.png");
    }

    #[test]
    fn test_adopt_forces_path_and_shares_config() {
        let config = Arc::new(Config::check_only());
        let parent = SchemaNode::dir("root").with_config(Arc::clone(&config));
        let child = SchemaNode::file("a.txt").with_path("/elsewhere/a.txt");

        let adopted = parent.adopt(Path::new("/work/root"), child);

        assert_eq!(adopted.path(), Some(Path::new("/work/root/a.txt")));
        assert!(Arc::ptr_eq(&adopted.config, &config));
    }

    #[test]
    fn test_node_count_covers_subtree() {
        let node = SchemaNode::dir("a").with_children([
            SchemaNode::file("b"),
            SchemaNode::dir("c").with_children([SchemaNode::file("d")]),
        ]);
        assert_eq!(node.node_count(), 4);
    }
}

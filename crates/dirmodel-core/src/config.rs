//! Validation policy

use serde::{Deserialize, Serialize};

/// What validation may do on its own when something is missing.
///
/// Declared once at the top of a schema document under `config` and shared,
/// unchanged, by every node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Create directories that are declared but missing.
    #[serde(rename = "mkdir")]
    pub create_missing_directories: bool,

    /// Create symlinks that are declared but missing.
    #[serde(rename = "mksymlink")]
    pub create_missing_symlinks: bool,

    /// Reserved. Accepted in schema documents but not consulted by any check.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_missing_directories: true,
            create_missing_symlinks: true,
            strict: false,
        }
    }
}

impl Config {
    /// A policy that only checks and never touches the filesystem.
    pub fn check_only() -> Self {
        Self {
            create_missing_directories: false,
            create_missing_symlinks: false,
            ..Self::default()
        }
    }
}

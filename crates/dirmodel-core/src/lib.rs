//! Directory schema model and validation engine.
//!
//! A [`SchemaTree`] declares which files, directories and symlinks must exist
//! under a base directory. Validating it walks every [`SchemaNode`] depth
//! first, checks the declaration against the filesystem and, depending on the
//! [`Config`] policy, creates missing directories and symlinks.
//!
//! ```rust,no_run
//! use dirmodel_core::{RenderStyle, load_schema};
//! use dirmodel_fs::RealFs;
//!
//! let tree = load_schema("paths.yml")?;
//! let validated = tree.validate()?;
//! println!("{}", validated.render(&RealFs, RenderStyle::Plain));
//! # Ok::<(), dirmodel_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod flag;
pub mod loader;
pub mod node;
pub mod report;
pub mod tree;
pub mod validate;

pub use config::Config;
pub use error::{EntryKind, Error, Result};
pub use flag::{TriState, TriStateFlag};
pub use loader::{load_schema, parse_schema, render_template};
pub use node::SchemaNode;
pub use report::RenderStyle;
pub use tree::{SchemaTree, ValidatedTree};
pub use validate::{Change, Validator};

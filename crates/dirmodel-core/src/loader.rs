//! Loading schema documents
//!
//! A schema document is YAML text that is first rendered as a template:
//! every `{{ NAME }}` placeholder is replaced with the environment variable
//! `NAME`. Any other template syntax (`{{ X | filter }}`, `{% ... %}`) is
//! rejected rather than copied into path names. The result must be a mapping with a `paths` list of node
//! declarations and an optional `config` policy.
//!
//! ```yaml
//! config:
//!   mkdir: true
//! paths:
//!   - name: "{{ PROJECT }}"
//!     is_dir: true
//!     children:
//!       - name: data
//!         resolve: "{{ DATA_ROOT }}/shared"
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::{Config, Error, Result, SchemaNode, SchemaTree};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

static LEFTOVER_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{|\{%").unwrap());

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    paths: Vec<SchemaNode>,
    #[serde(default)]
    config: Config,
}

/// Replace `{{ NAME }}` placeholders using `lookup`.
///
/// Undefined names render as an empty string.
pub fn render_template<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            lookup(name).unwrap_or_else(|| {
                tracing::warn!("Undefined template variable: {}", name);
                String::new()
            })
        })
        .into_owned()
}

/// Parse already-rendered schema text. `origin` is only used in error messages.
///
/// Fails with [`Error::Parse`] if template syntax survived rendering.
pub fn parse_schema(text: &str, origin: &Path) -> Result<SchemaTree> {
    reject_leftover_tags(text, origin)?;
    let document: SchemaDocument = serde_yaml::from_str(text).map_err(|e| Error::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(
        path = %origin.display(),
        roots = document.paths.len(),
        "loaded schema"
    );
    Ok(SchemaTree::new(document.paths, document.config))
}

fn reject_leftover_tags(text: &str, origin: &Path) -> Result<()> {
    let Some(found) = LEFTOVER_TAG.find(text) else {
        return Ok(());
    };
    let line_number = text[..found.start()].matches('\n').count() + 1;
    let line = text.lines().nth(line_number - 1).unwrap_or_default().trim();
    Err(Error::Parse {
        path: origin.to_path_buf(),
        message: format!("unsupported template syntax on line {line_number}: {line}"),
    })
}

/// Read a schema file, render it against the process environment and parse it.
pub fn load_schema(path: impl AsRef<Path>) -> Result<SchemaTree> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let rendered = render_template(&text, |name| std::env::var(name).ok());
    parse_schema(&rendered, path)
}

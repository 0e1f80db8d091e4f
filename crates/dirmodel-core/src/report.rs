//! Human-readable rendering of a validated tree

use colored::Colorize;
use dirmodel_fs::FileSystem;

use crate::{SchemaNode, ValidatedTree};

/// Heading printed above the tree.
pub const TITLE: &str = "Project Structure";

/// How entries are marked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Directories bold blue, files blue, missing entries dimmed.
    #[default]
    Color,
    /// No escape codes; missing entries are suffixed with `(missing)`.
    Plain,
}

impl ValidatedTree {
    /// Render the tree, checking `fs` for which entries currently exist.
    ///
    /// Nothing is validated or modified.
    pub fn render<F: FileSystem + ?Sized>(&self, fs: &F, style: RenderStyle) -> String {
        let mut out = String::from(TITLE);
        out.push('\n');
        render_level(&mut out, fs, self.roots(), "", style);
        out
    }
}

fn render_level<F: FileSystem + ?Sized>(
    out: &mut String,
    fs: &F,
    nodes: &[SchemaNode],
    prefix: &str,
    style: RenderStyle,
) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&label(fs, node, style));
        out.push('\n');

        let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_level(out, fs, &node.children, &nested, style);
    }
}

fn label<F: FileSystem + ?Sized>(fs: &F, node: &SchemaNode, style: RenderStyle) -> String {
    let missing = !node.path().is_some_and(|path| fs.exists(path));
    let name = if node.is_dir() {
        format!("{}/", node.name)
    } else {
        node.name.clone()
    };
    let description = node
        .description
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default();

    match style {
        RenderStyle::Plain => {
            let marker = if missing { " (missing)" } else { "" };
            format!("{name}{description}{marker}")
        }
        RenderStyle::Color => {
            let mut name = name.blue();
            let mut description = description.normal();
            if node.is_dir() {
                name = name.bold();
            }
            if missing {
                name = name.dimmed();
                description = description.dimmed();
            }
            format!("{name}{description}")
        }
    }
}

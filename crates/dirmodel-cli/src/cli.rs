//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Validate a directory layout against a schema, creating what is missing
#[derive(Parser, Debug)]
#[command(name = "dirmodel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Schema document describing the expected layout
    #[arg(default_value = "paths.yml")]
    pub schema: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the tree without colors
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_schema_defaults_to_paths_yml() {
        let cli = Cli::parse_from(["dirmodel"]);
        assert_eq!(cli.schema, PathBuf::from("paths.yml"));
        assert!(!cli.verbose);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["dirmodel", "layout.yml", "-v", "--no-color"]);
        assert_eq!(cli.schema, PathBuf::from("layout.yml"));
        assert!(cli.verbose);
        assert!(cli.no_color);
    }
}

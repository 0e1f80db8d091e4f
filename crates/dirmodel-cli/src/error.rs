//! Error types for dirmodel-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Loading or validating the schema failed
    #[error(transparent)]
    Core(#[from] dirmodel_core::Error),

    /// A global tracing subscriber was already installed
    #[error("Failed to set up logging: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

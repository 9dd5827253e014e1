/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Aggregation failed.
    #[error(transparent)]
    Config(#[from] bundle_config::Error),

    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

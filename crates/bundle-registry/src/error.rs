/// Errors that can occur in the extension registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to parse an extension manifest TOML file.
    #[error("failed to parse extension manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// I/O error reading extension files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;

/// Result type for aggregator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while aggregating bundle configuration.
///
/// Only [`Error::ExtensionNotFound`] is recoverable by the caller (treat as
/// "feature absent"). Everything else aborts the whole load: there is no
/// partial or degraded aggregation state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An extension name or compound object key did not resolve.
    #[error("extension not found: {0}")]
    ExtensionNotFound(String),

    /// A configuration file exists but is not well-formed XML.
    #[error("failed to parse {file}: {source}")]
    Xml {
        file: PathBuf,
        source: roxmltree::Error,
    },

    /// A fragment parsed but could not be imported.
    #[error("cannot import configuration {file} of extension {extension}")]
    Import {
        file: PathBuf,
        extension: String,
        source: ImportError,
    },

    /// The boot fixed-point exceeded the sweep cap.
    #[error(
        "cannot boot bundle configuration, sweep cap hit after {sweeps} sweeps; \
         reboots triggered by: {history:?}"
    )]
    BootDiverged {
        sweeps: usize,
        history: Vec<String>,
    },

    /// Error from the extension registry (e.g. a malformed manifest).
    #[error(transparent)]
    Registry(#[from] bundle_registry::Error),

    /// Standard I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A semantic failure while importing one configuration fragment.
///
/// Kept separate from [`Error::Xml`] so callers can distinguish a file that
/// is not well-formed XML from a fragment whose content is invalid. Custom
/// [`ExtensionConfig`](crate::ExtensionConfig) implementations use
/// [`ImportError::Other`] for their own failures.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// A child element is missing a required attribute.
    #[error("element <{element}> is missing required attribute `{attribute}`")]
    MissingAttribute { element: String, attribute: String },

    /// An attribute carries a value the importer cannot interpret.
    #[error("invalid value `{value}` for {what}")]
    InvalidValue { what: String, value: String },

    /// Free-form import failure from a custom configuration object.
    #[error("{0}")]
    Other(String),
}

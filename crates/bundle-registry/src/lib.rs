//! Extension registry for the bundle configuration system.
//!
//! This crate provides the pieces the configuration aggregator needs to talk
//! about installed extensions: a filesystem-backed [`ExtensionHandle`], the
//! [`ExtensionRegistry`] that resolves loose names to handles, the name
//! normalization rules applied at every lookup boundary, and the optional
//! per-extension [`ExtensionManifest`] carrying package metadata.

pub mod error;
pub mod handle;
pub mod manifest;
pub mod normalize;
pub mod registry;

/// The canonical filename for extension manifest files.
///
/// Extensions may place a file with this name at their root to declare
/// package and dependency metadata. Its absence is not an error.
pub const MANIFEST_FILENAME: &str = "extension.toml";

pub use error::Error;
pub use handle::ExtensionHandle;
pub use manifest::{ExtensionManifest, ExtensionMeta};
pub use normalize::{normalize_name, normalize_object_key};
pub use registry::ExtensionRegistry;

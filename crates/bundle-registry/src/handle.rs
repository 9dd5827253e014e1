use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::manifest::ExtensionManifest;
use crate::normalize::normalize_name;

/// An installed extension known to the registry.
///
/// Carries the raw registered name (kept for diagnostics and external
/// serialization) and the extension's filesystem root, under which its
/// configuration files and optional manifest live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionHandle {
    name: String,
    root: PathBuf,
}

impl ExtensionHandle {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// The raw name this extension was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized lookup key for this extension.
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// The extension's filesystem root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the extension's manifest, if one exists at its root.
    pub fn manifest(&self) -> Result<Option<ExtensionManifest>> {
        ExtensionManifest::load(&self.root)
    }
}

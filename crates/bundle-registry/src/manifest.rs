//! Extension manifest parsing for `extension.toml` files.
//!
//! An extension manifest declares package and dependency metadata for one
//! installed extension. The canonical filename is
//! [`MANIFEST_FILENAME`](crate::MANIFEST_FILENAME) (`extension.toml`) at the
//! extension root. The manifest is optional; a missing file loads as `None`.
//!
//! # Example TOML
//!
//! ```toml
//! [extension]
//! name = "blog"
//! version = "1.2.0"
//! description = "Blog posts and categories"
//!
//! [dependencies]
//! comments = ">=1.0"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::MANIFEST_FILENAME;
use crate::error::Result;

/// Package and dependency metadata loaded from `extension.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtensionManifest {
    /// Core extension metadata.
    pub extension: ExtensionMeta,
    /// Dependencies on other extensions, name to version requirement.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// Basic metadata about an extension.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtensionMeta {
    /// Extension name (e.g., "blog").
    pub name: String,
    /// Version string.
    pub version: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ExtensionManifest {
    /// Load the manifest from an extension root directory.
    ///
    /// Returns `Ok(None)` when no manifest file exists. A file that exists
    /// but does not parse is an error.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = root.join(MANIFEST_FILENAME);
        if !path.is_file() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(toml::from_str(&raw)?))
    }

    /// Render the manifest as a JSON value for the aggregate serialization.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

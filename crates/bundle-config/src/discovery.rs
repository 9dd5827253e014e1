//! Configuration file discovery.
//!
//! Each extension keeps its configuration under `<root>/Resources/config/`:
//! a base `jarves.xml` followed by any number of `jarves.*.xml` extras. A
//! missing directory or base file is not an error — an extension without
//! configuration simply contributes nothing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use sha2::{Digest, Sha256};

use crate::error::Result;

/// Directory below an extension root holding its configuration files.
pub const CONFIG_DIR: &str = "Resources/config";

/// The base configuration file name.
pub const BASE_FILE: &str = "jarves.xml";

/// Discover the configuration files of one extension.
///
/// Returns the base file first (when present), then every extra file
/// matching `jarves.*.xml` sorted by file name for deterministic order.
pub fn config_files(root: &Path) -> Vec<PathBuf> {
    let dir = root.join(CONFIG_DIR);

    let mut files = Vec::new();
    let base = dir.join(BASE_FILE);
    if base.is_file() {
        files.push(base);
    }

    let Ok(entries) = fs::read_dir(&dir) else {
        return files;
    };
    let mut extras: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_extra_config(path))
        .collect();
    extras.sort();
    files.extend(extras);

    files
}

fn is_extra_config(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name != BASE_FILE && name.starts_with("jarves.") && name.ends_with(".xml")
}

/// Fingerprint of one extension's configuration files for external cache
/// invalidation.
///
/// Hashes the modification timestamps of every discovered file, so the
/// fingerprint changes whenever a file is touched, added or removed.
pub fn config_hash(root: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    for file in config_files(root) {
        let modified = fs::metadata(&file)?.modified()?;
        let stamp = modified.duration_since(UNIX_EPOCH).unwrap_or_default();
        hasher.update(stamp.as_secs().to_le_bytes());
        hasher.update(stamp.subsec_nanos().to_le_bytes());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

//! Command implementations.

use std::fs;
use std::path::Path;

use bundle_config::{Configs, Error as ConfigError, discovery};
use bundle_registry::{ExtensionHandle, ExtensionRegistry};

use crate::error::Result;

/// Build a registry from a directory holding one subdirectory per installed
/// extension. The directory name is the extension name.
pub fn registry_from_root(root: &Path) -> Result<ExtensionRegistry> {
    let mut registry = ExtensionRegistry::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            let name = entry.file_name().to_string_lossy().into_owned();
            registry.register(ExtensionHandle::new(name, entry.path()));
        }
    }
    Ok(registry)
}

pub fn run_dump(root: &Path, extensions: &[String]) -> Result<()> {
    let registry = registry_from_root(root)?;
    let names: Vec<String> = if extensions.is_empty() {
        registry.names()
    } else {
        extensions.to_vec()
    };
    tracing::debug!(count = names.len(), "aggregating extensions");

    let mut configs = Configs::new(registry);
    configs.load_bundles(&names)?;
    configs.boot()?;
    println!("{}", serde_json::to_string_pretty(&configs.to_value())?);
    Ok(())
}

pub fn run_hash(root: &Path, name: &str) -> Result<()> {
    let registry = registry_from_root(root)?;
    let handle = registry
        .resolve(name)
        .ok_or_else(|| ConfigError::ExtensionNotFound(name.to_string()))?;
    println!("{}", discovery::config_hash(handle.root())?);
    Ok(())
}

pub fn run_files(root: &Path, name: &str) -> Result<()> {
    let registry = registry_from_root(root)?;
    let handle = registry
        .resolve(name)
        .ok_or_else(|| ConfigError::ExtensionNotFound(name.to_string()))?;
    for file in discovery::config_files(handle.root()) {
        println!("{}", file.display());
    }
    Ok(())
}

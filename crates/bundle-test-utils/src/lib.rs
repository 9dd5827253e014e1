//! Shared test utilities for the bundle configuration workspace.
//!
//! Provides fixture builders that materialize extension trees in temporary
//! directories, so crate test suites do not hand-roll filesystem setup. This
//! crate is a dev-dependency only and is never published.

use std::fs;
use std::path::Path;

use bundle_registry::{ExtensionHandle, ExtensionRegistry, MANIFEST_FILENAME};
use tempfile::TempDir;

/// Builder describing one extension fixture: its name, configuration files
/// and optional manifest.
#[derive(Debug, Clone)]
pub struct TestExtension {
    name: String,
    config_files: Vec<(String, String)>,
    manifest: Option<String>,
}

impl TestExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_files: Vec::new(),
            manifest: None,
        }
    }

    /// Add a configuration file under `Resources/config/`.
    pub fn config_file(mut self, file_name: impl Into<String>, xml: impl Into<String>) -> Self {
        self.config_files.push((file_name.into(), xml.into()));
        self
    }

    /// Add an `extension.toml` manifest at the extension root.
    pub fn manifest(mut self, toml: impl Into<String>) -> Self {
        self.manifest = Some(toml.into());
        self
    }

    /// Write the fixture below `parent` and return its handle.
    ///
    /// The extension root is `<parent>/<name>`.
    pub fn write_to(&self, parent: &Path) -> ExtensionHandle {
        let root = parent.join(&self.name);
        let config_dir = root.join("Resources/config");
        fs::create_dir_all(&config_dir).expect("create extension config dir");
        for (file_name, xml) in &self.config_files {
            fs::write(config_dir.join(file_name), xml).expect("write config file");
        }
        if let Some(manifest) = &self.manifest {
            fs::write(root.join(MANIFEST_FILENAME), manifest).expect("write manifest");
        }
        ExtensionHandle::new(&self.name, root)
    }
}

/// A temp-dir-backed collection of extension fixtures with a registry over
/// them.
pub struct TestWorld {
    root: TempDir,
    registry: ExtensionRegistry,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp root"),
            registry: ExtensionRegistry::new(),
        }
    }

    /// Materialize an extension fixture and register it.
    pub fn add(&mut self, extension: TestExtension) -> ExtensionHandle {
        let handle = extension.write_to(self.root.path());
        self.registry.register(handle.clone());
        handle
    }

    /// Register a handle without creating files (an "installed but bare"
    /// extension).
    pub fn register_bare(&mut self, name: &str) -> ExtensionHandle {
        let handle = ExtensionHandle::new(name, self.root.path().join(name));
        self.registry.register(handle.clone());
        handle
    }

    /// A clone of the registry over all added extensions.
    pub fn registry(&self) -> ExtensionRegistry {
        self.registry.clone()
    }

    /// The temp root holding every extension.
    pub fn root(&self) -> &Path {
        self.root.path()
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

//! Registry of installed extensions.

use std::collections::HashMap;

use crate::handle::ExtensionHandle;
use crate::normalize::normalize_name;

/// Registry resolving loose extension names to installed extensions.
///
/// Handles are keyed by their normalized name, so `resolve` accepts short,
/// suffixed or fully qualified spellings interchangeably.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    entries: HashMap<String, ExtensionHandle>,
}

impl ExtensionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an extension handle, replacing any handle with the same key.
    pub fn register(&mut self, handle: ExtensionHandle) {
        self.entries.insert(handle.key(), handle);
    }

    /// Resolve an extension by name in any accepted spelling.
    pub fn resolve(&self, name: &str) -> Option<&ExtensionHandle> {
        self.entries.get(&normalize_name(name))
    }

    /// Check whether an extension is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// List all registered extension names (raw spelling, sorted).
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .values()
            .map(|handle| handle.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(name: &str) -> ExtensionHandle {
        ExtensionHandle::new(name, format!("/ext/{name}"))
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = ExtensionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn resolves_any_spelling() {
        let mut registry = ExtensionRegistry::new();
        registry.register(handle("BlogBundle"));

        for spelling in ["blog", "Blog", "BlogBundle", r"Vendor\Blog\BlogBundle"] {
            let resolved = registry.resolve(spelling);
            assert_eq!(
                resolved.map(ExtensionHandle::name),
                Some("BlogBundle"),
                "spelling {spelling:?} should resolve"
            );
        }
    }

    #[test]
    fn unknown_extension_returns_none() {
        let mut registry = ExtensionRegistry::new();
        registry.register(handle("blog"));
        assert!(registry.resolve("comments").is_none());
        assert!(!registry.contains("comments"));
    }

    #[test]
    fn register_replaces_same_key() {
        let mut registry = ExtensionRegistry::new();
        registry.register(ExtensionHandle::new("blog", "/first"));
        registry.register(ExtensionHandle::new("BlogBundle", "/second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve("blog").unwrap().root(),
            std::path::Path::new("/second")
        );
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = ExtensionRegistry::new();
        registry.register(handle("comments"));
        registry.register(handle("blog"));
        assert_eq!(registry.names(), vec!["blog", "comments"]);
    }
}

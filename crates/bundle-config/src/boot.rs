//! Boot pass context: catalog snapshot and reboot ledger.

use std::collections::BTreeSet;

use bundle_registry::normalize_object_key;

/// Snapshot of the aggregate catalog taken at the start of one boot pass.
///
/// A config booting mid-sweep sees the catalog as it was at pass start;
/// anything added during the sweep becomes visible on the next pass, which
/// is exactly what the reboot signal exists for.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    objects: BTreeSet<String>,
    content_types: BTreeSet<String>,
    field_types: BTreeSet<String>,
}

impl Catalog {
    pub fn add_object(&mut self, key: &str) {
        self.objects.insert(normalize_object_key(key));
    }

    pub fn add_content_type(&mut self, id: &str) {
        self.content_types.insert(id.to_string());
    }

    pub fn add_field_type(&mut self, id: &str) {
        self.field_types.insert(id.to_string());
    }
}

/// Context handed to every [`ExtensionConfig::boot`](crate::ExtensionConfig::boot)
/// call during one sweep.
///
/// The reboot ledger starts empty on every pass; a non-empty ledger after a
/// full sweep triggers another sweep over all configs.
#[derive(Debug)]
pub struct BootContext {
    catalog: Catalog,
    pass: usize,
    reboots: Vec<String>,
}

impl BootContext {
    pub(crate) fn new(catalog: Catalog, pass: usize) -> Self {
        Self {
            catalog,
            pass,
            reboots: Vec::new(),
        }
    }

    /// Request another sweep, naming the reason for diagnostics.
    ///
    /// An empty reason is recorded as `n/a`.
    pub fn add_reboot(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        let reason = if reason.is_empty() {
            "n/a".to_string()
        } else {
            reason
        };
        tracing::warn!(pass = self.pass, reason = %reason, "reboot requested");
        self.reboots.push(reason);
    }

    /// Whether an object key was in the catalog at pass start.
    pub fn has_object(&self, key: &str) -> bool {
        self.catalog.objects.contains(&normalize_object_key(key))
    }

    /// Whether a content type id was in the catalog at pass start.
    pub fn has_content_type(&self, id: &str) -> bool {
        self.catalog.content_types.contains(id)
    }

    /// Whether a field type id was in the catalog at pass start.
    pub fn has_field_type(&self, id: &str) -> bool {
        self.catalog.field_types.contains(id)
    }

    /// The current pass number, starting at 0.
    pub fn pass(&self) -> usize {
        self.pass
    }

    pub(crate) fn into_reboots(self) -> Vec<String> {
        self.reboots
    }
}

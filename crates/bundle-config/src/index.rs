//! Fragment index: owner key x priority x source file.
//!
//! Every discovered `<bundle>` element lands here before the merge. Buckets
//! are keyed by the owning extension's normalized key and the fragment's
//! priority; within a bucket, fragments keep discovery order and the source
//! file path is the de-duplication key.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bundle_registry::{ExtensionHandle, ExtensionRegistry, normalize_name};

use crate::discovery;
use crate::element::{self, Element};
use crate::error::{Error, Result};

/// One `<bundle>` element together with the file it came from.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Path of the originating configuration file.
    pub file: PathBuf,
    /// The parsed `<bundle>` element.
    pub element: Element,
}

/// Index of configuration fragments across all requested extensions.
///
/// Owners keep the order in which they were first touched, so the merge
/// creates and iterates configuration objects in request/encounter order.
/// Only the priorities within one owner are sorted.
#[derive(Debug, Default)]
pub struct FragmentIndex {
    // owners in first-touch order; priority -> fragments in discovery order
    entries: Vec<(String, BTreeMap<i64, Vec<Fragment>>)>,
}

impl FragmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fragment under `(owner, priority, file)`.
    ///
    /// Inserting the same triple again replaces the element in place; the
    /// bucket position of the original insertion is kept.
    pub fn insert(&mut self, owner: &str, priority: i64, file: &Path, element: Element) {
        let key = normalize_name(owner);
        let position = match self.entries.iter().position(|(existing, _)| *existing == key) {
            Some(position) => position,
            None => {
                self.entries.push((key, BTreeMap::new()));
                self.entries.len() - 1
            }
        };
        let bucket = self.entries[position].1.entry(priority).or_default();
        if let Some(existing) = bucket.iter_mut().find(|fragment| fragment.file == file) {
            existing.element = element;
        } else {
            bucket.push(Fragment {
                file: file.to_path_buf(),
                element,
            });
        }
    }

    /// Discover, parse and index every configuration fragment of one
    /// extension.
    ///
    /// A `<bundle>` element with a `name` attribute redirects ownership to
    /// that extension; if the named extension is not registered the element
    /// is skipped. A file that exists but is not well-formed XML aborts the
    /// whole load.
    pub fn index_extension(
        &mut self,
        handle: &ExtensionHandle,
        registry: &ExtensionRegistry,
    ) -> Result<()> {
        for file in discovery::config_files(handle.root()) {
            let Ok(source) = fs::read_to_string(&file) else {
                tracing::debug!(file = %file.display(), "skipping unreadable config file");
                continue;
            };
            if source.trim().is_empty() {
                continue;
            }
            let root = element::parse_document(&source).map_err(|source| Error::Xml {
                file: file.clone(),
                source,
            })?;

            for bundle in element::bundle_elements(&root) {
                let owner = match bundle.attr("name") {
                    Some(name) => match registry.resolve(name) {
                        Some(target) => target.name().to_string(),
                        None => {
                            tracing::debug!(
                                file = %file.display(),
                                target = name,
                                "skipping fragment for unknown extension"
                            );
                            continue;
                        }
                    },
                    None => handle.name().to_string(),
                };
                let priority = fragment_priority(bundle, &file);
                self.insert(&owner, priority, &file, bundle.clone());
            }
        }
        Ok(())
    }

    /// Iterate fragments in import order: owners in first-touch order, then
    /// ascending priority, then discovery order within each bucket.
    pub fn import_order(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.entries.iter().flat_map(|(owner, priorities)| {
            priorities
                .values()
                .flatten()
                .map(move |fragment| (owner.as_str(), fragment))
        })
    }

    /// Priorities recorded for one owner, ascending.
    pub fn priorities(&self, owner: &str) -> Vec<i64> {
        let key = normalize_name(owner);
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, priorities)| priorities.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of indexed fragments.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|(_, priorities)| priorities.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether the index holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn fragment_priority(bundle: &Element, file: &Path) -> i64 {
    match bundle.attr("priority") {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                file = %file.display(),
                priority = raw,
                "non-numeric priority attribute, using 0"
            );
            0
        }),
        None => 0,
    }
}

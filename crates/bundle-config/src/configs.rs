//! The configuration aggregator.
//!
//! [`Configs`] owns one configuration object per loaded extension, built by
//! merging indexed fragments in priority order and finalized by the boot
//! fixed-point. Aggregation is all-or-nothing: any import failure aborts the
//! load with no partial state.

use bundle_registry::{
    ExtensionHandle, ExtensionRegistry, normalize_name, normalize_object_key,
};

use crate::boot::{BootContext, Catalog};
use crate::bundle::{BundleConfig, ExtensionConfig};
use crate::discovery;
use crate::error::{Error, Result};
use crate::index::FragmentIndex;
use crate::model::{ContentType, FieldType, ObjectDefinition, Theme};

/// Maximum number of boot sweeps before the fixed-point is declared
/// divergent.
pub const MAX_BOOT_SWEEPS: usize = 100;

/// Factory producing the configuration object for a newly touched
/// extension during merge.
pub type ConfigFactory = Box<dyn Fn(&ExtensionHandle) -> Box<dyn ExtensionConfig>>;

/// Aggregated bundle configuration across a set of extensions.
///
/// Construction is two-phased: [`load_bundles`](Configs::load_bundles)
/// merges fragments, [`boot`](Configs::boot) runs the fixed-point. After
/// that the instance is queried through the read-only lookup surface. One
/// instance is private to one caller; concurrent aggregation needs separate
/// instances.
pub struct Configs {
    registry: ExtensionRegistry,
    // insertion order of first creation during merge; iteration order for
    // boot sweeps and flattened lookups, never re-sorted
    configs: Vec<Box<dyn ExtensionConfig>>,
    factory: ConfigFactory,
}

impl Configs {
    /// Create an empty aggregator over the given registry.
    pub fn new(registry: ExtensionRegistry) -> Self {
        Self {
            registry,
            configs: Vec::new(),
            factory: Box::new(default_factory),
        }
    }

    /// Replace the factory used to create configuration objects during
    /// merge. Must be called before [`load_bundles`](Configs::load_bundles).
    pub fn set_factory(&mut self, factory: ConfigFactory) {
        self.factory = factory;
    }

    /// The registry this aggregator resolves extensions through.
    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Discover, index and merge the configuration of the named extensions.
    ///
    /// Replaces any prior aggregation state. Every requested name must
    /// resolve; redirected fragments targeting unregistered extensions are
    /// skipped during indexing instead.
    pub fn load_bundles<S: AsRef<str>>(&mut self, bundles: &[S]) -> Result<()> {
        let mut index = FragmentIndex::new();
        for name in bundles {
            let name = name.as_ref();
            let handle = self
                .registry
                .resolve(name)
                .cloned()
                .ok_or_else(|| Error::ExtensionNotFound(name.to_string()))?;
            index.index_extension(&handle, &self.registry)?;
        }

        self.configs.clear();
        for (owner_key, fragment) in index.import_order() {
            let handle = self
                .registry
                .resolve(owner_key)
                .cloned()
                .ok_or_else(|| Error::ExtensionNotFound(owner_key.to_string()))?;
            let position = match self.position(owner_key) {
                Some(position) => position,
                None => {
                    self.configs.push((self.factory)(&handle));
                    self.configs.len() - 1
                }
            };
            self.configs[position]
                .import(&fragment.element, &fragment.file)
                .map_err(|source| Error::Import {
                    file: fragment.file.clone(),
                    extension: handle.name().to_string(),
                    source,
                })?;
        }
        tracing::debug!(
            extensions = self.configs.len(),
            fragments = index.len(),
            "merged bundle configuration"
        );
        Ok(())
    }

    /// Run the boot fixed-point.
    ///
    /// Pass 0 always executes. Every pass sweeps `boot` over all configs
    /// with a fresh reboot ledger and a catalog snapshot taken at pass
    /// start; a non-empty ledger triggers another full sweep. More than
    /// [`MAX_BOOT_SWEEPS`] sweeps abort with
    /// [`Error::BootDiverged`] carrying the accumulated reboot history.
    pub fn boot(&mut self) -> Result<()> {
        let mut history = Vec::new();
        let mut pass = 0;
        loop {
            let mut ctx = BootContext::new(self.catalog(), pass);
            for config in &mut self.configs {
                config.boot(&mut ctx);
            }
            let reboots = ctx.into_reboots();
            pass += 1;
            if reboots.is_empty() {
                tracing::debug!(sweeps = pass, "bundle configuration booted");
                return Ok(());
            }
            history.extend(reboots);
            if pass > MAX_BOOT_SWEEPS {
                return Err(Error::BootDiverged {
                    sweeps: pass,
                    history,
                });
            }
        }
    }

    fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::default();
        for config in &self.configs {
            for object in config.objects() {
                catalog.add_object(&object.key);
            }
            for content_type in config.content_types() {
                catalog.add_content_type(&content_type.id);
            }
            for field_type in config.field_types() {
                catalog.add_field_type(&field_type.id);
            }
        }
        catalog
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.configs
            .iter()
            .position(|config| normalize_name(config.bundle_name()) == key)
    }

    fn find(&self, key: &str) -> Option<&dyn ExtensionConfig> {
        self.configs
            .iter()
            .find(|config| normalize_name(config.bundle_name()) == key)
            .map(|config| config.as_ref())
    }

    /// Resolve one extension's configuration by name.
    ///
    /// Tries the normalized name as given, then with the conventional
    /// suffix appended if the bare name misses.
    pub fn config(&self, name: &str) -> Option<&dyn ExtensionConfig> {
        let key = normalize_name(name);
        self.find(&key)
            .or_else(|| self.find(&format!("{key}bundle")))
    }

    /// Resolve a content object by compound key (`extension/objectName`).
    ///
    /// A key without a `/` resolves to nothing. An extension segment that
    /// does not name a loaded configuration is a typed not-found error; a
    /// loaded extension without the object yields `Ok(None)`.
    pub fn object(&self, object_key: &str) -> Result<Option<&ObjectDefinition>> {
        let key = normalize_object_key(object_key);
        let Some((bundle, object_name)) = key.split_once('/') else {
            return Ok(None);
        };
        let bundle = if bundle.ends_with("bundle") {
            bundle.to_string()
        } else {
            format!("{bundle}bundle")
        };
        let config = self
            .config(&bundle)
            .ok_or_else(|| Error::ExtensionNotFound(format!("{bundle} [{object_key}]")))?;
        Ok(config.object(object_name))
    }

    /// All content objects across all extensions, map iteration order.
    pub fn objects(&self) -> Vec<&ObjectDefinition> {
        self.configs
            .iter()
            .flat_map(|config| config.objects())
            .collect()
    }

    /// All content types across all extensions.
    pub fn content_types(&self) -> Vec<&ContentType> {
        self.configs
            .iter()
            .flat_map(|config| config.content_types())
            .collect()
    }

    /// Look up a content type by id; first match in map iteration order
    /// wins.
    pub fn content_type(&self, id: &str) -> Option<&ContentType> {
        self.configs
            .iter()
            .flat_map(|config| config.content_types())
            .find(|content_type| content_type.id == id)
    }

    /// All field types across all extensions.
    pub fn field_types(&self) -> Vec<&FieldType> {
        self.configs
            .iter()
            .flat_map(|config| config.field_types())
            .collect()
    }

    /// Look up a field type by id; first match wins.
    pub fn field_type(&self, id: &str) -> Option<&FieldType> {
        self.configs
            .iter()
            .flat_map(|config| config.field_types())
            .find(|field_type| field_type.id == id)
    }

    /// Look up a theme by id across all extensions; first match wins.
    pub fn theme(&self, id: &str) -> Option<&Theme> {
        self.configs.iter().find_map(|config| config.theme(id))
    }

    /// Insert or replace a configuration object by its normalized name.
    pub fn add_config(&mut self, config: Box<dyn ExtensionConfig>) {
        let key = normalize_name(config.bundle_name());
        match self.position(&key) {
            Some(position) => self.configs[position] = config,
            None => self.configs.push(config),
        }
    }

    /// Iterate all configuration objects in map iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ExtensionConfig> {
        self.configs.iter().map(|config| config.as_ref())
    }

    /// Number of loaded extension configurations.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether no extension configuration is loaded.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Fingerprint of one extension's configuration files.
    pub fn config_hash(&self, name: &str) -> Result<String> {
        let handle = self
            .registry
            .resolve(name)
            .ok_or_else(|| Error::ExtensionNotFound(name.to_string()))?;
        discovery::config_hash(handle.root())
    }

    /// Serialize the whole aggregation for external consumption.
    ///
    /// One entry per extension under its raw name, each annotated with its
    /// package/dependency metadata block under `"manifest"`.
    pub fn to_value(&self) -> serde_json::Value {
        let mut result = serde_json::Map::new();
        for config in &self.configs {
            let mut value = config.to_value();
            if let serde_json::Value::Object(map) = &mut value {
                map.insert("manifest".to_string(), config.manifest_value());
            }
            result.insert(config.bundle_name().to_string(), value);
        }
        serde_json::Value::Object(result)
    }
}

fn default_factory(handle: &ExtensionHandle) -> Box<dyn ExtensionConfig> {
    let manifest = match handle.manifest() {
        Ok(manifest) => manifest,
        Err(error) => {
            tracing::warn!(
                extension = %handle.name(),
                error = %error,
                "ignoring unreadable extension manifest"
            );
            None
        }
    };
    Box::new(BundleConfig::new(handle.name(), manifest))
}

//! Configuration aggregator for the bundle configuration system.
//!
//! Installed extensions contribute XML configuration fragments under
//! `Resources/config/`. This crate discovers those fragments, merges them by
//! priority into one configuration object per extension, and runs a bounded
//! fixed-point boot pass so extensions can react to configuration contributed
//! by other extensions.
//!
//! # Phases
//!
//! 1. **Discovery** — locate `jarves.xml` and `jarves.*.xml` per extension
//!    ([`discovery`]).
//! 2. **Indexing** — parse every file and bucket each `<bundle>` element by
//!    owning extension and priority ([`index`]).
//! 3. **Merge** — import fragments in ascending priority order into one
//!    [`BundleConfig`] per extension ([`Configs::load_bundles`]).
//! 4. **Boot** — sweep `boot` over every configuration until no extension
//!    requests another sweep, capped at 100 sweeps ([`Configs::boot`]).
//!
//! After boot the aggregate is queried through the read-only lookup surface
//! on [`Configs`].
//!
//! # Example
//!
//! ```ignore
//! use bundle_config::Configs;
//! use bundle_registry::{ExtensionHandle, ExtensionRegistry};
//!
//! let mut registry = ExtensionRegistry::new();
//! registry.register(ExtensionHandle::new("blog", "/srv/ext/blog"));
//!
//! let mut configs = Configs::new(registry);
//! configs.load_bundles(&["blog"])?;
//! configs.boot()?;
//!
//! let post = configs.object("blog/post")?;
//! ```

pub mod boot;
pub mod bundle;
pub mod configs;
pub mod discovery;
pub mod element;
pub mod error;
pub mod index;
pub mod model;

pub use boot::BootContext;
pub use bundle::{BundleConfig, ExtensionConfig};
pub use configs::{ConfigFactory, Configs, MAX_BOOT_SWEEPS};
pub use element::Element;
pub use error::{Error, ImportError, Result};
pub use index::{Fragment, FragmentIndex};
pub use model::{ContentType, FieldDefinition, FieldType, ObjectDefinition, Theme};

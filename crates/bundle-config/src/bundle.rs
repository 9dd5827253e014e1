//! Per-extension configuration objects.
//!
//! [`ExtensionConfig`] is the capability interface the aggregator drives:
//! `import` feeds it merged fragments, `boot` lets it react to the aggregate
//! state. [`BundleConfig`] is the standard implementation; embedders can
//! substitute their own variant through the aggregator's config factory.

use std::collections::BTreeSet;
use std::path::Path;

use bundle_registry::{ExtensionManifest, normalize_name};
use serde_json::json;

use crate::boot::BootContext;
use crate::element::Element;
use crate::error::ImportError;
use crate::model::{ContentType, FieldType, ObjectDefinition, Theme};

/// The accumulated, merged configuration of one extension.
///
/// One object exists per normalized extension key; the aggregator mutates it
/// in place through successive `import` calls and drives `boot` on every
/// fixed-point sweep.
pub trait ExtensionConfig {
    /// The raw name of the extension this configuration belongs to.
    fn bundle_name(&self) -> &str;

    /// Import one `<bundle>` fragment, accumulating onto prior imports.
    fn import(&mut self, element: &Element, file: &Path) -> Result<(), ImportError>;

    /// React to the aggregate state; may request another sweep through
    /// [`BootContext::add_reboot`].
    fn boot(&mut self, ctx: &mut BootContext);

    /// Look up one content object by id (case-insensitive).
    fn object(&self, name: &str) -> Option<&ObjectDefinition> {
        let _ = name;
        None
    }

    /// All content objects contributed by this extension.
    fn objects(&self) -> &[ObjectDefinition] {
        &[]
    }

    /// All content types contributed by this extension.
    fn content_types(&self) -> &[ContentType] {
        &[]
    }

    /// All field types contributed by this extension.
    fn field_types(&self) -> &[FieldType] {
        &[]
    }

    /// Look up a theme by id.
    fn theme(&self, id: &str) -> Option<&Theme> {
        let _ = id;
        None
    }

    /// The extension's package/dependency metadata block.
    fn manifest_value(&self) -> serde_json::Value {
        json!({})
    }

    /// Plain representation of the merged configuration.
    fn to_value(&self) -> serde_json::Value {
        json!({})
    }
}

/// Standard [`ExtensionConfig`] implementation backed by the catalog model.
#[derive(Debug)]
pub struct BundleConfig {
    name: String,
    key: String,
    manifest: Option<ExtensionManifest>,
    objects: Vec<ObjectDefinition>,
    content_types: Vec<ContentType>,
    field_types: Vec<FieldType>,
    themes: Vec<Theme>,
    // object references already reported as unresolved, so a genuinely
    // dangling reference does not re-signal on every sweep
    pending_refs: BTreeSet<String>,
}

impl BundleConfig {
    pub fn new(name: impl Into<String>, manifest: Option<ExtensionManifest>) -> Self {
        let name = name.into();
        let key = normalize_name(&name);
        Self {
            name,
            key,
            manifest,
            objects: Vec::new(),
            content_types: Vec::new(),
            field_types: Vec::new(),
            themes: Vec::new(),
            pending_refs: BTreeSet::new(),
        }
    }

    /// The normalized lookup key of this extension.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    fn import_objects(&mut self, parent: &Element) -> Result<(), ImportError> {
        for element in parent.children_named("object") {
            let incoming = ObjectDefinition::from_element(&self.key, element)?;
            if let Some(existing) = self.objects.iter_mut().find(|o| o.id == incoming.id) {
                existing.merge(incoming);
            } else {
                self.objects.push(incoming);
            }
        }
        Ok(())
    }

    fn import_content_types(&mut self, parent: &Element) -> Result<(), ImportError> {
        for element in parent.children_named("content-type") {
            let incoming = ContentType::from_element(element)?;
            replace_or_push(&mut self.content_types, incoming, |t| &t.id);
        }
        Ok(())
    }

    fn import_field_types(&mut self, parent: &Element) -> Result<(), ImportError> {
        for element in parent.children_named("field-type") {
            let incoming = FieldType::from_element(element)?;
            replace_or_push(&mut self.field_types, incoming, |t| &t.id);
        }
        Ok(())
    }

    fn import_themes(&mut self, parent: &Element) -> Result<(), ImportError> {
        for element in parent.children_named("theme") {
            let incoming = Theme::from_element(element)?;
            replace_or_push(&mut self.themes, incoming, |t| &t.id);
        }
        Ok(())
    }
}

fn replace_or_push<T>(items: &mut Vec<T>, incoming: T, id: impl Fn(&T) -> &String) {
    if let Some(slot) = items.iter_mut().find(|item| id(item) == id(&incoming)) {
        *slot = incoming;
    } else {
        items.push(incoming);
    }
}

impl ExtensionConfig for BundleConfig {
    fn bundle_name(&self) -> &str {
        &self.name
    }

    fn import(&mut self, element: &Element, file: &Path) -> Result<(), ImportError> {
        tracing::debug!(
            extension = %self.name,
            file = %file.display(),
            "importing configuration fragment"
        );
        if let Some(parent) = element.first_child("objects") {
            self.import_objects(parent)?;
        }
        if let Some(parent) = element.first_child("content-types") {
            self.import_content_types(parent)?;
        }
        if let Some(parent) = element.first_child("field-types") {
            self.import_field_types(parent)?;
        }
        if let Some(parent) = element.first_child("themes") {
            self.import_themes(parent)?;
        }
        // anything else belongs to layers outside the aggregator
        Ok(())
    }

    fn boot(&mut self, ctx: &mut BootContext) {
        // refs that became visible since the last pass drop out of the
        // pending set, so they re-signal if they ever go missing again
        let resolved: Vec<String> = self
            .pending_refs
            .iter()
            .filter(|target| ctx.has_object(target.as_str()))
            .cloned()
            .collect();
        for target in resolved {
            self.pending_refs.remove(&target);
        }

        let mut missing = Vec::new();
        for object in &self.objects {
            for field in &object.fields {
                if field.field_type != "object" {
                    continue;
                }
                let Some(target) = &field.target_object else {
                    continue;
                };
                if !ctx.has_object(target) {
                    missing.push((object.key.clone(), target.clone()));
                }
            }
        }
        for (source, target) in missing {
            if self.pending_refs.insert(target.clone()) {
                ctx.add_reboot(format!("{source}: reference to `{target}` not yet visible"));
            }
        }
    }

    fn object(&self, name: &str) -> Option<&ObjectDefinition> {
        self.objects
            .iter()
            .find(|object| object.id.eq_ignore_ascii_case(name))
    }

    fn objects(&self) -> &[ObjectDefinition] {
        &self.objects
    }

    fn content_types(&self) -> &[ContentType] {
        &self.content_types
    }

    fn field_types(&self) -> &[FieldType] {
        &self.field_types
    }

    fn theme(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.id == id)
    }

    fn manifest_value(&self) -> serde_json::Value {
        self.manifest
            .as_ref()
            .map(ExtensionManifest::to_value)
            .unwrap_or_else(|| json!({}))
    }

    fn to_value(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "objects": self.objects,
            "contentTypes": self.content_types,
            "fieldTypes": self.field_types,
            "themes": self.themes,
        })
    }
}

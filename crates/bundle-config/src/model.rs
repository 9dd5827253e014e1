//! Catalog entities contributed by extension configuration.
//!
//! These are the slim records the lookup surface serves; their full domain
//! semantics (persistence, rendering, validation) live outside the
//! aggregator.

use serde::Serialize;

use bundle_registry::normalize_object_key;

use crate::element::Element;
use crate::error::ImportError;

/// A content object definition, e.g. `blog/post`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDefinition {
    /// Raw id as declared (`Post`).
    pub id: String,
    /// Compound lookup key, normalized (`blog/post`).
    pub key: String,
    /// Display label.
    pub label: Option<String>,
    /// Field definitions, declaration order.
    pub fields: Vec<FieldDefinition>,
}

/// One field of a content object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub id: String,
    /// Field type id; `object` fields reference another content object.
    pub field_type: String,
    /// Target object key for `object` fields, normalized.
    pub target_object: Option<String>,
}

/// A content type (page element kind) contributed by an extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentType {
    pub id: String,
    pub label: Option<String>,
}

/// A form field type contributed by an extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldType {
    pub id: String,
    pub label: Option<String>,
}

/// A theme contributed by an extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub id: String,
    pub label: Option<String>,
}

fn required_id(element: &Element) -> Result<String, ImportError> {
    element
        .attr("id")
        .map(str::to_string)
        .ok_or_else(|| ImportError::MissingAttribute {
            element: element.name.clone(),
            attribute: "id".to_string(),
        })
}

fn label(element: &Element) -> Option<String> {
    element.attr("label").map(str::to_string)
}

impl ObjectDefinition {
    /// Build an object definition from an `<object>` element.
    ///
    /// `bundle_key` is the normalized key of the owning extension, used to
    /// form the compound lookup key.
    pub fn from_element(bundle_key: &str, element: &Element) -> Result<Self, ImportError> {
        let id = required_id(element)?;
        let key = normalize_object_key(&format!("{bundle_key}/{id}"));
        let fields = element
            .children_named("field")
            .map(FieldDefinition::from_element)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id,
            key,
            label: label(element),
            fields,
        })
    }

    /// Merge a re-declaration of the same object into this one.
    ///
    /// Later fragments override the label and add or replace fields by id.
    pub fn merge(&mut self, incoming: ObjectDefinition) {
        if incoming.label.is_some() {
            self.label = incoming.label;
        }
        for field in incoming.fields {
            if let Some(slot) = self.fields.iter_mut().find(|f| f.id == field.id) {
                *slot = field;
            } else {
                self.fields.push(field);
            }
        }
    }
}

impl FieldDefinition {
    pub fn from_element(element: &Element) -> Result<Self, ImportError> {
        let id = required_id(element)?;
        let field_type = element.attr("type").unwrap_or("text").to_string();
        let target_object = element
            .attr("object")
            .map(|target| normalize_object_key(target));
        Ok(Self {
            id,
            field_type,
            target_object,
        })
    }
}

impl ContentType {
    pub fn from_element(element: &Element) -> Result<Self, ImportError> {
        Ok(Self {
            id: required_id(element)?,
            label: label(element),
        })
    }
}

impl FieldType {
    pub fn from_element(element: &Element) -> Result<Self, ImportError> {
        Ok(Self {
            id: required_id(element)?,
            label: label(element),
        })
    }
}

impl Theme {
    pub fn from_element(element: &Element) -> Result<Self, ImportError> {
        Ok(Self {
            id: required_id(element)?,
            label: label(element),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn object_from_element() {
        let element = parse_document(
            r#"<object id="Post" label="Posts">
                 <field id="title"/>
                 <field id="author" type="object" object="Users/User"/>
               </object>"#,
        )
        .unwrap();

        let object = ObjectDefinition::from_element("blog", &element).unwrap();
        assert_eq!(object.id, "Post");
        assert_eq!(object.key, "blog/post");
        assert_eq!(object.label.as_deref(), Some("Posts"));
        assert_eq!(object.fields.len(), 2);
        assert_eq!(object.fields[0].field_type, "text");
        assert_eq!(object.fields[1].field_type, "object");
        assert_eq!(object.fields[1].target_object.as_deref(), Some("users/user"));
    }

    #[test]
    fn missing_id_is_an_import_error() {
        let element = parse_document(r#"<object label="Posts"/>"#).unwrap();
        let err = ObjectDefinition::from_element("blog", &element).unwrap_err();
        assert!(matches!(err, ImportError::MissingAttribute { .. }));
    }

    #[test]
    fn merge_overrides_label_and_replaces_fields_by_id() {
        let base = parse_document(
            r#"<object id="Post" label="Posts">
                 <field id="title" type="text"/>
               </object>"#,
        )
        .unwrap();
        let overlay = parse_document(
            r#"<object id="Post" label="Articles">
                 <field id="title" type="markdown"/>
                 <field id="slug"/>
               </object>"#,
        )
        .unwrap();

        let mut object = ObjectDefinition::from_element("blog", &base).unwrap();
        object.merge(ObjectDefinition::from_element("blog", &overlay).unwrap());

        assert_eq!(object.label.as_deref(), Some("Articles"));
        assert_eq!(object.fields.len(), 2);
        assert_eq!(object.fields[0].field_type, "markdown");
        assert_eq!(object.fields[1].id, "slug");
    }

    #[test]
    fn merge_without_label_keeps_existing() {
        let base = parse_document(r#"<object id="Post" label="Posts"/>"#).unwrap();
        let overlay = parse_document(r#"<object id="Post"/>"#).unwrap();

        let mut object = ObjectDefinition::from_element("blog", &base).unwrap();
        object.merge(ObjectDefinition::from_element("blog", &overlay).unwrap());
        assert_eq!(object.label.as_deref(), Some("Posts"));
    }
}

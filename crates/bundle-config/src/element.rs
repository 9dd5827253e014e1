//! Owned XML element model for configuration fragments.
//!
//! Fragments are parsed with `roxmltree` and immediately converted into this
//! owned tree, so they can live in the fragment index after the source
//! string is dropped.

/// One XML element with its attributes, text content and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Concatenated direct text content, trimmed; `None` when empty.
    pub text: Option<String>,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Look up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over child elements with the given tag name.
    ///
    /// The returned borrows are tied to the element, not to `name`.
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// The first child element with the given tag name.
    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Element {
        let attributes = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();
        let text: String = node
            .children()
            .filter(|child| child.is_text())
            .filter_map(|child| child.text())
            .collect::<String>()
            .trim()
            .to_string();
        let children = node
            .children()
            .filter(|child| child.is_element())
            .map(Element::from_node)
            .collect();
        Element {
            name: node.tag_name().name().to_string(),
            attributes,
            text: (!text.is_empty()).then_some(text),
            children,
        }
    }
}

/// Parse an XML document into an owned element tree rooted at its
/// document element.
pub fn parse_document(source: &str) -> std::result::Result<Element, roxmltree::Error> {
    let doc = roxmltree::Document::parse(source)?;
    Ok(Element::from_node(doc.root_element()))
}

/// Collect every `<bundle>` element in document order.
///
/// A configuration file may be rooted at a single `<bundle>` or declare
/// several of them (possibly targeting other extensions via the `name`
/// attribute), so the whole tree is scanned.
pub fn bundle_elements(root: &Element) -> Vec<&Element> {
    let mut found = Vec::new();
    collect_bundles(root, &mut found);
    found
}

fn collect_bundles<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    if element.name == "bundle" {
        out.push(element);
    }
    for child in &element.children {
        collect_bundles(child, out);
    }
}

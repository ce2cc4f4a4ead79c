//! Raw element tree produced by the XML reader.

use std::collections::BTreeMap;

/// Name of the element that carries template OIDs.
pub const TEMPLATE_ID_ELEMENT: &str = "templateId";

/// One parsed XML element, before any template semantics are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawElement {
    /// Local name, namespace prefix stripped.
    pub name: String,
    /// Attributes keyed by their qualified name as written.
    pub attributes: BTreeMap<String, String>,
    /// Concatenated, trimmed character data directly inside this element.
    pub text: Option<String>,
    pub children: Vec<RawElement>,
}

impl RawElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn child(&self, name: &str) -> Option<&RawElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Follow a chain of child names, taking the first match at each step.
    pub fn descend(&self, names: &[&str]) -> Option<&RawElement> {
        names
            .iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// Attribute of the element at the end of `names`.
    pub fn descend_attribute(&self, names: &[&str], key: &str) -> Option<&str> {
        self.descend(names).and_then(|element| element.attribute(key))
    }

    /// Depth-first search of the subtree below this element.
    pub fn find_descendant<P>(&self, predicate: P) -> Option<&RawElement>
    where
        P: Fn(&RawElement) -> bool + Copy,
    {
        for child in &self.children {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// `(root, extension)` pairs of this element's `templateId` children.
    pub fn template_ids(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.children_named(TEMPLATE_ID_ELEMENT)
            .filter_map(|template| {
                let root = template.attribute("root")?;
                Some((root, template.attribute("extension")))
            })
    }

    pub fn has_template_ids(&self) -> bool {
        self.children
            .iter()
            .any(|child| child.name == TEMPLATE_ID_ELEMENT)
    }

    pub fn is_template_id(&self) -> bool {
        self.name == TEMPLATE_ID_ELEMENT
    }
}

use crate::document::{Document, NodeId};
use std::collections::{BTreeMap, BTreeSet};

/// An element of a `MemoryDocument`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub text: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        set_element_attribute(&mut self, name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

fn set_element_attribute(element: &mut Element, name: &str, value: &str) {
    if name.eq_ignore_ascii_case("class") {
        element.classes = value.split_whitespace().map(str::to_string).collect();
    } else {
        element
            .attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
    }
}

/// Flat in-memory document
///
/// Elements are kept in insertion order, which stands in for document order.
/// Nesting is not modelled: each element owns exactly the text it displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    language: Option<String>,
    title: String,
    meta_description: Option<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, returning its handle
    pub fn push(&mut self, element: Element) -> NodeId {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.meta_description.as_deref()
    }
}

impl Document for MemoryDocument {
    fn elements_with_attribute(&self, attribute: &str) -> Vec<NodeId> {
        let attribute = attribute.to_ascii_lowercase();
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.attributes.contains_key(&attribute))
            .map(|(id, _)| id)
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let element = self.elements.get(node)?;
        if name.eq_ignore_ascii_case("class") {
            if element.classes.is_empty() {
                return None;
            }
            let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
            return Some(classes.join(" "));
        }
        element.attributes.get(&name.to_ascii_lowercase()).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(node) {
            set_element_attribute(element, name, value);
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.elements
            .get(node)
            .map(|el| el.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.elements.get_mut(node) {
            element.text = text.to_string();
        }
    }

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        if let Some(element) = self.elements.get_mut(node) {
            if enabled {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }

    fn set_language(&mut self, lang: &str) {
        self.language = Some(lang.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_meta_description(&mut self, description: &str) {
        self.meta_description = Some(description.to_string());
    }
}

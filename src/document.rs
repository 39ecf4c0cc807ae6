//! Document access abstraction
//!
//! The switcher touches the page only through this trait: find elements by
//! marker attribute, read and write their text and attributes, toggle a
//! class, and set the document-level language, title and meta description.
//! A browser binding implements it over the live DOM; `MemoryDocument`
//! implements it in memory.

/// Opaque handle of an element within one document
pub type NodeId = usize;

pub trait Document {
    /// All elements carrying `attribute`, in document order
    fn elements_with_attribute(&self, attribute: &str) -> Vec<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn text(&self, node: NodeId) -> String;

    fn set_text(&mut self, node: NodeId, text: &str);

    /// Add or remove `class` on `node`
    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool);

    /// Set the `lang` attribute of the root element
    fn set_language(&mut self, lang: &str);

    fn set_title(&mut self, title: &str);

    /// Set the content of `<meta name="description">`
    fn set_meta_description(&mut self, description: &str);
}

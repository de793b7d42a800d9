//! DOM Node - Compact representation
//!
//! Uses NodeId links instead of pointers so a node never owns its
//! neighbours; the arena in [`DomTree`](crate::DomTree) owns everything.

use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: impl Into<String>) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new element node in a foreign namespace
    pub fn element_ns(tag: impl Into<String>, namespace: Namespace) -> Self {
        Self::with_data(NodeData::Element(ElementData::with_namespace(tag, namespace)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(TextData { content: content.into() }))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Create a document fragment node
    pub fn fragment() -> Self {
        Self::with_data(NodeData::DocumentFragment)
    }

    /// Copy of this node's data with all links cleared
    pub(crate) fn unlinked_copy(&self) -> Self {
        Self::with_data(self.data.clone())
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Whether this node may have children
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(
            self.data,
            NodeData::Document | NodeData::DocumentFragment | NodeData::Element(_)
        )
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Document root
    Document,
    /// Detached fragment root
    DocumentFragment,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

impl Namespace {
    /// Map a namespace URI; anything unknown is treated as HTML
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            "http://www.w3.org/2000/svg" => Namespace::Svg,
            "http://www.w3.org/1998/Math/MathML" => Namespace::MathMl,
            _ => Namespace::Html,
        }
    }
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name (lowercase for HTML content)
    pub tag: String,
    /// Namespace; attribute names are case-insensitive only in HTML
    pub namespace: Namespace,
    /// Attributes in insertion order
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_namespace(tag, Namespace::Html)
    }

    pub fn with_namespace(tag: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            tag: tag.into(),
            namespace,
            attrs: Vec::new(),
        }
    }

    /// Whether this is an HTML element (as opposed to SVG or MathML)
    pub fn is_html(&self) -> bool {
        self.namespace == Namespace::Html
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if the attribute is present (with any value)
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value;
            return;
        }
        self.attrs.push(Attribute { name, value });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(index).value)
    }

    /// Attribute names in order
    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.iter().map(|a| a.name.as_str())
    }
}

/// Text node data
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut elem = ElementData::new("a");
        elem.set_attr("href", "/one");
        elem.set_attr("class", "link");
        elem.set_attr("href", "/two");

        assert_eq!(elem.attrs.len(), 2);
        assert_eq!(elem.attrs[0].name, "href");
        assert_eq!(elem.get_attr("href"), Some("/two"));
    }

    #[test]
    fn test_remove_attr() {
        let mut elem = ElementData::new("input");
        elem.set_attr("disabled", "");

        assert!(elem.has_attr("disabled"));
        assert_eq!(elem.remove_attr("disabled"), Some(String::new()));
        assert!(!elem.has_attr("disabled"));
        assert_eq!(elem.remove_attr("disabled"), None);
    }

    #[test]
    fn test_namespace_from_uri() {
        assert_eq!(Namespace::from_uri("http://www.w3.org/2000/svg"), Namespace::Svg);
        assert_eq!(Namespace::from_uri("http://www.w3.org/1999/xhtml"), Namespace::Html);
        assert!(ElementData::new("div").is_html());
        assert!(!ElementData::with_namespace("svg", Namespace::Svg).is_html());
    }

    #[test]
    fn test_node_kinds() {
        assert!(Node::element("div").is_element());
        assert!(Node::text("hi").is_text());
        assert!(Node::fragment().is_container());
        assert!(!Node::comment("c").is_container());
        assert_eq!(Node::text("hi").as_text(), Some("hi"));
    }
}

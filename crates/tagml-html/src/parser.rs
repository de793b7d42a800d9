//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts the `<body>` contents into a
//! detached fragment. The markup is wrapped in a full document so the
//! tree builder never has to invent a doctype or a body.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use tagml_dom::{DomTree, Fragment, Namespace, NodeId};

use crate::ParseError;

/// Parser configuration
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Reject markup the tree builder had to repair
    pub strict: bool,
    /// Keep text nodes that only contain whitespace
    pub keep_whitespace_text: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict: false,
            keep_whitespace_text: true,
        }
    }
}

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    config: ParserConfig,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse markup as body content. Top-level elements become the
    /// fragment's children; top-level text and comments are dropped.
    pub fn parse_fragment(&self, markup: &str) -> Result<Fragment, ParseError> {
        let wrapped = format!("<!DOCTYPE html><html><head></head><body>{markup}</body></html>");

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut wrapped.as_bytes())?;

        let errors: Vec<String> = dom.errors.borrow().iter().map(|e| e.to_string()).collect();
        if !errors.is_empty() {
            if self.config.strict {
                return Err(ParseError::Malformed { errors });
            }
            tracing::debug!(count = errors.len(), "html5ever recovered from markup errors");
        }

        let body = find_element(&dom.document, "body").ok_or(ParseError::MissingBody)?;

        let mut tree = DomTree::fragment();
        let root = tree.root();
        for child in body.children.borrow().iter() {
            if matches!(child.data, RcNodeData::Element { .. }) {
                self.convert_node(child, &mut tree, root)?;
            }
        }

        let fragment = Fragment::from_tree(tree);
        tracing::debug!(
            nodes = fragment.tree().len(),
            top_level = fragment.children().len(),
            "parsed fragment"
        );
        Ok(fragment)
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if self.config.keep_whitespace_text || !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, template_contents, .. } => {
                let id = tree.create_element_ns(&name.local, Namespace::from_uri(&name.ns));

                for attr in attrs.borrow().iter() {
                    let attr_name = match &attr.name.prefix {
                        Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    tree.set_attribute(id, &attr_name, &attr.value)?;
                }
                tree.append_child(parent, id)?;

                // <template> keeps its parsed content aside; inline it
                if let Some(contents) = template_contents.borrow().as_ref() {
                    for child in contents.children.borrow().iter() {
                        self.convert_node(child, tree, id)?;
                    }
                }
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id)?;
                }
            }
            RcNodeData::Document
            | RcNodeData::Doctype { .. }
            | RcNodeData::ProcessingInstruction { .. } => {}
        }
        Ok(())
    }
}

/// Pre-order search for the first element with the given local name
fn find_element(handle: &Handle, local: &str) -> Option<Handle> {
    if let RcNodeData::Element { name, .. } = &handle.data {
        if &*name.local == local {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, local))
}

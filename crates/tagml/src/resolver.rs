//! Marker Resolver
//!
//! Finds every marker token in the parsed tree and substitutes the bound
//! value: attribute markers become real attributes, event markers become
//! listeners, text markers become text and child-list markers replace all
//! children of the element that hosts them.

use std::collections::HashMap;

use tagml_dom::{DomTree, NodeData, NodeId};

use crate::config::{CompileConfig, ResolveStrategy, TextMatch, UnresolvedPolicy};
use crate::encoder::Bindings;
use crate::marker::{Marker, MarkerScheme, find_bounded};
use crate::CompileError;

/// Outcome of one resolution
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolveReport {
    /// Markers substituted
    pub resolved: usize,
    /// Tokens whose marker was not found
    pub unresolved: Vec<String>,
}

/// Where markers live in the tree
trait MarkerLocator {
    /// Element carrying the marker as an attribute
    fn element(&self, tree: &DomTree, marker: Marker) -> Option<NodeId>;
    /// Text node whose trimmed content is the marker
    fn text(&self, tree: &DomTree, marker: Marker) -> Option<NodeId>;
}

/// One depth-first search per lookup
struct SearchLocator<'a> {
    root: NodeId,
    scheme: &'a MarkerScheme,
}

impl MarkerLocator for SearchLocator<'_> {
    fn element(&self, tree: &DomTree, marker: Marker) -> Option<NodeId> {
        tree.find_element_with_attribute(self.root, &self.scheme.token(marker))
    }

    fn text(&self, tree: &DomTree, marker: Marker) -> Option<NodeId> {
        tree.find_text_node(self.root, &self.scheme.token(marker))
    }
}

/// Locations collected by a single pre-order walk; first occurrence wins
#[derive(Default)]
struct IndexedLocator {
    elements: HashMap<Marker, NodeId>,
    texts: HashMap<Marker, NodeId>,
}

impl IndexedLocator {
    fn collect(tree: &DomTree, root: NodeId, scheme: &MarkerScheme) -> Self {
        let mut index = Self::default();
        for (id, node) in tree.descendants(root) {
            match &node.data {
                NodeData::Element(elem) => {
                    for name in elem.attr_names() {
                        if let Some(marker) = scheme.parse(name) {
                            index.elements.entry(marker).or_insert(id);
                        }
                    }
                }
                NodeData::Text(text) => {
                    if let Some(marker) = scheme.parse(text.content.trim()) {
                        index.texts.entry(marker).or_insert(id);
                    }
                }
                _ => {}
            }
        }
        tracing::trace!(
            elements = index.elements.len(),
            texts = index.texts.len(),
            "indexed marker locations"
        );
        index
    }
}

impl MarkerLocator for IndexedLocator {
    fn element(&self, _tree: &DomTree, marker: Marker) -> Option<NodeId> {
        self.elements.get(&marker).copied()
    }

    fn text(&self, _tree: &DomTree, marker: Marker) -> Option<NodeId> {
        self.texts.get(&marker).copied()
    }
}

/// Substitute all bindings into the subtree at `root`
pub fn resolve(
    tree: &mut DomTree,
    root: NodeId,
    scheme: &MarkerScheme,
    bindings: Bindings,
    config: &CompileConfig,
) -> Result<ResolveReport, CompileError> {
    if config.text_match == TextMatch::Partial {
        let tokens: Vec<String> = bindings.texts.iter().map(|(m, _)| *m)
            .chain(bindings.lists.iter().map(|(m, _)| *m))
            .map(|m| scheme.token(m))
            .collect();
        for token in &tokens {
            isolate_text_marker(tree, root, token)?;
        }
    }

    let report = match config.strategy {
        ResolveStrategy::PerMarker => {
            apply(tree, &SearchLocator { root, scheme }, scheme, bindings)?
        }
        ResolveStrategy::SinglePass => {
            let locator = IndexedLocator::collect(tree, root, scheme);
            apply(tree, &locator, scheme, bindings)?
        }
    };

    strip_residue(tree, root, scheme)?;

    for token in &report.unresolved {
        match config.unresolved {
            UnresolvedPolicy::Ignore => tracing::debug!(%token, "dropping unresolved marker"),
            UnresolvedPolicy::Warn => tracing::warn!(%token, "marker not found in parsed markup"),
            UnresolvedPolicy::Strict => {
                return Err(CompileError::UnresolvedMarker { token: token.clone() });
            }
        }
    }

    tracing::debug!(
        resolved = report.resolved,
        unresolved = report.unresolved.len(),
        "resolved markers"
    );
    Ok(report)
}

fn apply(
    tree: &mut DomTree,
    locator: &dyn MarkerLocator,
    scheme: &MarkerScheme,
    bindings: Bindings,
) -> Result<ResolveReport, CompileError> {
    let mut report = ResolveReport::default();
    let Bindings { attributes, events, texts, lists } = bindings;

    for (marker, binding) in attributes {
        let token = scheme.token(marker);
        match locator.element(tree, marker) {
            Some(node) => {
                let name = attribute_name(tree, node, binding.name);
                tree.set_attribute(node, &name, &binding.value)?;
                tree.remove_attribute(node, &token)?;
                tracing::trace!(%token, %name, "bound attribute");
                report.resolved += 1;
            }
            None => report.unresolved.push(token),
        }
    }

    for (marker, text) in texts {
        let token = scheme.token(marker);
        match locator.text(tree, marker) {
            Some(node) => {
                tree.set_text_content(node, &text)?;
                tracing::trace!(%token, "bound text");
                report.resolved += 1;
            }
            None => report.unresolved.push(token),
        }
    }

    for (marker, binding) in events {
        let token = scheme.token(marker);
        match locator.element(tree, marker) {
            Some(node) => {
                tree.add_event_listener(node, &binding.event_type, binding.listener)?;
                tree.remove_attribute(node, &token)?;
                tracing::trace!(%token, event = %binding.event_type, "bound listener");
                report.resolved += 1;
            }
            None => report.unresolved.push(token),
        }
    }

    for (marker, fragments) in lists {
        let token = scheme.token(marker);
        let parent = locator
            .text(tree, marker)
            .map(|text| tree.parent(text))
            .filter(|parent| parent.is_valid());
        match parent {
            Some(parent) => {
                let mut nodes = Vec::new();
                for fragment in &fragments {
                    nodes.extend(tree.adopt_fragment(fragment)?);
                }
                tree.replace_children(parent, &nodes)?;
                tracing::trace!(%token, count = nodes.len(), "replaced children");
                report.resolved += 1;
            }
            None => report.unresolved.push(token),
        }
    }

    Ok(report)
}

/// HTML attribute names are case-insensitive and stored lowercase; SVG and
/// MathML keep the name as written (`viewBox`)
fn attribute_name(tree: &DomTree, node: NodeId, name: String) -> String {
    let is_html = tree
        .get(node)
        .and_then(|n| n.as_element())
        .is_none_or(|elem| elem.is_html());
    if is_html { name.to_ascii_lowercase() } else { name }
}

/// Split the first text node containing `token` (not followed by a digit)
/// so the token sits in a text node of its own
fn isolate_text_marker(tree: &mut DomTree, root: NodeId, token: &str) -> Result<(), CompileError> {
    let found = tree.descendants(root).find_map(|(id, node)| {
        let text = node.as_text()?;
        let (start, end) = find_bounded(text, token)?;
        Some((id, start, end, text.len()))
    });
    let Some((id, start, end, len)) = found else {
        return Ok(());
    };

    let marker_node = if start > 0 { tree.split_text(id, start)? } else { id };
    if end < len {
        tree.split_text(marker_node, end - start)?;
    }
    Ok(())
}

/// Remove any attribute still using the reserved prefix
fn strip_residue(tree: &mut DomTree, root: NodeId, scheme: &MarkerScheme) -> Result<(), CompileError> {
    let residue: Vec<(NodeId, String)> = tree
        .descendants(root)
        .filter_map(|(id, node)| Some((id, node.as_element()?)))
        .flat_map(move |(id, elem)| {
            elem.attr_names()
                .filter(move |name| scheme.is_reserved(name))
                .map(move |name| (id, name.to_string()))
        })
        .collect();

    for (id, name) in residue {
        tracing::trace!(attribute = %name, "stripping marker residue");
        tree.remove_attribute(id, &name)?;
    }
    Ok(())
}

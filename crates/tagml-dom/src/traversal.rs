//! Tree traversal
//!
//! Pre-order depth-first search: a node is visited before its children,
//! children in document order. Searches return the first match.

use crate::{DomTree, Node, NodeId};

/// Pre-order iterator over a subtree, starting with its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.get(id)?;
        // Push in reverse so the first child is popped next
        let mut child = node.last_child;
        while child.is_valid() {
            self.stack.push(child);
            child = self.tree.get(child).map_or(NodeId::NONE, |n| n.prev_sibling);
        }
        Some((id, node))
    }
}

impl DomTree {
    /// Iterate over `root` and all of its descendants in pre-order
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let stack = if self.get(root).is_some() { vec![root] } else { Vec::new() };
        Descendants { tree: self, stack }
    }

    /// Find the first element (pre-order) carrying `name` as an attribute
    pub fn find_element_with_attribute(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let node = self.get(root)?;
        if node.as_element().is_some_and(|e| e.has_attr(name)) {
            return Some(root);
        }
        self.children(root)
            .find_map(|(child, _)| self.find_element_with_attribute(child, name))
    }

    /// Find the first text node (pre-order) whose trimmed content equals `needle`
    pub fn find_text_node(&self, root: NodeId, needle: &str) -> Option<NodeId> {
        let node = self.get(root)?;
        if node.as_text().is_some_and(|t| t.trim() == needle) {
            return Some(root);
        }
        self.children(root)
            .find_map(|(child, _)| self.find_text_node(child, needle))
    }
}

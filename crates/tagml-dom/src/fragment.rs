//! Document fragments
//!
//! A [`Fragment`] owns a detached tree rooted at a `DocumentFragment` node.
//! Compiled templates are returned as fragments, and node sequences passed
//! into templates are fragments too; inserting one into another tree copies
//! its top-level children across, listeners included.

use crate::{DomError, DomTree, NodeId};

/// Owned, detached DOM fragment
#[derive(Debug)]
pub struct Fragment {
    tree: DomTree,
}

impl Fragment {
    /// Create an empty fragment
    pub fn new() -> Self {
        Self { tree: DomTree::fragment() }
    }

    /// Wrap a tree whose root is a fragment node
    pub fn from_tree(tree: DomTree) -> Self {
        Self { tree }
    }

    /// Fragment holding a single empty element
    pub fn element(tag: &str) -> Self {
        let mut fragment = Self::new();
        let id = fragment.tree.create_element(tag);
        fragment.append_top_level(id);
        fragment
    }

    /// Fragment holding a single text node
    pub fn text(content: &str) -> Self {
        let mut fragment = Self::new();
        let id = fragment.tree.create_text(content);
        fragment.append_top_level(id);
        fragment
    }

    fn append_top_level(&mut self, id: NodeId) {
        let root = self.tree.root();
        // Fresh element/text under a fragment root always satisfies the hierarchy rules
        if let Err(err) = self.tree.append_child(root, id) {
            tracing::error!(%err, "failed to append to fragment root");
        }
    }

    /// The fragment root
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Access the underlying tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the underlying tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Consume the fragment, returning its tree
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Top-level nodes in order
    pub fn children(&self) -> Vec<NodeId> {
        self.tree.child_ids(self.root())
    }

    /// First top-level element, if any
    pub fn first_element(&self) -> Option<NodeId> {
        self.tree.element_children(self.root()).into_iter().next()
    }

    /// Check if the fragment has no top-level nodes
    pub fn is_empty(&self) -> bool {
        !self.tree.get(self.root()).is_some_and(|n| n.first_child.is_valid())
    }

    /// Clone the whole fragment, like `template.content.cloneNode(true)`.
    /// Listeners are not cloned.
    pub fn deep_clone(&self) -> Result<Fragment, DomError> {
        let mut clone = Fragment::new();
        let root = clone.root();
        for child in self.children() {
            let copy = clone.tree.import_subtree(&self.tree, child)?;
            clone.tree.append_child(root, copy)?;
        }
        Ok(clone)
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Copy the top-level nodes of `fragment` into this tree, listeners
    /// included. Returns the detached copies in order.
    pub fn adopt_fragment(&mut self, fragment: &Fragment) -> Result<Vec<NodeId>, DomError> {
        fragment
            .children()
            .into_iter()
            .map(|child| self.adopt_subtree(fragment.tree(), child))
            .collect()
    }
}

//! Shadow DOM
//!
//! An isolated rendering root. Rendering into it always replaces the
//! previous content wholesale; there is no diffing. Each replacement starts
//! a new arena, so detached nodes and their listeners from earlier renders
//! are freed.

use crate::{DomError, DomTree, Fragment, NodeId};

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

/// Shadow root
#[derive(Debug)]
pub struct ShadowRoot {
    pub mode: ShadowRootMode,
    tree: DomTree,
}

impl ShadowRoot {
    /// Create a new, empty shadow root
    pub fn new(mode: ShadowRootMode) -> Self {
        Self {
            mode,
            tree: DomTree::fragment(),
        }
    }

    /// The shadow root node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get children
    pub fn children(&self) -> Vec<NodeId> {
        self.tree.child_ids(self.root())
    }

    /// Access the shadow tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the shadow tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Append the contents of a fragment after the existing children
    pub fn append_fragment(&mut self, fragment: &Fragment) -> Result<Vec<NodeId>, DomError> {
        let root = self.root();
        let nodes = self.tree.adopt_fragment(fragment)?;
        for &node in &nodes {
            self.tree.append_child(root, node)?;
        }
        Ok(nodes)
    }

    /// Drop every existing child and insert the contents of a fragment
    pub fn replace_children(&mut self, fragment: &Fragment) -> Result<Vec<NodeId>, DomError> {
        let mut tree = DomTree::fragment();
        let root = tree.root();
        let nodes = tree.adopt_fragment(fragment)?;
        for &node in &nodes {
            tree.append_child(root, node)?;
        }
        self.tree = tree;
        Ok(nodes)
    }
}

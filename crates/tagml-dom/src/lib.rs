//! tagml DOM - Document Object Model
//!
//! Arena-based DOM tree used as the output of template compilation.
//! Nodes are addressed by [`NodeId`] and linked parent/child/sibling style,
//! so subtrees can be moved, cloned and adopted between trees cheaply.

mod node;
mod tree;
mod events;
mod traversal;
mod fragment;
mod shadow;

pub use node::{Node, NodeData, ElementData, Namespace, TextData, Attribute};
pub use tree::{DomTree, Children};
pub use events::{Event, Listener};
pub use traversal::Descendants;
pub use fragment::Fragment;
pub use shadow::{ShadowRoot, ShadowRootMode};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Invalid/null node
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0:?} does not exist in this tree")]
    InvalidNode(NodeId),

    #[error("Cannot insert {child:?} under {parent:?}: {reason}")]
    HierarchyRequest {
        parent: NodeId,
        child: NodeId,
        reason: &'static str,
    },
}

//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed individually: detaching unlinks a node, and the
//! storage goes away with the tree.

use std::collections::HashMap;

use crate::{DomError, Event, Listener, Namespace, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    /// Listeners by node, in registration order
    listeners: HashMap<NodeId, Vec<(String, Listener)>>,
}

impl DomTree {
    /// Create a tree rooted at a document node
    pub fn new() -> Self {
        Self::with_root(Node::document())
    }

    /// Create a tree rooted at a document fragment node
    pub fn fragment() -> Self {
        Self::with_root(Node::fragment())
    }

    fn with_root(root: Node) -> Self {
        Self {
            nodes: vec![root],
            listeners: HashMap::new(),
        }
    }

    /// Root node (document or fragment)
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::InvalidNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.get_mut(id).ok_or(DomError::InvalidNode(id))
    }

    /// Number of nodes in the arena (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached element in the given namespace
    pub fn create_element_ns(&mut self, tag: &str, namespace: Namespace) -> NodeId {
        self.push(Node::element_ns(tag, namespace))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Check if `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::HierarchyRequest {
                parent,
                child,
                reason: "parent cannot have children",
            });
        }
        let child_node = self.node(child)?;
        if matches!(child_node.data, NodeData::Document | NodeData::DocumentFragment) {
            return Err(DomError::HierarchyRequest {
                parent,
                child,
                reason: "root nodes cannot be inserted",
            });
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest {
                parent,
                child,
                reason: "node would become its own ancestor",
            });
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child)?;

        let last = self.node(parent)?.last_child;
        {
            let node = self.node_mut(child)?;
            node.parent = parent;
            node.prev_sibling = last;
        }
        if last.is_valid() {
            self.node_mut(last)?.next_sibling = child;
        } else {
            self.node_mut(parent)?.first_child = child;
        }
        self.node_mut(parent)?.last_child = child;
        Ok(())
    }

    /// Insert `child` before `reference` (append when `reference` is NONE)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        if !reference.is_valid() {
            return self.append_child(parent, child);
        }
        if self.node(reference)?.parent != parent {
            return Err(DomError::HierarchyRequest {
                parent,
                child,
                reason: "reference node is not a child of parent",
            });
        }
        self.check_insert(parent, child)?;
        self.detach(child)?;

        let prev = self.node(reference)?.prev_sibling;
        {
            let node = self.node_mut(child)?;
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }
        self.node_mut(reference)?.prev_sibling = child;
        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = child;
        } else {
            self.node_mut(parent)?.first_child = child;
        }
        Ok(())
    }

    /// Unlink a node from its parent and siblings. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let (parent, prev, next) = {
            let node = self.node(id)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = next;
        } else {
            self.node_mut(parent)?.first_child = next;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = prev;
        } else {
            self.node_mut(parent)?.last_child = prev;
        }

        let node = self.node_mut(id)?;
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(())
    }

    /// Detach every child of `parent`
    pub fn remove_children(&mut self, parent: NodeId) -> Result<(), DomError> {
        for child in self.child_ids(parent) {
            self.detach(child)?;
        }
        Ok(())
    }

    /// Replace all children of `parent` with `new_children`, in order
    pub fn replace_children(&mut self, parent: NodeId, new_children: &[NodeId]) -> Result<(), DomError> {
        for &child in new_children {
            self.check_insert(parent, child)?;
        }
        self.remove_children(parent)?;
        for &child in new_children {
            self.append_child(parent, child)?;
        }
        Ok(())
    }

    /// Iterate over the children of a node
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next: first }
    }

    /// Child IDs in document order
    pub fn child_ids(&self, parent: NodeId) -> Vec<NodeId> {
        self.children(parent).map(|(id, _)| id).collect()
    }

    /// Element children in document order
    pub fn element_children(&self, parent: NodeId) -> Vec<NodeId> {
        self.children(parent)
            .filter(|(_, node)| node.is_element())
            .map(|(id, _)| id)
            .collect()
    }

    /// Parent of a node (NONE for roots and detached nodes)
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.parent)
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut output = String::new();
        self.collect_text(id, &mut output);
        output
    }

    fn collect_text(&self, id: NodeId, output: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(text) => output.push_str(&text.content),
            NodeData::Comment(_) => {}
            _ => {
                for (child, _) in self.children(id) {
                    self.collect_text(child, output);
                }
            }
        }
    }

    /// Set text content: text/comment nodes are rewritten in place,
    /// containers have their children replaced by a single text node
    pub fn set_text_content(&mut self, id: NodeId, content: &str) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(text) => {
                text.content = content.to_string();
                return Ok(());
            }
            NodeData::Comment(text) => {
                *text = content.to_string();
                return Ok(());
            }
            _ => {}
        }
        self.remove_children(id)?;
        if !content.is_empty() {
            let text = self.create_text(content);
            self.append_child(id, text)?;
        }
        Ok(())
    }

    /// Split a text node at a byte offset; the tail becomes a new sibling
    /// inserted right after it and is returned
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId, DomError> {
        let tail = match &mut self.node_mut(id)?.data {
            NodeData::Text(text) if text.content.is_char_boundary(offset) => {
                text.content.split_off(offset)
            }
            _ => {
                return Err(DomError::HierarchyRequest {
                    parent: NodeId::NONE,
                    child: id,
                    reason: "split offset must be a char boundary of a text node",
                });
            }
        };
        let new_node = self.create_text(&tail);
        let (parent, next) = {
            let node = self.node(id)?;
            (node.parent, node.next_sibling)
        };
        if parent.is_valid() {
            self.insert_before(parent, new_node, next)?;
        }
        Ok(new_node)
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    fn element_mut(&mut self, id: NodeId) -> Result<&mut crate::ElementData, DomError> {
        self.node_mut(id)?.as_element_mut().ok_or(DomError::InvalidNode(id))
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Check whether an element carries an attribute
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Attach a listener. There is no matching removal: listeners live as
    /// long as the tree.
    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        event_type: &str,
        listener: Listener,
    ) -> Result<(), DomError> {
        self.node(id)?;
        self.listeners
            .entry(id)
            .or_default()
            .push((event_type.to_string(), listener));
        Ok(())
    }

    /// Number of listeners for an event type on a node
    pub fn listener_count(&self, id: NodeId, event_type: &str) -> usize {
        self.listeners
            .get(&id)
            .map_or(0, |list| list.iter().filter(|(ty, _)| ty == event_type).count())
    }

    /// Number of listeners registered anywhere in the arena, including on
    /// detached nodes
    pub fn listener_total(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    fn listeners_for(&self, id: NodeId, event_type: &str) -> Vec<Listener> {
        self.listeners
            .get(&id)
            .map(|list| {
                list.iter()
                    .filter(|(ty, _)| ty == event_type)
                    .map(|(_, l)| l.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Dispatch an event at `target`, bubbling through ancestors when the
    /// event bubbles. Returns `false` if a listener prevented the default.
    pub fn dispatch_event(&self, target: NodeId, event: &mut Event) -> bool {
        event.target = target;
        let mut current = target;
        while current.is_valid() {
            event.current_target = Some(current);
            for listener in self.listeners_for(current, &event.event_type) {
                listener.call(event);
            }
            if !event.bubbles || event.is_propagation_stopped() {
                break;
            }
            current = self.parent(current);
        }
        event.current_target = None;
        tracing::trace!(event = %event.event_type, ?target, "dispatched");
        !event.is_default_prevented()
    }

    // ------------------------------------------------------------------
    // Copying
    // ------------------------------------------------------------------

    /// Deep clone a subtree within this tree. The clone is detached and,
    /// like `cloneNode(true)`, carries no listeners.
    pub fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId, DomError> {
        let copy = self.node(id)?.unlinked_copy();
        let new_id = self.push(copy);
        for child in self.child_ids(id) {
            let new_child = self.clone_subtree(child)?;
            self.append_child(new_id, new_child)?;
        }
        Ok(new_id)
    }

    /// Copy a subtree of `source` into this tree, listeners included.
    /// Returns the detached copy of `id`.
    pub fn adopt_subtree(&mut self, source: &DomTree, id: NodeId) -> Result<NodeId, DomError> {
        self.copy_from(source, id, true)
    }

    /// Copy a subtree of `source` into this tree without its listeners
    /// (`importNode(node, true)`)
    pub fn import_subtree(&mut self, source: &DomTree, id: NodeId) -> Result<NodeId, DomError> {
        self.copy_from(source, id, false)
    }

    fn copy_from(&mut self, source: &DomTree, id: NodeId, listeners: bool) -> Result<NodeId, DomError> {
        let copy = source.node(id)?.unlinked_copy();
        let new_id = self.push(copy);
        if listeners {
            if let Some(list) = source.listeners.get(&id) {
                self.listeners.insert(new_id, list.clone());
            }
        }
        for (child, _) in source.children(id) {
            let new_child = self.copy_from(source, child, listeners)?;
            self.append_child(new_id, new_child)?;
        }
        Ok(new_id)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

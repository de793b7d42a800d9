//! Component host
//!
//! Drives a [`Component`] the way a custom element is driven: render once
//! when connected, re-render on every observed attribute change, and put
//! the result into the shadow root by replacing whatever was there.

use std::collections::BTreeMap;

use tagml_dom::{Event, Fragment, NodeId, ShadowRoot, ShadowRootMode};

use crate::CompileError;

/// Something that renders itself into a shadow root
pub trait Component {
    /// Attributes whose changes trigger a re-render
    fn observed_attributes(&self) -> &[&'static str] {
        &[]
    }

    /// Called for observed attributes before re-rendering
    fn attribute_changed(&mut self, _name: &str, _old: Option<&str>, _new: &str) {}

    /// Build the shadow content
    fn render(&self) -> Result<Fragment, CompileError>;
}

/// Lifecycle callbacks the host invokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCallback {
    Connected,
    AttributeChanged,
}

/// Host element for a component
#[derive(Debug)]
pub struct ComponentHost<C> {
    tag: String,
    component: C,
    attributes: BTreeMap<String, String>,
    shadow: ShadowRoot,
    connected: bool,
    render_count: usize,
}

impl<C: Component> ComponentHost<C> {
    /// Create a disconnected host
    pub fn new(tag: &str, component: C, mode: ShadowRootMode) -> Self {
        Self {
            tag: tag.to_string(),
            component,
            attributes: BTreeMap::new(),
            shadow: ShadowRoot::new(mode),
            connected: false,
            render_count: 0,
        }
    }

    /// Host tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The hosted component
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Whether `connect` has run
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of renders so far
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// The shadow root, hidden when closed
    pub fn shadow_root(&self) -> Option<&ShadowRoot> {
        match self.shadow.mode {
            ShadowRootMode::Open => Some(&self.shadow),
            ShadowRootMode::Closed => None,
        }
    }

    /// Get a host attribute
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attach to the document: render once. Connecting twice is a no-op.
    pub fn connect(&mut self) -> Result<(), CompileError> {
        if self.connected {
            return Ok(());
        }
        self.connected = true;
        tracing::debug!(tag = %self.tag, callback = ?LifecycleCallback::Connected, "lifecycle");
        self.render()
    }

    /// Set a host attribute; observed attributes re-render a connected host
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), CompileError> {
        let old = self.attributes.insert(name.to_string(), value.to_string());
        if !self.component.observed_attributes().contains(&name) {
            return Ok(());
        }

        tracing::debug!(
            tag = %self.tag,
            callback = ?LifecycleCallback::AttributeChanged,
            attribute = name,
            "lifecycle"
        );
        self.component.attribute_changed(name, old.as_deref(), value);
        if self.connected {
            self.render()?;
        }
        Ok(())
    }

    /// Dispatch an event at a node of the shadow tree
    pub fn dispatch_event(&self, target: NodeId, event: &mut Event) -> bool {
        self.shadow.tree().dispatch_event(target, event)
    }

    /// Top-level shadow nodes, regardless of mode
    pub fn rendered_nodes(&self) -> Vec<NodeId> {
        self.shadow.children()
    }

    fn render(&mut self) -> Result<(), CompileError> {
        let fragment = self.component.render()?;
        self.shadow.replace_children(&fragment)?;
        self.render_count += 1;
        tracing::trace!(tag = %self.tag, renders = self.render_count, "rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Value, html};

    struct Greeting {
        name: String,
    }

    impl Component for Greeting {
        fn observed_attributes(&self) -> &[&'static str] {
            &["name"]
        }

        fn attribute_changed(&mut self, _name: &str, _old: Option<&str>, new: &str) {
            self.name = new.to_string();
        }

        fn render(&self) -> Result<Fragment, CompileError> {
            html(&["<p>", "</p>"], vec![Value::from(self.name.as_str())])
        }
    }

    fn greeting() -> ComponentHost<Greeting> {
        ComponentHost::new("x-greeting", Greeting { name: "world".into() }, ShadowRootMode::Open)
    }

    #[test]
    fn test_connect_renders_once() {
        let mut host = greeting();
        assert_eq!(host.render_count(), 0);

        host.connect().unwrap();
        host.connect().unwrap();
        assert_eq!(host.render_count(), 1);

        let shadow = host.shadow_root().unwrap();
        assert_eq!(shadow.tree().text_content(shadow.root()), "world");
    }

    #[test]
    fn test_observed_attribute_rerenders() {
        let mut host = greeting();
        host.connect().unwrap();
        host.set_attribute("name", "tagml").unwrap();

        assert_eq!(host.render_count(), 2);
        assert_eq!(host.rendered_nodes().len(), 1);
        let shadow = host.shadow_root().unwrap();
        assert_eq!(shadow.tree().text_content(shadow.root()), "tagml");
    }

    #[test]
    fn test_unobserved_attribute_is_recorded_only() {
        let mut host = greeting();
        host.connect().unwrap();
        host.set_attribute("class", "big").unwrap();

        assert_eq!(host.render_count(), 1);
        assert_eq!(host.get_attribute("class"), Some("big"));
    }

    #[test]
    fn test_attribute_before_connect_does_not_render() {
        let mut host = greeting();
        host.set_attribute("name", "early").unwrap();
        assert_eq!(host.render_count(), 0);

        host.connect().unwrap();
        let shadow = host.shadow_root().unwrap();
        assert_eq!(shadow.tree().text_content(shadow.root()), "early");
    }

    #[test]
    fn test_closed_shadow_root_hidden() {
        let mut host = ComponentHost::new("x-greeting", Greeting { name: "a".into() }, ShadowRootMode::Closed);
        host.connect().unwrap();

        assert!(host.shadow_root().is_none());
        assert_eq!(host.rendered_nodes().len(), 1);
    }
}

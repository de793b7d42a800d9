//! DOM Events
//!
//! Event objects and listener callbacks. Listeners are bound once and stay
//! attached for the lifetime of the tree that owns their node.

use std::fmt;
use std::rc::Rc;

use crate::NodeId;

/// Event listener callback
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&mut Event)>);

impl Listener {
    /// Wrap a closure
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut Event) + 'static,
    {
        Self(Rc::new(callback))
    }

    /// Invoke the callback
    pub fn call(&self, event: &mut Event) {
        (self.0)(event)
    }

    /// Whether two listeners share the same callback
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Rc::as_ptr(&self.0))
            .finish()
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create a bubbling, cancelable event (as `click` is)
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: NodeId::NONE,
            current_target: None,
            bubbles: true,
            cancelable: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create an event that only fires on its target
    pub fn non_bubbling(event_type: impl Into<String>) -> Self {
        Self {
            bubbles: false,
            ..Self::new(event_type)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

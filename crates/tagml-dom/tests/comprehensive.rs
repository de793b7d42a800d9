//! Comprehensive tests for tagml-dom
//!
//! Tree structure, events and fragment movement across trees.

use std::cell::Cell;
use std::rc::Rc;

use tagml_dom::{DomTree, Event, Fragment, Listener, NodeData, NodeId, ShadowRoot, ShadowRootMode};

// ============================================================================
// TREE STRUCTURE
// ============================================================================

#[test]
fn test_dom_tree_creation() {
    let mut tree = DomTree::new();

    // div > span > text
    let div = tree.create_element("div");
    let span = tree.create_element("span");
    let text = tree.create_text("Hello, World!");

    tree.append_child(tree.root(), div).unwrap();
    tree.append_child(div, span).unwrap();
    tree.append_child(span, text).unwrap();

    assert_eq!(tree.len(), 4); // root + div + span + text

    let div_node = tree.get(div).unwrap();
    assert_eq!(div_node.parent, tree.root());
    assert_eq!(div_node.first_child, span);
    assert_eq!(tree.text_content(tree.root()), "Hello, World!");
}

#[test]
fn test_dom_tree_siblings() {
    let mut tree = DomTree::new();

    let div = tree.create_element("div");
    let children: Vec<NodeId> = (0..3).map(|_| tree.create_element("p")).collect();
    for &child in &children {
        tree.append_child(div, child).unwrap();
    }

    let first = tree.get(children[0]).unwrap();
    assert_eq!(first.next_sibling, children[1]);
    assert!(!first.prev_sibling.is_valid());

    let last = tree.get(children[2]).unwrap();
    assert!(!last.next_sibling.is_valid());
    assert_eq!(tree.get(div).unwrap().last_child, children[2]);
}

#[test]
fn test_root_kinds() {
    let document = DomTree::new();
    let fragment = DomTree::fragment();

    assert!(matches!(document.get(document.root()).unwrap().data, NodeData::Document));
    assert!(matches!(fragment.get(fragment.root()).unwrap().data, NodeData::DocumentFragment));
}

#[test]
fn test_root_cannot_be_inserted() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    assert!(tree.append_child(div, tree.root()).is_err());
}

#[test]
fn test_detached_nodes_are_skipped_by_traversal() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    let p = tree.create_element("p");
    tree.append_child(tree.root(), div).unwrap();
    tree.append_child(div, p).unwrap();
    tree.set_attribute(p, "marker", "").unwrap();
    tree.detach(p).unwrap();

    assert_eq!(tree.find_element_with_attribute(tree.root(), "marker"), None);
    assert_eq!(tree.descendants(tree.root()).count(), 2);
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_listener_fires_once_per_dispatch() {
    let mut tree = DomTree::new();
    let button = tree.create_element("button");
    tree.append_child(tree.root(), button).unwrap();

    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    tree.add_event_listener(button, "click", Listener::new(move |_| counter.set(counter.get() + 1)))
        .unwrap();

    tree.dispatch_event(button, &mut Event::new("click"));
    assert_eq!(clicks.get(), 1);
    tree.dispatch_event(button, &mut Event::new("click"));
    assert_eq!(clicks.get(), 2);
    tree.dispatch_event(button, &mut Event::new("input"));
    assert_eq!(clicks.get(), 2);
}

#[test]
fn test_event_target_and_current_target() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let inner = tree.create_element("span");
    tree.append_child(outer, inner).unwrap();

    let seen = Rc::new(Cell::new((NodeId::NONE, NodeId::NONE)));
    let record = seen.clone();
    tree.add_event_listener(
        outer,
        "click",
        Listener::new(move |event| {
            record.set((event.target, event.current_target.unwrap_or(NodeId::NONE)));
        }),
    )
    .unwrap();

    tree.dispatch_event(inner, &mut Event::new("click"));
    assert_eq!(seen.get(), (inner, outer));
}

#[test]
fn test_non_bubbling_event_stays_on_target() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let input = tree.create_element("input");
    tree.append_child(outer, input).unwrap();

    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    tree.add_event_listener(outer, "focus", Listener::new(move |_| counter.set(counter.get() + 1)))
        .unwrap();

    tree.dispatch_event(input, &mut Event::non_bubbling("focus"));
    assert_eq!(hits.get(), 0);
}

// ============================================================================
// FRAGMENTS AND SHADOW ROOTS
// ============================================================================

#[test]
fn test_fragment_moves_into_shadow_root_with_listeners() {
    let mut fragment = Fragment::element("button");
    let button = fragment.first_element().unwrap();
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    fragment
        .tree_mut()
        .add_event_listener(button, "click", Listener::new(move |_| counter.set(counter.get() + 1)))
        .unwrap();

    let mut shadow = ShadowRoot::new(ShadowRootMode::Open);
    let nodes = shadow.replace_children(&fragment).unwrap();
    shadow.tree().dispatch_event(nodes[0], &mut Event::new("click"));

    assert_eq!(clicks.get(), 1);
}

#[test]
fn test_repeated_replace_keeps_only_latest_content() {
    let mut shadow = ShadowRoot::new(ShadowRootMode::Open);
    for tag in ["p", "section", "button"] {
        shadow.replace_children(&Fragment::element(tag)).unwrap();
    }

    let children = shadow.children();
    assert_eq!(children.len(), 1);
    assert_eq!(shadow.tree().tag_name(children[0]), Some("button"));
}

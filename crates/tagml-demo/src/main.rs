//! tagml demo - a button component rendered into a shadow root

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Context;
use tagml::{CompileError, Component, ComponentHost, Value};
use tagml_dom::{Event, Fragment, NodeId, ShadowRootMode};
use tagml_html::HtmlSerializer;
use tracing_subscriber::EnvFilter;

/// Button with a configurable label that counts its clicks
struct TestComponent {
    label: String,
    clicks: Rc<Cell<u32>>,
}

impl TestComponent {
    fn new() -> Self {
        Self {
            label: "Click me".to_string(),
            clicks: Rc::new(Cell::new(0)),
        }
    }
}

impl Component for TestComponent {
    fn observed_attributes(&self) -> &[&'static str] {
        &["label"]
    }

    fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: &str) {
        tracing::info!(name, ?old, new, "attribute changed");
        self.label = new.to_string();
    }

    fn render(&self) -> Result<Fragment, CompileError> {
        let clicks = Rc::clone(&self.clicks);
        let on_click = Value::callback(move |event| {
            clicks.set(clicks.get() + 1);
            tracing::info!(clicks = clicks.get(), target = ?event.target, "button clicked");
        });

        tagml::html!(
            ["<button class=\"test-button\" @click=", ">", "</button>"],
            on_click,
            self.label.as_str()
        )
    }
}

fn button(host: &ComponentHost<TestComponent>) -> anyhow::Result<NodeId> {
    let shadow = host.shadow_root().context("shadow root is closed")?;
    let tree = shadow.tree();
    tree.descendants(shadow.root())
        .map(|(id, _)| id)
        .find(|&id| tree.tag_name(id) == Some("button"))
        .context("component rendered no button")
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("TAGML_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut host = ComponentHost::new("test-component", TestComponent::new(), ShadowRootMode::Open);
    host.connect()?;

    for _ in 0..2 {
        let target = button(&host)?;
        host.dispatch_event(target, &mut Event::new("click"));
    }

    host.set_attribute("label", "Clicked twice")?;

    let shadow = host.shadow_root().context("shadow root is closed")?;
    let markup = HtmlSerializer::pretty().serialize_inner(shadow.tree(), shadow.root());

    println!("<{}> rendered {} time(s):", host.tag(), host.render_count());
    println!("{markup}");
    println!("clicks: {}", host.component().clicks.get());

    Ok(())
}

//! Placeholder Encoder
//!
//! Folds over the template's string fragments, classifies each
//! interpolation by the trimmed fragment before it and writes one markup
//! string with a marker token at every bound site. The real values go into
//! side tables that live only as long as this compile.

use tagml_dom::{Fragment, Listener};

use crate::marker::{Marker, MarkerKind, MarkerScheme};
use crate::{CompileError, Value};

/// Attribute binding: the attribute name as written and its value
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBinding {
    pub name: String,
    pub value: String,
}

/// Event binding: the event type and its handler
#[derive(Debug, Clone)]
pub struct EventBinding {
    pub event_type: String,
    pub listener: Listener,
}

/// Side tables for one compile, in insertion order
#[derive(Debug, Default)]
pub struct Bindings {
    pub attributes: Vec<(Marker, AttributeBinding)>,
    pub events: Vec<(Marker, EventBinding)>,
    pub texts: Vec<(Marker, String)>,
    pub lists: Vec<(Marker, Vec<Fragment>)>,
}

impl Bindings {
    /// Total number of bound sites
    pub fn len(&self) -> usize {
        self.attributes.len() + self.events.len() + self.texts.len() + self.lists.len()
    }

    /// Check if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Encoder output
#[derive(Debug)]
pub struct Encoded {
    /// Markup with marker tokens at every bound site
    pub markup: String,
    /// Token format used in `markup`
    pub scheme: MarkerScheme,
    /// Values to substitute
    pub bindings: Bindings,
}

/// Encode a template. `strings` must hold exactly one more fragment than
/// there are values.
pub fn encode(strings: &[&str], values: Vec<Value>) -> Result<Encoded, CompileError> {
    if strings.len() != values.len() + 1 {
        return Err(CompileError::ArityMismatch {
            strings: strings.len(),
            values: values.len(),
        });
    }

    let inline_forms: Vec<String> = values.iter().map(Value::to_inline_string).collect();
    let scheme = MarkerScheme::for_sources(
        strings.iter().copied().chain(inline_forms.iter().map(String::as_str)),
    );

    let mut markup = String::new();
    let mut bindings = Bindings::default();
    let mut values = values.into_iter();

    for (index, fragment) in strings.iter().enumerate() {
        let trimmed = fragment.trim();
        let Some(value) = values.next() else {
            markup.push_str(trimmed);
            continue;
        };

        match classify(trimmed, value) {
            Site::Attribute { head, name, value } => {
                let marker = Marker::new(MarkerKind::Attribute, index);
                push_attribute_token(&mut markup, head, &scheme.token(marker));
                bindings.attributes.push((marker, AttributeBinding { name, value }));
            }
            Site::Text(value) => {
                let marker = Marker::new(MarkerKind::Text, index);
                markup.push_str(trimmed);
                markup.push_str(&scheme.token(marker));
                bindings.texts.push((marker, value));
            }
            Site::Event { head, event_type, listener } => {
                let marker = Marker::new(MarkerKind::Event, index);
                push_attribute_token(&mut markup, head, &scheme.token(marker));
                bindings.events.push((marker, EventBinding { event_type, listener }));
            }
            Site::ChildList(nodes) => {
                let marker = Marker::new(MarkerKind::ChildList, index);
                markup.push_str(trimmed);
                markup.push_str(&scheme.token(marker));
                bindings.lists.push((marker, nodes));
            }
            Site::Unbound(value) => {
                tracing::trace!(index, "unclassified interpolation inlined");
                markup.push_str(trimmed);
                markup.push_str(&value.to_inline_string());
            }
        }
    }

    tracing::debug!(
        markers = bindings.len(),
        prefix = scheme.prefix(),
        "encoded template"
    );
    Ok(Encoded { markup, scheme, bindings })
}

/// Write a marker in attribute position. Trimming drops the whitespace
/// in front of `name=` when it opens a fragment, so restore it.
fn push_attribute_token(markup: &mut String, head: &str, token: &str) {
    markup.push_str(head);
    if !markup.ends_with(char::is_whitespace) {
        markup.push(' ');
    }
    markup.push_str(token);
}

/// Classified interpolation site
enum Site<'a> {
    Attribute { head: &'a str, name: String, value: String },
    Text(String),
    Event { head: &'a str, event_type: String, listener: Listener },
    ChildList(Vec<Fragment>),
    Unbound(Value),
}

/// Split `...name=` into the text before the name and the name itself
fn trailing_assignment(trimmed: &str) -> Option<(&str, &str)> {
    let before_eq = trimmed.strip_suffix('=')?;
    let start = before_eq
        .rfind(char::is_whitespace)
        .map_or(0, |pos| pos + before_eq[pos..].chars().next().map_or(1, char::len_utf8));
    let name = &before_eq[start..];
    // `<p=` is not an attribute position
    if name.is_empty() || name.contains(['<', '>', '"', '\'', '/']) {
        return None;
    }
    Some((&trimmed[..start], name))
}

/// Classify one interpolation. First match wins: attribute by primitive,
/// text by primitive, event by callback, child list by nodes.
fn classify(trimmed: &str, value: Value) -> Site<'_> {
    let assignment = trailing_assignment(trimmed);
    let in_content = trimmed.ends_with('>');

    if let (Some((head, name)), Some(primitive)) = (assignment, value.as_primitive()) {
        return Site::Attribute {
            head,
            name: name.to_string(),
            value: primitive,
        };
    }
    if in_content {
        if let Some(primitive) = value.as_primitive() {
            return Site::Text(primitive);
        }
    }
    match value {
        Value::Callback(listener) => match assignment {
            Some((head, name)) if name.len() > 1 && name.starts_with('@') => Site::Event {
                head,
                event_type: name[1..].to_string(),
                listener,
            },
            _ => Site::Unbound(Value::Callback(listener)),
        },
        Value::Nodes(nodes) if in_content => Site::ChildList(nodes),
        other => Site::Unbound(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_assignment() {
        assert_eq!(trailing_assignment("<section id="), Some(("<section ", "id")));
        assert_eq!(trailing_assignment("<a href=\"x\"\n  title="), Some(("<a href=\"x\"\n  ", "title")));
        assert_eq!(trailing_assignment("<p="), None);
        assert_eq!(trailing_assignment("="), None);
        assert_eq!(trailing_assignment("<p>"), None);
    }

    #[test]
    fn test_encode_text_site() {
        let encoded = encode(&["<p>", "</p>"], vec![Value::from("hi")]).unwrap();
        assert_eq!(encoded.markup, "<p>tagml-text-0</p>");
        assert_eq!(encoded.bindings.texts, vec![(Marker::new(MarkerKind::Text, 0), "hi".to_string())]);
    }

    #[test]
    fn test_encode_attribute_site() {
        let encoded = encode(&["<section id=", ">"], vec![Value::from("testid")]).unwrap();
        assert_eq!(encoded.markup, "<section tagml-attr-0>");
        let (marker, binding) = &encoded.bindings.attributes[0];
        assert_eq!(marker.index, 0);
        assert_eq!(binding.name, "id");
        assert_eq!(binding.value, "testid");
    }

    #[test]
    fn test_attribute_name_case_kept_in_binding() {
        let encoded = encode(&["<svg viewBox=", "></svg>"], vec![Value::from("0 0 1 1")]).unwrap();
        assert_eq!(encoded.bindings.attributes[0].1.name, "viewBox");
    }

    #[test]
    fn test_adjacent_attribute_sites_are_separated() {
        let encoded = encode(
            &["<a href=", " title=", ">x</a>"],
            vec![Value::from("/"), Value::from("t")],
        )
        .unwrap();
        assert_eq!(encoded.markup, "<a tagml-attr-0 tagml-attr-1>x</a>");
    }

    #[test]
    fn test_encode_event_site() {
        let encoded = encode(
            &["<button @click=", ">Go</button>"],
            vec![Value::callback(|_| {})],
        )
        .unwrap();
        assert_eq!(encoded.markup, "<button tagml-event-0>Go</button>");
        assert_eq!(encoded.bindings.events[0].1.event_type, "click");
    }

    #[test]
    fn test_encode_child_list_site() {
        let encoded = encode(
            &["<ul>", "</ul>"],
            vec![Value::from(vec![Fragment::element("li")])],
        )
        .unwrap();
        assert_eq!(encoded.markup, "<ul>tagml-list-0</ul>");
        assert_eq!(encoded.bindings.lists[0].1.len(), 1);
    }

    #[test]
    fn test_fragments_are_trimmed() {
        let encoded = encode(&["  <div>\n  ", "\n</div>  "], vec![Value::from(1)]).unwrap();
        assert_eq!(encoded.markup, "<div>tagml-text-0</div>");
    }

    #[test]
    fn test_index_is_positional() {
        let encoded = encode(
            &["<p class=", ">", "</p><p>", "</p>"],
            vec![Value::from("a"), Value::from("b"), Value::from("c")],
        )
        .unwrap();
        assert_eq!(
            encoded.markup,
            "<p tagml-attr-0>tagml-text-1</p><p>tagml-text-2</p>"
        );
    }

    #[test]
    fn test_unclassified_values_inlined() {
        let encoded = encode(
            &["<p>Hello ", "</p><i>", "</i>"],
            vec![Value::from("Bob"), Value::Empty],
        )
        .unwrap();
        assert_eq!(encoded.markup, "<p>HelloBob</p><i></i>");
        assert!(encoded.bindings.is_empty());
    }

    #[test]
    fn test_callback_without_at_is_unbound() {
        let encoded = encode(
            &["<button onclick=", "></button>"],
            vec![Value::callback(|_| {})],
        )
        .unwrap();
        assert_eq!(encoded.markup, "<button onclick=></button>");
        assert!(encoded.bindings.events.is_empty());
    }

    #[test]
    fn test_nodes_in_attribute_position_are_inlined() {
        let encoded = encode(
            &["<div title=", "></div>"],
            vec![Value::from(Fragment::element("br"))],
        )
        .unwrap();
        assert_eq!(encoded.markup, "<div title=<br>></div>");
    }

    #[test]
    fn test_arity_mismatch() {
        let err = encode(&["<p>", "</p>"], vec![]).unwrap_err();
        assert!(matches!(err, CompileError::ArityMismatch { strings: 2, values: 0 }));
        assert!(encode(&[], vec![]).is_err());
    }

    #[test]
    fn test_prefix_changes_when_source_collides() {
        let encoded = encode(&["<p data-x=\"tagml-text-9\">", "</p>"], vec![Value::from("v")]).unwrap();
        assert_eq!(encoded.scheme.prefix(), "tagml0");
        assert_eq!(encoded.markup, "<p data-x=\"tagml-text-9\">tagml0-text-0</p>");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let first = encode(&["<b>", "</b>"], vec![Value::from(7)]).unwrap();
        let second = encode(&["<b>", "</b>"], vec![Value::from(7)]).unwrap();
        assert_eq!(first.markup, second.markup);
    }
}

//! tagml
//!
//! A small HTML template compiler in the style of tagged template literals.
//! A template is a list of string fragments with one value between each
//! pair; compiling it yields a detached DOM [`Fragment`] with attributes,
//! text, event listeners and child nodes bound in.
//!
//! # Example
//! ```rust
//! use tagml::{html, Value};
//!
//! let fragment = html(&["<section id=", "><p>", "</p></section>"], vec![
//!     Value::from("main"),
//!     Value::from("hi"),
//! ]).unwrap();
//!
//! let section = fragment.first_element().unwrap();
//! assert_eq!(fragment.tree().get_attribute(section, "id"), Some("main"));
//! assert_eq!(fragment.tree().text_content(section), "hi");
//! ```

mod compiler;
mod component;
mod config;
mod encoder;
mod marker;
mod resolver;
mod value;

pub use compiler::Compiler;
pub use component::{Component, ComponentHost, LifecycleCallback};
pub use config::{CompileConfig, ResolveStrategy, TextMatch, UnresolvedPolicy};
pub use encoder::{AttributeBinding, Bindings, Encoded, EventBinding, encode};
pub use marker::{Marker, MarkerKind, MarkerScheme};
pub use resolver::ResolveReport;
pub use value::{Number, Value};

// Re-export sub-crates for advanced usage
pub use tagml_dom as dom;
pub use tagml_html as markup;

pub use tagml_dom::{Event, Fragment, Listener};

use tagml_dom::DomError;
use tagml_html::ParseError;

/// Compile a template with the default configuration
pub fn html(strings: &[&str], values: Vec<Value>) -> Result<Fragment, CompileError> {
    Compiler::default().compile(strings, values)
}

/// Compile a template written as a fragment list followed by its values.
///
/// ```rust
/// let items = vec![tagml::Fragment::element("li"), tagml::Fragment::element("li")];
/// let list = tagml::html!(["<ul>", "</ul>"], items).unwrap();
/// let ul = list.first_element().unwrap();
/// assert_eq!(list.tree().element_children(ul).len(), 2);
/// ```
#[macro_export]
macro_rules! html {
    ([$($s:expr),+ $(,)?] $(, $v:expr)* $(,)?) => {
        $crate::html(&[$($s),+], ::std::vec![$($crate::Value::from($v)),*])
    };
}

/// Compile errors
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Template has {strings} string fragment(s) for {values} value(s); expected exactly one more fragment than values")]
    ArityMismatch { strings: usize, values: usize },

    #[error("Marker {token} was not found in the parsed markup")]
    UnresolvedMarker { token: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

//! tagml HTML
//!
//! Turns markup into detached [`Fragment`]s using html5ever, and turns
//! trees back into markup.

mod parser;
mod serializer;

pub use parser::{HtmlParser, ParserConfig};
pub use serializer::{HtmlSerializer, get_inner_html, get_outer_html};

pub use tagml_dom::Fragment;

/// Parse markup into a fragment with the default configuration
pub fn parse_fragment(markup: &str) -> Result<Fragment, ParseError> {
    HtmlParser::new().parse_fragment(markup)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed markup ({} error(s)): {}", .errors.len(), .errors.join("; "))]
    Malformed { errors: Vec<String> },

    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsed document has no <body> element")]
    MissingBody,

    #[error(transparent)]
    Dom(#[from] tagml_dom::DomError),
}

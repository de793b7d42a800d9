//! Marker tokens
//!
//! Every interpolation site is written into the generated markup as a
//! token `{prefix}-{kind}-{index}`: a bare attribute name for attribute and
//! event sites, literal text for text and child-list sites. The index is
//! the interpolation's position in the template, so tokens are unique
//! within one compile. The prefix is picked per compile so that no token
//! can appear in the template's own content.

use std::fmt;

/// Kind of interpolation site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Attribute,
    Event,
    Text,
    ChildList,
}

impl MarkerKind {
    const ALL: [MarkerKind; 4] = [
        MarkerKind::Attribute,
        MarkerKind::Event,
        MarkerKind::Text,
        MarkerKind::ChildList,
    ];

    /// Tag used inside the token
    pub fn tag(self) -> &'static str {
        match self {
            MarkerKind::Attribute => "attr",
            MarkerKind::Event => "event",
            MarkerKind::Text => "text",
            MarkerKind::ChildList => "list",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// One interpolation site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    pub kind: MarkerKind,
    pub index: usize,
}

impl Marker {
    pub fn new(kind: MarkerKind, index: usize) -> Self {
        Self { kind, index }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.tag(), self.index)
    }
}

/// Token format for one compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerScheme {
    prefix: String,
}

impl MarkerScheme {
    /// Preferred prefix
    pub const BASE_PREFIX: &'static str = "tagml";

    /// Scheme with an explicit prefix
    pub fn with_prefix(prefix: &str) -> Self {
        Self { prefix: prefix.to_ascii_lowercase() }
    }

    /// Pick the first of `tagml`, `tagml0`, `tagml1`, ... whose tokens
    /// cannot occur in any of `sources`. Attribute names are lowercased by
    /// the parser, so the check ignores case.
    pub fn for_sources<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sources: Vec<String> = sources.into_iter().map(str::to_ascii_lowercase).collect();
        let is_free = |prefix: &str| {
            let needle = format!("{prefix}-");
            !sources.iter().any(|s| s.contains(&needle))
        };

        if is_free(Self::BASE_PREFIX) {
            return Self::with_prefix(Self::BASE_PREFIX);
        }
        // Terminates: only finitely many candidates can appear in finite sources
        let mut n = 0usize;
        loop {
            let candidate = format!("{}{}", Self::BASE_PREFIX, n);
            if is_free(&candidate) {
                return Self { prefix: candidate };
            }
            n += 1;
        }
    }

    /// Current prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Serialize a marker
    pub fn token(&self, marker: Marker) -> String {
        format!("{}-{}", self.prefix, marker)
    }

    /// Whether a name or text uses this scheme's reserved prefix
    pub fn is_reserved(&self, s: &str) -> bool {
        s.strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.starts_with('-'))
    }

    /// Parse a complete token
    pub fn parse(&self, token: &str) -> Option<Marker> {
        let rest = token.strip_prefix(self.prefix.as_str())?.strip_prefix('-')?;
        let (tag, index) = rest.split_once('-')?;
        let kind = MarkerKind::from_tag(tag)?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Marker::new(kind, index.parse().ok()?))
    }
}

/// Byte range of the first occurrence of `token` in `text` that is not
/// immediately followed by another digit
pub(crate) fn find_bounded(text: &str, token: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(pos) = text[from..].find(token) {
        let start = from + pos;
        let end = start + token.len();
        if !text[end..].starts_with(|c: char| c.is_ascii_digit()) {
            return Some((start, end));
        }
        from = start + 1;
    }
    None
}

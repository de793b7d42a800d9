//! Compiler Configuration

use tagml_html::ParserConfig;

/// How markers are located in the parsed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveStrategy {
    /// One walk collects every marker location, then all bindings resolve
    /// from that map
    #[default]
    SinglePass,
    /// One depth-first search per marker
    PerMarker,
}

/// How text and child-list markers are matched against text nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMatch {
    /// The marker must be the whole trimmed content of a text node
    #[default]
    Exact,
    /// A marker embedded in longer text is split into its own text node
    /// first, so surrounding static text survives
    Partial,
}

/// What happens to a binding whose marker is missing from the parsed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Drop the binding
    #[default]
    Ignore,
    /// Drop the binding and log a warning
    Warn,
    /// Fail the compile
    Strict,
}

/// Compiler configuration options
#[derive(Debug, Clone, Default)]
pub struct CompileConfig {
    /// Markup parser options
    pub parser: ParserConfig,
    /// Marker lookup strategy
    pub strategy: ResolveStrategy,
    /// Text marker matching
    pub text_match: TextMatch,
    /// Unresolved marker handling
    pub unresolved: UnresolvedPolicy,
}

impl CompileConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_text_match(mut self, text_match: TextMatch) -> Self {
        self.text_match = text_match;
        self
    }

    pub fn with_unresolved(mut self, unresolved: UnresolvedPolicy) -> Self {
        self.unresolved = unresolved;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompileConfig::default();
        assert_eq!(config.strategy, ResolveStrategy::SinglePass);
        assert_eq!(config.text_match, TextMatch::Exact);
        assert_eq!(config.unresolved, UnresolvedPolicy::Ignore);
        assert!(!config.parser.strict);
    }

    #[test]
    fn test_builder() {
        let config = CompileConfig::default()
            .with_strategy(ResolveStrategy::PerMarker)
            .with_unresolved(UnresolvedPolicy::Strict);
        assert_eq!(config.strategy, ResolveStrategy::PerMarker);
        assert_eq!(config.unresolved, UnresolvedPolicy::Strict);
    }
}

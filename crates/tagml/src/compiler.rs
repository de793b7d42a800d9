//! Template Compiler
//!
//! encode → materialize → clone → resolve, in one synchronous call.
//! Nothing survives between calls except the configuration.

use tagml_dom::Fragment;
use tagml_html::HtmlParser;

use crate::config::CompileConfig;
use crate::encoder::encode;
use crate::resolver::{ResolveReport, resolve};
use crate::{CompileError, Value};

/// Compiles templates into bound fragments
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompileConfig,
    parser: HtmlParser,
}

impl Compiler {
    /// Create a compiler
    pub fn new(config: CompileConfig) -> Self {
        let parser = HtmlParser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Current configuration
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Compile a template into a bound fragment
    pub fn compile(&self, strings: &[&str], values: Vec<Value>) -> Result<Fragment, CompileError> {
        self.compile_with_report(strings, values).map(|(fragment, _)| fragment)
    }

    /// Compile a template, also returning what was and was not bound
    pub fn compile_with_report(
        &self,
        strings: &[&str],
        values: Vec<Value>,
    ) -> Result<(Fragment, ResolveReport), CompileError> {
        let encoded = encode(strings, values)?;

        let template = self.parser.parse_fragment(&encoded.markup)?;
        let mut fragment = template.deep_clone()?;

        let root = fragment.root();
        let report = resolve(
            fragment.tree_mut(),
            root,
            &encoded.scheme,
            encoded.bindings,
            &self.config,
        )?;
        Ok((fragment, report))
    }
}

//! CLI command implementations.

mod codec;
mod convert;
mod insert;
mod parse;
mod render;
mod validate;

use std::path::Path;

use codetabs_config::Config;
use codetabs_renderer::{CmarkEngine, HtmlRenderer, SyntectHighlighter};
use codetabs_syntax::{KnownLanguages, LanguageRegistry};

pub(crate) use codec::{DecodeArgs, EncodeArgs};
pub(crate) use convert::ConvertCommand;
pub(crate) use insert::InsertArgs;
pub(crate) use parse::ParseArgs;
pub(crate) use render::RenderArgs;
pub(crate) use validate::ValidateArgs;

use crate::error::CliError;

/// Language registry and rendering collaborators built from config.
pub(crate) struct Toolkit {
    highlighter: SyntectHighlighter,
    markdown: CmarkEngine,
    highlight: bool,
    render_markdown: bool,
}

impl Toolkit {
    pub(crate) fn new(config: &Config) -> Self {
        let extra: KnownLanguages = config.languages.extra.iter().collect();
        Self {
            highlighter: SyntectHighlighter::new().with_extra_languages(extra),
            markdown: CmarkEngine::new(),
            highlight: config.render.highlight,
            render_markdown: config.render.markdown,
        }
    }

    /// Languages known to the highlighter plus `[languages] extra`.
    pub(crate) fn registry(&self) -> &dyn LanguageRegistry {
        &self.highlighter
    }

    /// Renderer with the collaborators enabled in `[render]`.
    pub(crate) fn renderer(&self) -> HtmlRenderer<'_> {
        let mut renderer = HtmlRenderer::new();
        if self.highlight {
            renderer = renderer.with_highlighter(&self.highlighter);
        }
        if self.render_markdown {
            renderer = renderer.with_markdown(&self.markdown);
        }
        renderer
    }
}

/// Read command input from a file, or stdin when absent or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

//! Syntax highlighting collaborator.

use codetabs_syntax::{KnownLanguages, LanguageRegistry};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Error returned when highlighting fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to highlight {lang}: {message}")]
pub struct HighlightError {
    /// Language that was being highlighted.
    pub lang: String,
    /// Underlying failure.
    pub message: String,
}

/// Syntax highlighter producing HTML.
///
/// The registry side decides which tags survive language resolution; the
/// renderer only calls [`highlight`](Highlighter::highlight) for tags the
/// registry knows.
pub trait Highlighter: LanguageRegistry {
    /// Highlight `code` as `lang`, returning escaped HTML with markup spans.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError`] when the grammar fails on the input.
    fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError>;
}

/// Highlighter backed by syntect's bundled grammars.
///
/// Output uses CSS classes (`<span class="source rust">`), never inline
/// colors, so it is identical across calls and themeable by the host.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    extra: KnownLanguages,
}

impl SyntectHighlighter {
    /// Load the bundled grammars.
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            extra: KnownLanguages::new(),
        }
    }

    /// Accept additional tags that have no bundled grammar.
    ///
    /// Such tabs keep their language but render as escaped plain text.
    #[must_use]
    pub fn with_extra_languages(mut self, extra: KnownLanguages) -> Self {
        self.extra = extra;
        self
    }

    fn syntax_for(&self, tag: &str) -> Option<&SyntaxReference> {
        self.syntaxes.find_syntax_by_token(tag)
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry for SyntectHighlighter {
    fn has_language(&self, tag: &str) -> bool {
        self.extra.has_language(tag) || self.syntax_for(tag).is_some()
    }

    fn canonical_name(&self, tag: &str) -> Option<String> {
        self.extra
            .canonical_name(tag)
            .or_else(|| self.syntax_for(tag).map(|_| tag.to_owned()))
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError> {
        let syntax = self
            .syntax_for(lang)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| HighlightError {
                    lang: lang.to_owned(),
                    message: e.to_string(),
                })?;
        }
        Ok(generator.finalize())
    }
}

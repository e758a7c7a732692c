//! Tab syntax parser.
//!
//! Two grammars are accepted, selected by sniffing the trimmed input:
//!
//! ```text
//! ::: JS | js | active        <- current grammar
//! console.log(1)
//!
//! ::: Python
//! print(1)
//! ```
//!
//! ```text
//! tab::: JS:::active          <- legacy grammar (read-only)
//! lang::: js
//! console.log(1)
//! ```
//!
//! Parsing is fail-fast: the first malformed section rejects the whole input
//! with a [`ParseError`].

mod current;
mod error;
mod fence;
mod legacy;

pub use error::{ParseError, ParseErrorKind};

use crate::language::{LanguageRegistry, resolve};
use crate::notify::{Level, Notifier};

/// Section marker of the current grammar.
pub const CURRENT_MARKER: &str = ":::";

/// Section marker of the legacy grammar.
pub const LEGACY_MARKER: &str = "tab:::";

/// One parsed tab.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabRecord {
    /// Non-empty tab title.
    pub title: String,
    /// Resolved language tag.
    pub language: String,
    /// Tab body, trimmed.
    pub code: String,
    /// Whether the tab is marked as initially shown.
    pub is_active: bool,
}

/// Which textual grammar a piece of text uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grammar {
    /// `::: Title | lang | active` sections.
    Current,
    /// `tab::: Title` / `lang::: tag` sections.
    Legacy,
}

/// Detect the grammar of `text` from its leading marker.
pub fn detect_grammar(text: &str) -> Option<Grammar> {
    let trimmed = text.trim_start();
    if trimmed.starts_with(LEGACY_MARKER) {
        Some(Grammar::Legacy)
    } else if trimmed.starts_with(CURRENT_MARKER) {
        Some(Grammar::Current)
    } else {
        None
    }
}

/// Section boundaries and header fields, before validation.
#[derive(Debug)]
struct RawSection<'a> {
    /// Header line as written, used for error previews.
    header: &'a str,
    title: String,
    language: Option<&'a str>,
    is_active: bool,
    body: Vec<&'a str>,
}

impl<'a> RawSection<'a> {
    fn new(header: &'a str, title: String) -> Self {
        Self {
            header,
            title,
            language: None,
            is_active: false,
            body: Vec::new(),
        }
    }

    fn code(&self) -> String {
        self.body.join("\n").trim().to_owned()
    }
}

/// Validate raw sections and turn them into records.
fn finish(
    sections: Vec<RawSection<'_>>,
    registry: Option<&dyn LanguageRegistry>,
) -> Result<Vec<TabRecord>, ParseError> {
    let mut records = Vec::with_capacity(sections.len());
    let mut seen_active = false;

    for (idx, section) in sections.into_iter().enumerate() {
        let number = idx + 1;
        if section.title.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::MissingTitle,
                Some(number),
                section.header,
            ));
        }
        let code = section.code();
        if code.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::MissingCode,
                Some(number),
                section.header,
            ));
        }
        if section.is_active {
            if seen_active {
                return Err(ParseError::new(
                    ParseErrorKind::MultipleActive,
                    Some(number),
                    section.header,
                ));
            }
            seen_active = true;
        }

        let language = resolve(section.language.unwrap_or(&section.title), registry);
        records.push(TabRecord {
            title: section.title,
            language,
            code,
            is_active: section.is_active,
        });
    }

    Ok(records)
}

/// Parser for tab syntax.
///
/// # Example
///
/// ```
/// use codetabs_syntax::{KnownLanguages, TabParser};
///
/// let registry = KnownLanguages::new().with("js").with("python");
/// let parser = TabParser::new(Some(&registry)).silent();
///
/// let records = parser.parse("::: JS | js | active\nconsole.log(1)\n\n::: Python\nprint(1)").unwrap();
/// assert_eq!(records.len(), 2);
/// assert!(records[0].is_active);
/// assert_eq!(records[1].language, "python");
/// ```
#[derive(Clone, Copy)]
pub struct TabParser<'a> {
    registry: Option<&'a dyn LanguageRegistry>,
    notifier: Option<&'a dyn Notifier>,
    silent: bool,
}

impl<'a> TabParser<'a> {
    /// Create a parser resolving languages against `registry`.
    #[must_use]
    pub fn new(registry: Option<&'a dyn LanguageRegistry>) -> Self {
        Self {
            registry,
            notifier: None,
            silent: false,
        }
    }

    /// Report parse failures to `notifier` (unless silent).
    #[must_use]
    pub fn with_notifier(mut self, notifier: &'a dyn Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Suppress user-facing notifications.
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Parse `text` in whichever grammar it uses.
    pub fn parse(&self, text: &str) -> Result<Vec<TabRecord>, ParseError> {
        let result = match detect_grammar(text) {
            Some(Grammar::Current) => current::parse(text, self.registry),
            Some(Grammar::Legacy) => legacy::parse(text, self.registry),
            None => Err(ParseError::new(
                ParseErrorKind::NoMatchingGrammar,
                None,
                text,
            )),
        };

        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    /// Whether `text` is well-formed tab syntax. Never notifies.
    pub fn looks_like_tabs(&self, text: &str) -> bool {
        self.silent().parse(text).is_ok()
    }

    fn report(&self, err: &ParseError) {
        if self.silent {
            tracing::debug!(error = %err, "Tab syntax rejected");
            return;
        }
        tracing::warn!(error = %err, "Tab syntax rejected");
        if let Some(notifier) = self.notifier {
            notifier.notify(Level::Error, &format!("Invalid tab syntax: {err}"));
        }
    }
}

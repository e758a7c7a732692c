//! Batch conversion between code blocks and tabs widgets.
//!
//! Every batch item moves through the same states:
//!
//! ```text
//! candidate -> valid ---------> applied | failed
//!           -> invalid (missing id / missing payload)
//!           -> skipped (no tab syntax)
//! ```
//!
//! Valid items are written to the host in parallel on the rayon pool. One
//! item failing never stops the others; every outcome ends up in the
//! [`BatchReport`].

use codetabs_data::{LEGACY_SOURCE_ATTR, TABS_DATA_ATTR, TabsData, encode, read_attrs};
use codetabs_host::{Attrs, BlockId, BlockKind, BlockRef, Candidate, Host, HostError};
use codetabs_renderer::HtmlRenderer;
use codetabs_syntax::{LanguageRegistry, Notifier, NullNotifier, TabParser, detect_grammar, generate_syntax};
use rayon::prelude::*;

use crate::report::{BatchReport, Direction, InvalidReason, Outcome, SkipReason};

/// Characters editors leave in block text that must not reach the parser.
pub const INVISIBLE_MARKERS: [char; 3] = ['\u{200B}', '\u{FEFF}', '\u{200D}'];

/// Converts host blocks between code blocks and tabs widgets.
///
/// # Example
///
/// ```ignore
/// use codetabs_convert::Converter;
/// use codetabs_host::{BlockKind, MockHost};
///
/// let host = MockHost::new().with_block("a", BlockKind::Markdown, "```\n::: A\nx\n```");
/// let report = Converter::new(&host).code_to_tabs(host.code_blocks());
/// assert_eq!(report.summary().success, 1);
/// ```
pub struct Converter<'a> {
    host: &'a dyn Host,
    registry: Option<&'a dyn LanguageRegistry>,
    renderer: HtmlRenderer<'a>,
    notifier: &'a dyn Notifier,
    strip_chars: Vec<char>,
    code_language: String,
}

/// A candidate that parsed and is ready to be written.
struct Prepared {
    id: BlockId,
    data: TabsData,
}

impl<'a> Converter<'a> {
    /// Create a converter writing to `host`.
    #[must_use]
    pub fn new(host: &'a dyn Host) -> Self {
        Self {
            host,
            registry: None,
            renderer: HtmlRenderer::new(),
            notifier: &NullNotifier,
            strip_chars: INVISIBLE_MARKERS.to_vec(),
            code_language: String::new(),
        }
    }

    /// Resolve languages against `registry`.
    #[must_use]
    pub fn with_registry(mut self, registry: &'a dyn LanguageRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Render widgets with `renderer`.
    #[must_use]
    pub fn with_renderer(mut self, renderer: HtmlRenderer<'a>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Report syntax errors and batch summaries to `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: &'a dyn Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the set of characters stripped from block text on intake.
    #[must_use]
    pub fn with_strip_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.strip_chars = chars.into_iter().collect();
        self
    }

    /// Info string of code blocks produced by [`tabs_to_code`](Self::tabs_to_code).
    #[must_use]
    pub fn with_code_language(mut self, lang: impl Into<String>) -> Self {
        self.code_language = lang.into();
        self
    }

    /// Widget blocks in the host, structured or legacy, in document order.
    pub fn widget_blocks(&self) -> Result<Vec<BlockRef>, HostError> {
        let mut blocks = self.host.blocks_with_attr(TABS_DATA_ATTR)?;
        for block in self.host.blocks_with_attr(LEGACY_SOURCE_ATTR)? {
            if !blocks.iter().any(|b| b.id().is_some() && b.id() == block.id()) {
                blocks.push(block);
            }
        }
        Ok(blocks)
    }

    /// Turn code blocks holding tab syntax into tabs widgets.
    ///
    /// Text matching neither grammar is skipped silently; text that matches
    /// a grammar but fails to parse is reported to the notifier and skipped.
    pub fn code_to_tabs(&self, blocks: Vec<BlockRef>) -> BatchReport {
        let parser = TabParser::new(self.registry).with_notifier(self.notifier);
        let mut outcomes = Vec::with_capacity(blocks.len());
        let mut prepared = Vec::new();

        for (position, block) in blocks.into_iter().enumerate() {
            match self.prepare(&parser, block.resolve()) {
                Ok(item) => prepared.push((position, item)),
                Err(outcome) => outcomes.push((position, outcome)),
            }
        }

        let written: Vec<(usize, Outcome)> = prepared
            .par_iter()
            .map(|(position, item)| {
                let outcome = match self.write_widget(item) {
                    Ok(()) => Outcome::Applied(item.id.clone()),
                    Err(error) => {
                        tracing::error!(block = %item.id, error = %error, "Failed to convert block to tabs");
                        Outcome::Failed {
                            block: item.id.clone(),
                            error,
                        }
                    }
                };
                (*position, outcome)
            })
            .collect();
        outcomes.extend(written);
        outcomes.sort_by_key(|(position, _)| *position);

        let outcomes = outcomes.into_iter().map(|(_, outcome)| outcome).collect();
        self.finish(Direction::ToTabs, outcomes)
    }

    /// Turn tabs widgets back into code blocks holding tab syntax.
    ///
    /// The code block is inserted after the widget, then the widget is
    /// deleted. Widgets with only a legacy source are upgraded on the way.
    pub fn tabs_to_code(&self, blocks: Vec<BlockRef>) -> BatchReport {
        let outcomes = blocks
            .into_par_iter()
            .map(|block| {
                let Some(id) = block.id().cloned() else {
                    return Outcome::Invalid {
                        block: None,
                        reason: InvalidReason::MissingId,
                    };
                };
                match self.write_code(&id) {
                    Ok(true) => Outcome::Applied(id),
                    Ok(false) => Outcome::Invalid {
                        block: Some(id),
                        reason: InvalidReason::MissingPayload,
                    },
                    Err(error) => {
                        tracing::error!(block = %id, error = %error, "Failed to convert tabs to code");
                        Outcome::Failed { block: id, error }
                    }
                }
            })
            .collect();

        self.finish(Direction::ToCode, outcomes)
    }

    fn prepare(&self, parser: &TabParser<'_>, candidate: Candidate) -> Result<Prepared, Outcome> {
        let Candidate { id, text } = candidate;
        let text: String = text.chars().filter(|c| !self.strip_chars.contains(c)).collect();

        let Some(id) = id else {
            return Err(Outcome::Invalid {
                block: None,
                reason: InvalidReason::MissingId,
            });
        };
        if text.trim().is_empty() {
            return Err(Outcome::Invalid {
                block: Some(id),
                reason: InvalidReason::MissingPayload,
            });
        }
        if detect_grammar(&text).is_none() {
            tracing::debug!(block = %id, "No tab syntax, skipping");
            return Err(Outcome::Skipped {
                block: Some(id),
                reason: SkipReason::NotTabSyntax,
            });
        }

        match parser.parse(&text) {
            Ok(records) => Ok(Prepared {
                id,
                data: TabsData::from_records(records),
            }),
            Err(_) => Err(Outcome::Skipped {
                block: Some(id),
                reason: SkipReason::InvalidSyntax,
            }),
        }
    }

    /// Attributes go first: a block whose content write fails still carries
    /// its data and shows up in [`widget_blocks`](Self::widget_blocks).
    fn write_widget(&self, item: &Prepared) -> Result<(), HostError> {
        let attrs = Attrs::from([(TABS_DATA_ATTR.to_owned(), encode(&item.data))]);
        self.host.set_attrs(&item.id, &attrs)?;
        let html = self.renderer.render(&item.data);
        self.host.update_block(BlockKind::Html, &html, &item.id)
    }

    /// Returns `Ok(false)` when the block has no readable tab data.
    fn write_code(&self, id: &BlockId) -> Result<bool, HostError> {
        let attrs = self.host.get_attrs(id)?;
        let Some(data) = read_attrs(
            attrs.get(TABS_DATA_ATTR).map(String::as_str),
            attrs.get(LEGACY_SOURCE_ATTR).map(String::as_str),
            self.registry,
        ) else {
            return Ok(false);
        };

        let syntax = generate_syntax(&data.to_records(), self.registry);
        let fence = code_fence(&syntax);
        let content = format!("{fence}{}\n{syntax}\n{fence}", self.code_language);
        self.host.insert_block(BlockKind::Markdown, &content, Some(id))?;
        self.host.delete_block(id)?;
        Ok(true)
    }

    fn finish(&self, direction: Direction, outcomes: Vec<Outcome>) -> BatchReport {
        let report = BatchReport {
            direction,
            outcomes,
        };
        let summary = report.summary();
        tracing::info!(
            ?direction,
            success = summary.success,
            failure = summary.failure,
            invalid = summary.invalid,
            skipped = summary.skipped,
            "Batch conversion finished"
        );
        report.notify(self.notifier);
        report
    }
}

/// Backtick fence longer than any backtick run in `body`, at least three.
fn code_fence(body: &str) -> String {
    let longest = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

//! Markdown collaborator for `markdown-render` tabs.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::html::is_safe_url;

/// Converts markdown source to an HTML fragment.
pub trait MarkdownEngine: Send + Sync {
    /// Render `source` to HTML.
    fn render(&self, source: &str) -> String;
}

/// pulldown-cmark engine.
///
/// Raw HTML in the source is emitted as text, so `<script>` inside a
/// markdown tab shows up literally instead of executing. Link and image
/// destinations with a scheme other than http(s) or mailto become `#`.
#[derive(Clone, Copy, Debug)]
pub struct CmarkEngine {
    options: Options,
}

impl CmarkEngine {
    /// Engine with tables, strikethrough and task lists enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl Default for CmarkEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownEngine for CmarkEngine {
    fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(tag) => Event::Start(neutralize_destination(tag)),
            other => other,
        });

        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

fn neutralize_destination(tag: Tag<'_>) -> Tag<'_> {
    match tag {
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } if !is_safe_url(&dest_url) => Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        },
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } if !is_safe_url(&dest_url) => Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        },
        other => other,
    }
}

//! Tabs widget HTML rendering.

use std::fmt::Write;

use codetabs_data::{TabItem, TabsData, encode, encode_text};
use codetabs_syntax::{MARKDOWN_RENDER, PLAINTEXT};

use crate::highlight::Highlighter;
use crate::html::{escape_html, escape_text_nodes, fill_blank_lines};
use crate::markdown::MarkdownEngine;

/// Renders [`TabsData`] to the widget's HTML fragment.
///
/// # Output HTML Structure
///
/// ```html
/// <div class="code-tabs" data-active="0" data-tabs="eyJ2ZXJzaW9uIjox...">
/// <div class="code-tabs-buttons" role="tablist">
/// <button class="code-tabs-button active" role="tab" data-tab-index="0"
///         aria-selected="true" tabindex="0" draggable="true">JS</button>
/// <button class="code-tabs-button" role="tab" data-tab-index="1"
///         aria-selected="false" tabindex="-1" draggable="true">Notes</button>
/// </div>
/// <div class="code-tabs-panel active" role="tabpanel" data-tab-index="0"
///      data-lang="js"><pre><code class="language-js">...</code></pre></div>
/// <div class="code-tabs-panel" role="tabpanel" data-tab-index="1"
///      data-lang="markdown-render" data-raw="..." hidden>
///   <div class="markdown-body">...</div></div>
/// </div>
/// ```
///
/// The output depends only on the data and the collaborators, so the same
/// input always renders byte-identical HTML. Blank lines are filled with a
/// zero-width space because hosts drop empty lines from HTML blocks.
///
/// # Example
///
/// ```
/// use codetabs_data::{TabItem, TabsData};
/// use codetabs_renderer::HtmlRenderer;
///
/// let data = TabsData::create_default(1).with_tab_added(TabItem::new("B", "plaintext", "a < b"));
/// let html = HtmlRenderer::new().render(&data);
///
/// assert!(html.starts_with(r#"<div class="code-tabs" data-active="0""#));
/// assert!(html.contains("a &lt; b"));
/// ```
#[derive(Clone, Copy, Default)]
pub struct HtmlRenderer<'a> {
    highlighter: Option<&'a dyn Highlighter>,
    markdown: Option<&'a dyn MarkdownEngine>,
}

impl<'a> HtmlRenderer<'a> {
    /// Renderer without collaborators: all code is escaped plain text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight code tabs whose language `highlighter` knows.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: &'a dyn Highlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Render `markdown-render` tabs with `engine`.
    #[must_use]
    pub fn with_markdown(mut self, engine: &'a dyn MarkdownEngine) -> Self {
        self.markdown = Some(engine);
        self
    }

    /// Render the widget. The data is normalized first.
    #[must_use]
    pub fn render(&self, data: &TabsData) -> String {
        let data = data.snapshot();
        let capacity = 512 + data.tabs.iter().map(|t| t.code.len() * 2).sum::<usize>();
        let mut output = String::with_capacity(capacity);

        let _ = write!(
            output,
            r#"<div class="code-tabs" data-active="{}" data-tabs="{}">"#,
            data.active,
            encode(&data)
        );

        output.push_str("\n<div class=\"code-tabs-buttons\" role=\"tablist\">");
        for (idx, tab) in data.tabs.iter().enumerate() {
            let selected = idx == data.active;
            let _ = write!(
                output,
                "\n<button class=\"code-tabs-button{}\" role=\"tab\" data-tab-index=\"{idx}\" aria-selected=\"{selected}\" tabindex=\"{}\" draggable=\"true\">{}</button>",
                if selected { " active" } else { "" },
                if selected { "0" } else { "-1" },
                escape_html(&tab.title)
            );
        }
        output.push_str("\n</div>");

        for (idx, tab) in data.tabs.iter().enumerate() {
            self.render_panel(&mut output, idx, tab, idx == data.active);
        }
        output.push_str("\n</div>");

        fill_blank_lines(&output)
    }

    fn render_panel(&self, output: &mut String, idx: usize, tab: &TabItem, selected: bool) {
        let is_markdown = tab.lang == MARKDOWN_RENDER;
        let _ = write!(
            output,
            "\n<div class=\"code-tabs-panel{}\" role=\"tabpanel\" data-tab-index=\"{idx}\" data-lang=\"{}\"",
            if selected { " active" } else { "" },
            escape_html(&tab.lang)
        );
        if is_markdown {
            let _ = write!(output, r#" data-raw="{}""#, encode_text(&tab.code));
        }
        output.push_str(if selected { ">" } else { " hidden>" });

        if is_markdown {
            output.push_str(r#"<div class="markdown-body">"#);
            match self.markdown {
                Some(engine) => output.push_str(&escape_text_nodes(&engine.render(&tab.code))),
                None => {
                    let _ = write!(output, "<pre>{}</pre>", escape_html(&tab.code));
                }
            }
            output.push_str("</div>");
        } else {
            let _ = write!(
                output,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(&tab.lang),
                self.code_html(&tab.code, &tab.lang)
            );
        }

        output.push_str("</div>");
    }

    fn code_html(&self, code: &str, lang: &str) -> String {
        let Some(highlighter) = self.highlighter else {
            return escape_html(code);
        };
        if lang == PLAINTEXT || !highlighter.has_language(lang) {
            return escape_html(code);
        }
        match highlighter.highlight(code, lang) {
            Ok(html) => escape_text_nodes(&html),
            Err(e) => {
                tracing::warn!(lang, error = %e, "Highlighting failed, rendering plain text");
                escape_html(code)
            }
        }
    }
}

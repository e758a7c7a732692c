//! HTML rendering for the codetabs widget.
//!
//! [`HtmlRenderer`] turns [`TabsData`](codetabs_data::TabsData) into a
//! deterministic, self-describing HTML fragment. Two optional collaborators
//! plug in behind traits:
//!
//! - [`Highlighter`]: syntax highlighting, with [`SyntectHighlighter`] as the
//!   bundled implementation
//! - [`MarkdownEngine`]: rendering of `markdown-render` tabs, with
//!   [`CmarkEngine`] backed by pulldown-cmark
//!
//! The rendered fragment embeds the encoded data, so [`extract_data`] can
//! recover it without any other state. [`TabsController`] holds the
//! per-view interaction state of a rendered widget.
//!
//! # Example
//!
//! ```
//! use codetabs_data::TabsData;
//! use codetabs_renderer::{CmarkEngine, HtmlRenderer, SyntectHighlighter, extract_data};
//!
//! let highlighter = SyntectHighlighter::new();
//! let markdown = CmarkEngine::new();
//! let renderer = HtmlRenderer::new()
//!     .with_highlighter(&highlighter)
//!     .with_markdown(&markdown);
//!
//! let data = TabsData::create_default(1);
//! let html = renderer.render(&data);
//! assert_eq!(extract_data(&html), Some(data));
//! ```

mod controller;
mod extract;
mod highlight;
mod html;
mod markdown;
mod renderer;

pub use controller::{Point, TabsController};
pub use extract::{extract_data, extract_raw_sources};
pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};
pub use html::{BLANK_LINE_FILLER, escape_html, escape_text_nodes, fill_blank_lines, is_safe_url};
pub use markdown::{CmarkEngine, MarkdownEngine};
pub use renderer::HtmlRenderer;

//! Recovery of embedded data from rendered widget HTML.

use codetabs_data::{TabsData, decode, decode_text};

use crate::html::{attr_value, opening_tags};

const CONTAINER_TAG: &str = r#"<div class="code-tabs""#;
const PANEL_TAG: &str = r#"<div class="code-tabs-panel"#;

/// Decode the data embedded in the first widget of `html`.
///
/// Returns `None` when there is no widget or its payload is unreadable.
pub fn extract_data(html: &str) -> Option<TabsData> {
    let tag = opening_tags(html, CONTAINER_TAG).next()?;
    decode(attr_value(tag, "data-tabs"))
}

/// Original markdown sources of `markdown-render` panels, by tab index.
pub fn extract_raw_sources(html: &str) -> Vec<(usize, String)> {
    opening_tags(html, PANEL_TAG)
        .filter_map(|tag| {
            let index: usize = attr_value(tag, "data-tab-index")?.parse().ok()?;
            let source = decode_text(attr_value(tag, "data-raw")?)
                .inspect_err(|e| tracing::warn!(index, error = %e, "Unreadable raw source"))
                .ok()?;
            Some((index, source))
        })
        .collect()
}

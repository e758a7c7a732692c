//! Inserting new widgets.

use codetabs_data::{TABS_DATA_ATTR, TabsData, encode};
use codetabs_host::{Attrs, BlockId, BlockKind, Host};
use codetabs_renderer::HtmlRenderer;

use crate::error::ConvertError;

/// Insert a default widget (one placeholder tab titled `Tab{index}`).
pub fn insert_widget(
    host: &dyn Host,
    renderer: &HtmlRenderer<'_>,
    anchor: Option<&BlockId>,
    index: usize,
) -> Result<BlockId, ConvertError> {
    insert_widget_with(host, renderer, anchor, &TabsData::create_default(index))
}

/// Insert a widget holding `data` after `anchor`, or at the end.
///
/// Invalid data is rejected before anything is written. If the data
/// attribute cannot be stored, the new block is removed again.
pub fn insert_widget_with(
    host: &dyn Host,
    renderer: &HtmlRenderer<'_>,
    anchor: Option<&BlockId>,
    data: &TabsData,
) -> Result<BlockId, ConvertError> {
    let validation = data.validate();
    if !validation.is_ok() {
        return Err(ConvertError::Invalid(validation.errors));
    }
    let data = data.snapshot();

    let html = renderer.render(&data);
    let id = host.insert_block(BlockKind::Html, &html, anchor)?;
    let attrs = Attrs::from([(TABS_DATA_ATTR.to_owned(), encode(&data))]);
    if let Err(e) = host.set_attrs(&id, &attrs) {
        if let Err(cleanup) = host.delete_block(&id) {
            tracing::warn!(block = %id, error = %cleanup, "Failed to remove widget without data");
        }
        return Err(e.into());
    }

    tracing::info!(block = %id, tabs = data.tabs.len(), "Inserted tabs widget");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use codetabs_data::{PLACEHOLDER_CODE, TabItem, ValidationError, decode};
    use codetabs_host::{HostOp, MockHost};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_insert_default_widget_after_anchor() {
        let host = MockHost::new()
            .with_block("a", BlockKind::Markdown, "intro")
            .with_block("b", BlockKind::Markdown, "outro");

        let id = insert_widget(&host, &HtmlRenderer::new(), Some(&BlockId::new("a")), 3).unwrap();

        let blocks = host.blocks();
        assert_eq!(blocks[1].id, id);
        assert_eq!(blocks[1].kind, BlockKind::Html);
        let data = decode(blocks[1].attrs.get(TABS_DATA_ATTR).map(String::as_str)).unwrap();
        assert_eq!(data.tabs, vec![TabItem::new("Tab3", "plaintext", PLACEHOLDER_CODE)]);
        assert!(blocks[1].content.contains("Tab3"));
    }

    #[test]
    fn test_insert_rejects_invalid_data() {
        let host = MockHost::new();
        let data = TabsData {
            version: 1,
            active: 0,
            tabs: vec![TabItem::new("A", "js", "")],
        };

        let err = insert_widget_with(&host, &HtmlRenderer::new(), None, &data).unwrap_err();
        assert!(matches!(err, ConvertError::Invalid(_)));
        assert!(host.blocks().is_empty());
    }

    #[test]
    fn test_insert_reports_empty_title_instead_of_dropping_it() {
        let host = MockHost::new();
        let data = TabsData {
            version: 1,
            active: 0,
            tabs: vec![TabItem::new("A", "js", "x"), TabItem::new(" ", "js", "y")],
        };

        let err = insert_widget_with(&host, &HtmlRenderer::new(), None, &data).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Invalid(ref errors) if errors == &[ValidationError::EmptyTitle { index: 1 }]
        ));
        assert!(host.blocks().is_empty());
    }

    #[test]
    fn test_insert_rolls_back_when_attrs_fail() {
        let host = MockHost::new().with_block("a", BlockKind::Markdown, "intro");
        host.fail(HostOp::SetAttrs, "block-1");

        let err = insert_widget(&host, &HtmlRenderer::new(), Some(&BlockId::new("a")), 1).unwrap_err();
        assert!(matches!(err, ConvertError::Host(_)));
        let blocks = host.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, BlockId::new("a"));
    }
}

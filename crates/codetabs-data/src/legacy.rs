//! Upgrade of widgets that only carry their source text.
//!
//! Older widgets stored the tab syntax itself (sometimes HTML-entity
//! escaped by the editor) instead of structured data. Such sources are
//! re-parsed here; nothing is reported to the user on failure.

use codetabs_syntax::{LEGACY_MARKER, LanguageRegistry, TabParser};

use crate::model::TabsData;

/// Rebuild structured data from a stored tab-syntax source.
///
/// Entity-escaped legacy text (`&lt;`, `&amp;` and friends) is unescaped
/// before parsing. Returns `None` when the text is not valid tab syntax in
/// either grammar.
pub fn upgrade_from_legacy(text: &str, registry: Option<&dyn LanguageRegistry>) -> Option<TabsData> {
    let repaired = if text.contains(LEGACY_MARKER) {
        html_escape::decode_html_entities(text)
    } else {
        text.into()
    };

    match TabParser::new(registry).silent().parse(&repaired) {
        Ok(records) => Some(TabsData::from_records(records)),
        Err(err) => {
            tracing::debug!(error = %err, "Legacy tab source could not be upgraded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use codetabs_syntax::KnownLanguages;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::TabItem;

    #[test]
    fn test_upgrade_legacy_grammar_with_entities() {
        let registry: KnownLanguages = ["js", "html"].into_iter().collect();
        let text = "tab::: Markup\nlang::: html\n&lt;p class=&quot;x&quot;&gt;a &amp; b&lt;/p&gt;\ntab::: JS:::active\nlang::: js\nrun()";

        let data = upgrade_from_legacy(text, Some(&registry)).unwrap();

        assert_eq!(data.active, 1);
        assert_eq!(
            data.tabs,
            vec![
                TabItem::new("Markup", "html", "<p class=\"x\">a & b</p>"),
                TabItem::new("JS", "js", "run()"),
            ]
        );
    }

    #[test]
    fn test_upgrade_current_grammar_keeps_entities() {
        let data = upgrade_from_legacy("::: HTML | html\n&lt;br&gt;", None).unwrap();
        assert_eq!(data.tabs[0].code, "&lt;br&gt;");
    }

    #[test]
    fn test_upgrade_invalid_source_is_none() {
        assert_eq!(upgrade_from_legacy("plain code", None), None);
        assert_eq!(upgrade_from_legacy("tab::: A\nlang::: js\n", None), None);
        assert_eq!(upgrade_from_legacy("", None), None);
    }
}

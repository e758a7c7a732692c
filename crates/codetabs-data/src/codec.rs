//! Persisted attribute encoding.
//!
//! Block attributes cannot hold newlines or control characters, so payloads
//! are stored as base64 of their UTF-8 bytes:
//!
//! ```text
//! TabsData --serde_json--> {"version":1,...} --base64--> eyJ2ZXJzaW9uIjox...
//! ```
//!
//! Older documents stored the text itself with every newline replaced by the
//! two-character marker `\n`. The marker can never appear in base64 output,
//! so its presence selects the legacy path.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::Deserialize;

use crate::model::{CURRENT_VERSION, TabItem, TabsData, normalize_parts};

/// Newline replacement used by the legacy attribute format.
pub const LEGACY_NEWLINE_MARKER: &str = "\\n";

/// Why an attribute value could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("attribute value is empty")]
    Empty,
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid tab data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode text for storage in a single-line attribute.
pub fn encode_text(text: &str) -> String {
    BASE64_STANDARD.encode(text.as_bytes())
}

/// Decode an attribute value produced by [`encode_text`] or the legacy
/// newline-marker format.
pub fn decode_text(raw: &str) -> Result<String, CodecError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CodecError::Empty);
    }
    if raw.contains(LEGACY_NEWLINE_MARKER) {
        return Ok(raw.replace(LEGACY_NEWLINE_MARKER, "\n"));
    }
    let bytes = BASE64_STANDARD.decode(raw)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode tab data as an attribute value. The data is normalized first.
pub fn encode(data: &TabsData) -> String {
    let normalized = data.snapshot();
    match serde_json::to_string(&normalized) {
        Ok(json) => encode_text(&json),
        // Serializing plain strings and integers does not fail.
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize tab data");
            String::new()
        }
    }
}

/// Decode an attribute value into normalized tab data.
///
/// Returns `None` for absent, empty or malformed values; failures are logged
/// and never propagated.
pub fn decode(raw: Option<&str>) -> Option<TabsData> {
    let raw = raw?;
    match try_decode(raw) {
        Ok(data) => Some(data),
        Err(CodecError::Empty) => None,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to decode tab data attribute");
            None
        }
    }
}

/// Decode an attribute value, reporting why it failed.
pub fn try_decode(raw: &str) -> Result<TabsData, CodecError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CodecError::Empty);
    }

    let payload: RawTabsData = if raw.starts_with('{') || raw.contains(LEGACY_NEWLINE_MARKER) {
        // Legacy plain JSON: `\n` inside strings is already a JSON escape, so
        // only substitute the marker when the text is not valid JSON as-is.
        serde_json::from_str(raw).or_else(|_| {
            serde_json::from_str(&raw.replace(LEGACY_NEWLINE_MARKER, "\n"))
        })?
    } else {
        serde_json::from_str(&decode_text(raw)?)?
    };

    Ok(payload.migrate())
}

/// Lenient shape of stored tab data, before migration and normalization.
#[derive(Debug, Deserialize)]
struct RawTabsData {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    active: i64,
    tabs: Vec<RawTabItem>,
}

#[derive(Debug, Deserialize)]
struct RawTabItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    lang: String,
    #[serde(default)]
    code: String,
}

impl RawTabsData {
    fn migrate(self) -> TabsData {
        if self.version > CURRENT_VERSION {
            tracing::warn!(
                version = self.version,
                current = CURRENT_VERSION,
                "Tab data written by a newer version, reading what is understood"
            );
        } else if self.version < CURRENT_VERSION {
            tracing::debug!(version = self.version, "Migrating tab data");
        }
        let tabs = self
            .tabs
            .into_iter()
            .map(|t| TabItem::new(t.title, t.lang, t.code))
            .collect();
        normalize_parts(self.active, tabs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> TabsData {
        TabsData {
            version: CURRENT_VERSION,
            active: 1,
            tabs: vec![
                TabItem::new("JS", "js", "if (a < b && c) {\n  run(\"x\");\n}"),
                TabItem::new("Docs", "markdown-render", "# Привет\n\n- item"),
            ],
        }
    }

    #[test]
    fn test_encode_is_single_line_ascii() {
        let encoded = encode(&sample());
        assert!(encoded.is_ascii());
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains(LEGACY_NEWLINE_MARKER));
    }

    #[test]
    fn test_round_trip() {
        let data = sample().normalize();
        assert_eq!(decode(Some(&encode(&data))), Some(data));
    }

    #[test]
    fn test_encode_normalizes() {
        let mut data = sample();
        data.active = 10;
        data.tabs[0].title = " JS ".to_owned();
        let decoded = decode(Some(&encode(&data))).unwrap();
        assert_eq!(decoded.active, 1);
        assert_eq!(decoded.tabs[0].title, "JS");
    }

    #[test]
    fn test_decode_empty_or_absent_is_none() {
        assert_eq!(decode(None), None);
        assert_eq!(decode(Some("")), None);
        assert_eq!(decode(Some("   ")), None);
    }

    #[test]
    fn test_decode_garbage_is_none() {
        assert_eq!(decode(Some("%%% not base64 %%%")), None);
        assert_eq!(decode(Some(&encode_text("not json"))), None);
        assert_eq!(decode(Some(&encode_text(r#"{"tabs": 3}"#))), None);
    }

    #[test]
    fn test_decode_migrates_unversioned_payload() {
        let raw = encode_text(r#"{"active": -2, "tabs": [{"title": " A ", "code": "x"}]}"#);
        let data = decode(Some(&raw)).unwrap();

        assert_eq!(data.version, CURRENT_VERSION);
        assert_eq!(data.active, 0);
        assert_eq!(data.tabs, vec![TabItem::new("A", "plaintext", "x")]);
    }

    #[test]
    fn test_decode_legacy_marker_json() {
        let raw = r#"{"version":1,"active":0,"tabs":[{"title":"A","lang":"js","code":"a()\nb()"}]}"#;
        let data = decode(Some(raw)).unwrap();
        assert_eq!(data.tabs[0].code, "a()\nb()");
    }

    #[test]
    fn test_decode_legacy_marker_between_tokens() {
        let raw = r#"{\n"active": 0,\n"tabs": [{"title": "A", "lang": "js", "code": "x"}]\n}"#;
        let data = decode(Some(raw)).unwrap();
        assert_eq!(data.tabs[0].title, "A");
    }

    #[test]
    fn test_decode_text_round_trip_and_legacy() {
        let text = "tab::: JS\nlang::: js\nconsole.log('é')";
        assert_eq!(decode_text(&encode_text(text)).unwrap(), text);
        assert_eq!(
            decode_text(r"tab::: JS\nlang::: js\nx()").unwrap(),
            "tab::: JS\nlang::: js\nx()"
        );
    }

    #[test]
    fn test_decode_text_errors() {
        assert!(matches!(decode_text(""), Err(CodecError::Empty)));
        assert!(matches!(decode_text("@@@"), Err(CodecError::Base64(_))));
        let invalid_utf8 = BASE64_STANDARD.encode([0xff, 0xfe]);
        assert!(matches!(decode_text(&invalid_utf8), Err(CodecError::Utf8(_))));
    }
}

//! Block identities and tagged block intake.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute map of a block.
pub type Attrs = BTreeMap<String, String>;

/// Identifier of a host block.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Content type of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Markdown source, including fenced code blocks.
    Markdown,
    /// Raw HTML, used for rendered widgets.
    Html,
}

/// A block handed to the converter, in whichever shape the host produced.
///
/// Editors expose blocks either as rendered elements (text already
/// extracted) or as storage rows (markdown source, usually a fenced code
/// block). Both are resolved once into a [`Candidate`] at intake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockRef {
    /// Rendered element: `text` is the block's visible text.
    Dom { id: Option<BlockId>, text: String },
    /// Storage row: `markdown` is the block's source.
    Row { id: Option<BlockId>, markdown: String },
}

impl BlockRef {
    /// Identifier of the referenced block, if known.
    #[must_use]
    pub fn id(&self) -> Option<&BlockId> {
        match self {
            Self::Dom { id, .. } | Self::Row { id, .. } => id.as_ref(),
        }
    }

    /// Resolve into an id and the text a conversion works on.
    #[must_use]
    pub fn resolve(self) -> Candidate {
        match self {
            Self::Dom { id, text } => Candidate { id, text },
            Self::Row { id, markdown } => Candidate {
                id,
                text: strip_code_fence(&markdown).to_owned(),
            },
        }
    }
}

/// A block after intake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: Option<BlockId>,
    pub text: String,
}

/// Body of a fenced code block, or the input unchanged when it is not one.
///
/// ```
/// use codetabs_host::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```text\n::: A\nx\n```"), "::: A\nx");
/// assert_eq!(strip_code_fence("::: A\nx"), "::: A\nx");
/// ```
pub fn strip_code_fence(markdown: &str) -> &str {
    let trimmed = markdown.trim();
    let Some(fence) = ["```", "~~~"].into_iter().find(|f| trimmed.starts_with(f)) else {
        return markdown;
    };
    let Some((_, body)) = trimmed.split_once('\n') else {
        return "";
    };
    let body = body.trim_end();
    match body.rsplit_once('\n') {
        Some((inner, last)) if last.trim_start().starts_with(fence) => inner,
        None if body.trim_start().starts_with(fence) => "",
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_block_id_display() {
        assert_eq!(BlockId::new("b-1").to_string(), "b-1");
        assert_eq!(BlockId::from("x").as_str(), "x");
    }

    #[test]
    fn test_dom_resolves_text_as_is() {
        let block = BlockRef::Dom {
            id: Some("a".into()),
            text: "```\n::: A\nx\n```".to_owned(),
        };
        assert_eq!(block.id(), Some(&BlockId::new("a")));
        assert_eq!(block.resolve().text, "```\n::: A\nx\n```");
    }

    #[test]
    fn test_row_resolves_fence_body() {
        let block = BlockRef::Row {
            id: None,
            markdown: "\n~~~tabs\n::: A\n```js\nx\n```\n~~~\n".to_owned(),
        };
        let candidate = block.resolve();
        assert_eq!(candidate.id, None);
        assert_eq!(candidate.text, "::: A\n```js\nx\n```");
    }

    #[test]
    fn test_strip_code_fence_edge_cases() {
        assert_eq!(strip_code_fence("```"), "");
        assert_eq!(strip_code_fence("```\n```"), "");
        assert_eq!(strip_code_fence("```\nunclosed"), "unclosed");
        assert_eq!(strip_code_fence("plain"), "plain");
    }

    #[test]
    fn test_block_kind_serde() {
        assert_eq!(serde_json::to_string(&BlockKind::Html).unwrap(), "\"html\"");
    }
}

//! Canonical tab data.

use codetabs_syntax::{PLAINTEXT, TabRecord};
use serde::{Deserialize, Serialize};

/// Version stamped on normalized data.
pub const CURRENT_VERSION: u32 = 1;

/// Code placed in newly inserted tabs.
pub const PLACEHOLDER_CODE: &str = "// Write your code here";

/// One tab of a widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabItem {
    /// Tab title shown on the header button.
    pub title: String,
    /// Language tag: lowercase, `plaintext` or `markdown-render`.
    pub lang: String,
    /// Raw source, never HTML-escaped.
    pub code: String,
}

impl TabItem {
    /// Create a tab item.
    #[must_use]
    pub fn new(title: impl Into<String>, lang: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lang: lang.into(),
            code: code.into(),
        }
    }
}

/// Structured contents of one tabs widget.
///
/// Values are treated as immutable snapshots: every editing operation
/// (`with_*`) returns a new normalized value and leaves `self` untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TabsData {
    /// Format version.
    pub version: u32,
    /// Index of the initially shown tab.
    pub active: usize,
    /// Tabs in display order.
    pub tabs: Vec<TabItem>,
}

impl TabsData {
    /// Data for a freshly inserted widget: one placeholder tab.
    #[must_use]
    pub fn create_default(index: usize) -> Self {
        Self {
            version: CURRENT_VERSION,
            active: 0,
            tabs: vec![TabItem::new(format!("Tab{index}"), PLAINTEXT, PLACEHOLDER_CODE)],
        }
    }

    /// Build data from parser output.
    ///
    /// The first record marked active becomes `active`; otherwise tab 0.
    #[must_use]
    pub fn from_records(records: Vec<TabRecord>) -> Self {
        let active = records.iter().position(|r| r.is_active).unwrap_or(0);
        let tabs = records
            .into_iter()
            .map(|r| TabItem::new(r.title, r.language, r.code))
            .collect();
        Self {
            version: CURRENT_VERSION,
            active,
            tabs,
        }
        .normalize()
    }

    /// Convert back to parser records (for regenerating tab syntax).
    #[must_use]
    pub fn to_records(&self) -> Vec<TabRecord> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(idx, tab)| TabRecord {
                title: tab.title.clone(),
                language: tab.lang.clone(),
                code: tab.code.clone(),
                is_active: idx == self.active,
            })
            .collect()
    }

    /// Canonicalize titles, languages and the active index.
    ///
    /// Titles are trimmed and tabs with empty titles dropped. Languages are
    /// trimmed and lowercased, empty ones become `plaintext`. The active index
    /// follows its tab when earlier tabs are dropped and is clamped into
    /// range. Idempotent.
    #[must_use]
    pub fn normalize(self) -> Self {
        normalize_parts(i64::try_from(self.active).unwrap_or(i64::MAX), self.tabs)
    }

    /// Deep, normalized copy for callers that must not share state.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone().normalize()
    }

    /// Currently active tab, if any.
    #[must_use]
    pub fn active_tab(&self) -> Option<&TabItem> {
        self.tabs.get(self.active)
    }

    /// Copy with a different active tab (clamped).
    #[must_use]
    pub fn with_active(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.active = index;
        next.normalize()
    }

    /// Copy with `item` appended.
    #[must_use]
    pub fn with_tab_added(&self, item: TabItem) -> Self {
        let mut next = self.clone();
        next.tabs.push(item);
        next.normalize()
    }

    /// Copy without the tab at `index`. Out-of-range indexes change nothing.
    #[must_use]
    pub fn with_tab_removed(&self, index: usize) -> Self {
        let mut next = self.clone();
        if index >= next.tabs.len() {
            return next.normalize();
        }
        next.tabs.remove(index);
        if index < next.active {
            next.active -= 1;
        }
        next.normalize()
    }

    /// Copy with the tab at `from` moved to position `to`.
    ///
    /// The active index keeps pointing at the same tab.
    #[must_use]
    pub fn with_tab_moved(&self, from: usize, to: usize) -> Self {
        let mut next = self.clone();
        let len = next.tabs.len();
        if from >= len || from == to {
            return next.normalize();
        }
        let to = to.min(len - 1);
        let item = next.tabs.remove(from);
        next.tabs.insert(to, item);

        let active = self.active;
        next.active = if active == from {
            to
        } else if from < active && active <= to {
            active - 1
        } else if to <= active && active < from {
            active + 1
        } else {
            active
        };
        next.normalize()
    }

    /// Copy with the tab at `index` replaced by `item`.
    #[must_use]
    pub fn with_tab_replaced(&self, index: usize, item: TabItem) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.tabs.get_mut(index) {
            *slot = item;
        }
        next.normalize()
    }
}

/// Shared normalization for typed data and lenient decoded payloads.
///
/// `active` is signed so raw negative values can be clamped.
pub(crate) fn normalize_parts(active: i64, tabs: Vec<TabItem>) -> TabsData {
    let mut kept = Vec::with_capacity(tabs.len());
    let mut new_active = None;

    for (idx, tab) in tabs.into_iter().enumerate() {
        // A dropped active tab hands over to the next kept one.
        if i64::try_from(idx).is_ok_and(|idx| idx == active) {
            new_active = Some(kept.len());
        }
        let title = tab.title.trim();
        if title.is_empty() {
            continue;
        }
        let lang = tab.lang.trim().to_lowercase();
        kept.push(TabItem {
            title: title.to_owned(),
            lang: if lang.is_empty() {
                PLAINTEXT.to_owned()
            } else {
                lang
            },
            code: tab.code,
        });
    }

    let last = kept.len().saturating_sub(1);
    let active = match new_active {
        Some(position) => position.min(last),
        None if active <= 0 => 0,
        None => last,
    };

    TabsData {
        version: CURRENT_VERSION,
        active,
        tabs: kept,
    }
}

//! Language tag resolution.
//!
//! Tab headers carry free-form language tags (`js`, `Python`, `markdown-render`).
//! [`resolve`] normalizes them against an optional [`LanguageRegistry`] so that
//! every stored tag is either known to the highlighter or `plaintext`.

use std::collections::{BTreeMap, BTreeSet};

/// Tag used for tabs without a recognizable language.
pub const PLAINTEXT: &str = "plaintext";

/// Tag that switches a tab to rendered-markdown mode instead of highlighting.
pub const MARKDOWN_RENDER: &str = "markdown-render";

/// Lookup capability of a syntax-highlighting registry.
pub trait LanguageRegistry: Send + Sync {
    /// Whether the registry knows the (already normalized) tag.
    fn has_language(&self, tag: &str) -> bool;

    /// Name stored for a known tag. Registries with aliases map them to
    /// their target; everything else keeps the tag as written.
    fn canonical_name(&self, tag: &str) -> Option<String> {
        self.has_language(tag).then(|| tag.to_owned())
    }
}

/// Registry backed by a fixed set of tags.
///
/// Tags are stored lowercase. Used for tests and for tags added through
/// configuration on top of a highlighter's own registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownLanguages {
    tags: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
}

impl KnownLanguages {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag to the registry.
    #[must_use]
    pub fn with(mut self, tag: &str) -> Self {
        self.insert(tag);
        self
    }

    /// Accept `alias` as another spelling of `target`, e.g. `py` for `python`.
    #[must_use]
    pub fn with_alias(mut self, alias: &str, target: &str) -> Self {
        let (alias, target) = (normalize(alias), normalize(target));
        if !alias.is_empty() && !target.is_empty() {
            self.aliases.insert(alias, target);
        }
        self
    }

    /// Insert a tag, normalizing it to lowercase.
    pub fn insert(&mut self, tag: &str) {
        let tag = normalize(tag);
        if !tag.is_empty() {
            self.tags.insert(tag);
        }
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KnownLanguages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut known = Self::new();
        for tag in iter {
            known.insert(tag.as_ref());
        }
        known
    }
}

impl LanguageRegistry for KnownLanguages {
    fn has_language(&self, tag: &str) -> bool {
        self.tags.contains(tag) || self.aliases.contains_key(tag)
    }

    fn canonical_name(&self, tag: &str) -> Option<String> {
        if self.tags.contains(tag) {
            return Some(tag.to_owned());
        }
        self.aliases.get(tag).cloned()
    }
}

/// Resolve a raw language tag to the tag stored on a tab.
///
/// - Trims and lowercases; empty input becomes `plaintext`.
/// - `markdown-render` always passes through.
/// - Without a registry the normalized tag is returned unchanged.
/// - With a registry, aliases map to their target and unknown tags fall
///   back to `plaintext`.
///
/// # Examples
///
/// ```
/// use codetabs_syntax::{KnownLanguages, resolve};
///
/// let registry = KnownLanguages::new().with("rust");
/// assert_eq!(resolve("  Rust ", Some(&registry)), "rust");
/// assert_eq!(resolve("cobol", Some(&registry)), "plaintext");
/// assert_eq!(resolve("cobol", None), "cobol");
/// ```
pub fn resolve(input: &str, registry: Option<&dyn LanguageRegistry>) -> String {
    let tag = normalize(input);
    if tag.is_empty() {
        return PLAINTEXT.to_owned();
    }
    if tag == MARKDOWN_RENDER || tag == PLAINTEXT {
        return tag;
    }
    match registry {
        None => tag,
        Some(registry) => registry
            .canonical_name(&tag)
            .unwrap_or_else(|| PLAINTEXT.to_owned()),
    }
}

/// Check whether a tag is recognized, without falling back.
///
/// Used to warn about unknown languages; it never blocks saving.
pub fn is_supported(input: &str, registry: Option<&dyn LanguageRegistry>) -> bool {
    let tag = normalize(input);
    if tag.is_empty() {
        return false;
    }
    if tag == MARKDOWN_RENDER || tag == PLAINTEXT {
        return true;
    }
    registry.is_none_or(|registry| registry.has_language(&tag))
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

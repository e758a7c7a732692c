//! Structured grammar errors.

use std::fmt;

/// Maximum number of characters kept in an error preview.
const PREVIEW_LEN: usize = 60;

/// What went wrong while parsing tab syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ParseErrorKind {
    /// Input starts with neither `:::` nor `tab:::`.
    NoMatchingGrammar,
    /// A section header has no title.
    MissingTitle,
    /// A legacy `lang:::` line has no language after the marker.
    MissingLanguageMarker,
    /// A section has no code after its header.
    MissingCode,
    /// More than one section is marked active.
    MultipleActive,
}

impl ParseErrorKind {
    fn describe(self) -> &'static str {
        match self {
            Self::NoMatchingGrammar => "text is not tab syntax",
            Self::MissingTitle => "tab title is missing",
            Self::MissingLanguageMarker => "language marker has no language",
            Self::MissingCode => "tab has no code",
            Self::MultipleActive => "more than one tab is marked active",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Grammar error with section context and a bounded preview.
///
/// Display format: `"tab 2: tab has no code (near \"::: PY\")"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{}{kind}{}", SectionLabel(.section), Near(.preview))]
pub struct ParseError {
    /// Error category.
    pub kind: ParseErrorKind,
    /// 1-based section index, when the error belongs to a section.
    pub section: Option<usize>,
    /// First line of the offending text, truncated.
    pub preview: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, section: Option<usize>, text: &str) -> Self {
        Self {
            kind,
            section,
            preview: preview(text),
        }
    }
}

/// `"tab N: "` prefix, empty for whole-input errors.
struct SectionLabel<'a>(&'a Option<usize>);

impl fmt::Display for SectionLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(section) => write!(f, "tab {section}: "),
            None => Ok(()),
        }
    }
}

/// Preview suffix such as ` (near "::: PY")`, empty without a preview.
struct Near<'a>(&'a str);

impl fmt::Display for Near<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, " (near {:?})", self.0)
    }
}

/// First non-blank line of `text`, cut to [`PREVIEW_LEN`] characters.
pub(crate) fn preview(text: &str) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    if line.chars().count() > PREVIEW_LEN {
        let cut: String = line.chars().take(PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        line.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_skips_blank_lines() {
        assert_eq!(preview("\n\n  ::: JS \ncode"), "::: JS");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(100);
        let result = preview(&long);
        assert_eq!(result.len(), PREVIEW_LEN + 3);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let long = "ж".repeat(61);
        assert_eq!(preview(&long).chars().count(), PREVIEW_LEN + 3);
    }

    #[test]
    fn test_display_with_section() {
        let err = ParseError::new(ParseErrorKind::MissingCode, Some(2), "::: PY");
        assert_eq!(err.to_string(), r#"tab 2: tab has no code (near "::: PY")"#);
    }

    #[test]
    fn test_display_without_section() {
        let err = ParseError::new(ParseErrorKind::NoMatchingGrammar, None, "");
        assert_eq!(err.to_string(), "text is not tab syntax");
    }
}

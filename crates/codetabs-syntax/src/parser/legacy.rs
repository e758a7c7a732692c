//! Legacy grammar: `tab::: Title` with an optional `lang::: tag` line.
//!
//! Older documents still carry this syntax. It is parsed for compatibility and
//! never generated; [`generate_syntax`](crate::generate_syntax) always emits
//! the current grammar.

use super::{LEGACY_MARKER, ParseError, ParseErrorKind, RawSection, TabRecord, finish};
use crate::language::LanguageRegistry;

/// Marker of the optional language line.
const LANG_MARKER: &str = "lang:::";

/// Suffix on a legacy title marking the active tab.
const ACTIVE_SUFFIX: &str = ":::active";

pub(super) fn parse(
    text: &str,
    registry: Option<&dyn LanguageRegistry>,
) -> Result<Vec<TabRecord>, ParseError> {
    let mut sections: Vec<RawSection<'_>> = Vec::new();
    // Whether the previous line was a header, so a `lang:::` line may follow.
    let mut after_header = false;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(LEGACY_MARKER) {
            let number = sections.len() + 1;
            sections.push(parse_title(line.trim(), rest, number)?);
            after_header = true;
            continue;
        }

        let number = sections.len();
        let Some(section) = sections.last_mut() else {
            continue;
        };
        if after_header && let Some(lang) = trimmed.strip_prefix(LANG_MARKER) {
            let lang = lang.trim();
            if lang.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::MissingLanguageMarker,
                    Some(number),
                    line,
                ));
            }
            section.language = Some(lang);
        } else {
            section.body.push(line);
        }
        after_header = false;
    }

    finish(sections, registry)
}

/// Parse the text after `tab:::` into a section with title and active flag.
fn parse_title<'a>(line: &'a str, rest: &str, number: usize) -> Result<RawSection<'a>, ParseError> {
    if rest.trim().is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::MissingTitle,
            Some(number),
            line,
        ));
    }

    let (title, is_active) = match rest.find(ACTIVE_SUFFIX) {
        Some(pos) => {
            let mut title = rest.to_owned();
            title.replace_range(pos..pos + ACTIVE_SUFFIX.len(), "");
            (title, true)
        }
        None => (rest.to_owned(), false),
    };

    let mut section = RawSection::new(line, title.trim().to_owned());
    section.is_active = is_active;
    Ok(section)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::language::KnownLanguages;

    fn registry() -> KnownLanguages {
        ["js", "python"].into_iter().collect()
    }

    #[test]
    fn test_tab_with_lang_line() {
        let registry = registry();
        let records = parse("tab::: JS\nlang::: js\nconsole.log(1)", Some(&registry)).unwrap();

        assert_eq!(
            records,
            vec![TabRecord {
                title: "JS".to_owned(),
                language: "js".to_owned(),
                code: "console.log(1)".to_owned(),
                is_active: false,
            }]
        );
    }

    #[test]
    fn test_language_inferred_without_lang_line() {
        let registry = registry();
        let records = parse("tab::: Python\nprint(1)", Some(&registry)).unwrap();
        assert_eq!(records[0].language, "python");
        assert_eq!(records[0].code, "print(1)");
    }

    #[test]
    fn test_active_suffix() {
        let registry = registry();
        let records = parse(
            "tab::: JS:::active\nlang::: js\nx()\ntab::: Python\nprint(1)",
            Some(&registry),
        )
        .unwrap();

        assert_eq!(records[0].title, "JS");
        assert!(records[0].is_active);
        assert!(!records[1].is_active);
    }

    #[test]
    fn test_lang_line_only_directly_after_header() {
        let registry = registry();
        let records = parse("tab::: Notes\nfirst\nlang::: js", Some(&registry)).unwrap();
        assert_eq!(records[0].language, "plaintext");
        assert_eq!(records[0].code, "first\nlang::: js");
    }

    #[test]
    fn test_marker_without_title_fails() {
        let err = parse("tab:::\ncode", None).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingTitle);
        assert_eq!(err.section, Some(1));

        let err = parse("tab:::   \ncode", None).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingTitle);
    }

    #[test]
    fn test_active_suffix_alone_is_missing_title() {
        let err = parse("tab:::  :::active\ncode", None).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingTitle);
    }

    #[test]
    fn test_empty_lang_marker_fails() {
        let err = parse("tab::: JS\nlang:::\nx()", None).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingLanguageMarker);
        assert_eq!(err.section, Some(1));
    }

    #[test]
    fn test_missing_code_fails() {
        let err = parse("tab::: JS\nlang::: js\n\n", None).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingCode);
    }

    #[test]
    fn test_multiple_active_fails() {
        let err = parse("tab::: A:::active\na\ntab::: B:::active\nb", None).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MultipleActive);
        assert_eq!(err.section, Some(2));
    }
}

//! Current grammar: `::: Title | lang | active`.

use super::fence::{FenceTracker, LineClass};
use super::{CURRENT_MARKER, ParseError, RawSection, TabRecord, finish};
use crate::language::LanguageRegistry;

/// Header token marking the initially active tab.
const ACTIVE: &str = "active";

pub(super) fn parse(
    text: &str,
    registry: Option<&dyn LanguageRegistry>,
) -> Result<Vec<TabRecord>, ParseError> {
    let mut sections: Vec<RawSection<'_>> = Vec::new();
    let mut fence = FenceTracker::new();

    for line in text.lines() {
        let class = fence.classify(line);
        if class == LineClass::Content
            && let Some(header) = line.trim_start().strip_prefix(CURRENT_MARKER)
        {
            sections.push(parse_header(line, header));
            continue;
        }
        // Only blank lines can precede the first header.
        if let Some(section) = sections.last_mut() {
            section.body.push(line);
        }
    }

    finish(sections, registry)
}

/// Split `Title | field | field` into title, language and active flag.
fn parse_header<'a>(line: &'a str, header: &'a str) -> RawSection<'a> {
    let mut fields = header.split('|').map(str::trim);
    let title = fields.next().unwrap_or_default().to_owned();
    let mut section = RawSection::new(line.trim(), title);

    for field in fields {
        if field.eq_ignore_ascii_case(ACTIVE) {
            section.is_active = true;
        } else if field.is_empty() {
            continue;
        } else if section.language.is_none() {
            section.language = Some(field);
        } else {
            tracing::debug!(field, header = line.trim(), "Ignoring extra header field");
        }
    }

    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::KnownLanguages;
    use crate::parser::ParseErrorKind;

    fn registry() -> KnownLanguages {
        ["js", "python", "rust", "markdown"].into_iter().collect()
    }

    fn parse_ok(text: &str) -> Vec<TabRecord> {
        let registry = registry();
        parse(text, Some(&registry)).unwrap()
    }

    fn parse_err(text: &str) -> ParseError {
        let registry = registry();
        parse(text, Some(&registry)).unwrap_err()
    }

    #[test]
    fn test_header_fields_in_any_order() {
        let records = parse_ok("::: Example | ACTIVE | rust\nfn main() {}");
        assert_eq!(records[0].title, "Example");
        assert_eq!(records[0].language, "rust");
        assert!(records[0].is_active);
    }

    #[test]
    fn test_language_inferred_from_title() {
        let records = parse_ok("::: Rust\nfn main() {}\n::: Install\nnpm i");
        assert_eq!(records[0].language, "rust");
        assert_eq!(records[1].language, "plaintext");
    }

    #[test]
    fn test_unknown_explicit_language_falls_back() {
        let records = parse_ok("::: Query | cobol\nSELECT 1");
        assert_eq!(records[0].language, "plaintext");
    }

    #[test]
    fn test_leading_blank_lines_allowed() {
        let records = parse_ok("\n\n   ::: JS\nx()");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "x()");
    }

    #[test]
    fn test_code_keeps_inner_blank_lines() {
        let records = parse_ok("::: JS\n\nlet a = 1;\n\nlet b = 2;\n\n");
        assert_eq!(records[0].code, "let a = 1;\n\nlet b = 2;");
    }

    #[test]
    fn test_marker_inside_fence_is_code() {
        let records = parse_ok("::: Docs | markdown-render\n```text\n::: not a tab\n```\n::: JS\nx()");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].language, "markdown-render");
        assert!(records[0].code.contains("::: not a tab"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let records = parse_ok("::: JS | js | python\nx()");
        assert_eq!(records[0].language, "js");
    }

    #[test]
    fn test_empty_title_fails() {
        let err = parse_err("::: | js\nx()");
        assert_eq!(err.kind, ParseErrorKind::MissingTitle);
        assert_eq!(err.section, Some(1));
    }

    #[test]
    fn test_whitespace_only_code_fails_whole_input() {
        let err = parse_err("::: JS\nx()\n::: Python\n   \n\t\n::: Rust\nfn f() {}");
        assert_eq!(err.kind, ParseErrorKind::MissingCode);
        assert_eq!(err.section, Some(2));
        assert_eq!(err.preview, "::: Python");
    }

    #[test]
    fn test_bare_closing_marker_is_missing_title() {
        let err = parse_err("::: JS\nx()\n:::");
        assert_eq!(err.kind, ParseErrorKind::MissingTitle);
        assert_eq!(err.section, Some(2));
    }

    #[test]
    fn test_multiple_active_fails() {
        let err = parse_err("::: A | active\na\n::: B | active\nb");
        assert_eq!(err.kind, ParseErrorKind::MultipleActive);
        assert_eq!(err.section, Some(2));
    }
}

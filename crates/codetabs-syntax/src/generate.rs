//! Serialization of tab records back to the current grammar.

use crate::language::{LanguageRegistry, resolve};
use crate::parser::{CURRENT_MARKER, TabRecord};

/// Serialize records as current-grammar tab syntax.
///
/// The language field is omitted when the title alone resolves to the same
/// tag, so `::: Python` stays `::: Python` rather than `::: Python | python`.
///
/// # Example
///
/// ```
/// use codetabs_syntax::{KnownLanguages, TabRecord, generate_syntax};
///
/// let registry = KnownLanguages::new().with("python");
/// let records = vec![TabRecord {
///     title: "Python".to_owned(),
///     language: "python".to_owned(),
///     code: "print(1)".to_owned(),
///     is_active: true,
/// }];
///
/// assert_eq!(
///     generate_syntax(&records, Some(&registry)),
///     "::: Python | active\nprint(1)"
/// );
/// ```
pub fn generate_syntax(records: &[TabRecord], registry: Option<&dyn LanguageRegistry>) -> String {
    let mut output = String::new();

    for record in records {
        output.push_str(CURRENT_MARKER);
        output.push(' ');
        output.push_str(&record.title);
        if resolve(&record.title, registry) != record.language {
            output.push_str(" | ");
            output.push_str(&record.language);
        }
        if record.is_active {
            output.push_str(" | active");
        }
        output.push('\n');
        output.push_str(&record.code);
        output.push_str("\n\n");
    }

    output.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::language::KnownLanguages;
    use crate::parser::TabParser;

    fn registry() -> KnownLanguages {
        ["js", "python", "rust"].into_iter().collect()
    }

    fn record(title: &str, language: &str, code: &str, is_active: bool) -> TabRecord {
        TabRecord {
            title: title.to_owned(),
            language: language.to_owned(),
            code: code.to_owned(),
            is_active,
        }
    }

    #[test]
    fn test_explicit_language_kept_when_not_inferable() {
        let registry = registry();
        let output = generate_syntax(
            &[
                record("Server", "rust", "fn main() {}", false),
                record("JS", "js", "x()", true),
            ],
            Some(&registry),
        );

        assert_eq!(output, "::: Server | rust\nfn main() {}\n\n::: JS | active\nx()");
    }

    #[test]
    fn test_plaintext_title_omits_language() {
        let registry = registry();
        let output = generate_syntax(&[record("Notes", "plaintext", "todo", false)], Some(&registry));
        assert_eq!(output, "::: Notes\ntodo");
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(generate_syntax(&[], None), "");
    }

    #[test]
    fn test_regenerated_syntax_parses_to_same_records() {
        let registry = registry();
        let parser = TabParser::new(Some(&registry)).silent();
        let text = "\n::: Rust | active\nfn main() {\n\n}\n::: Shell | bash\nls -la\n\n::: Docs | markdown-render\n# Title\n";

        let records = parser.parse(text).unwrap();
        let regenerated = generate_syntax(&records, Some(&registry));

        assert_eq!(parser.parse(&regenerated).unwrap(), records);
    }
}

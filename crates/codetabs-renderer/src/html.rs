//! HTML escaping helpers.

use std::sync::LazyLock;

use regex::Regex;

/// Zero-width space written into otherwise blank lines.
pub const BLANK_LINE_FILLER: char = '\u{200B}';

/// Allow-listed tags with allow-listed attributes, or a well-formed entity.
static MARKUP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        </?(?:a|b|blockquote|br|code|del|div|em|h[1-6]|hr|i|img|input|li|ol|p|pre|s|span
            |strong|sub|sup|table|tbody|td|th|thead|tr|u|ul)
          (?:\s+(?:alt|align|checked|class|disabled|href|id|src|start|title|type)(?:="[^"<>]*")?)*
          \s*/?>
        | &(?:[A-Za-z][A-Za-z0-9]*|\#[0-9]+|\#[xX][0-9A-Fa-f]+);
        "#,
    )
    .expect("invalid markup regex")
});

/// URL schemes allowed in `href` and `src`.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether `url` is relative or uses an allowed scheme.
///
/// Entities are decoded and ASCII whitespace and control characters are
/// dropped first, matching how browsers read the attribute.
pub fn is_safe_url(url: &str) -> bool {
    let decoded = html_escape::decode_html_entities(url);
    let cleaned: String = decoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    if cleaned[..colon].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = cleaned[..colon].to_ascii_lowercase();
    SAFE_SCHEMES.contains(&scheme.as_str())
}

/// Escape special characters for text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Re-escape text between allow-listed tags and entities.
///
/// Highlighter and markdown output is trusted for structure only: any `<`,
/// `>` or `&` that is not part of an allow-listed tag or a well-formed
/// entity is escaped.
pub fn escape_text_nodes(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut last = 0;

    for markup in MARKUP_PATTERN.find_iter(html) {
        if !has_safe_urls(markup.as_str()) {
            continue;
        }
        escape_text(&html[last..markup.start()], &mut result);
        result.push_str(markup.as_str());
        last = markup.end();
    }
    escape_text(&html[last..], &mut result);

    result
}

fn has_safe_urls(tag: &str) -> bool {
    ["href", "src"]
        .iter()
        .filter_map(|name| attr_value(tag, name))
        .all(is_safe_url)
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Replace every blank line with a zero-width space.
pub fn fill_blank_lines(html: &str) -> String {
    html.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                BLANK_LINE_FILLER.to_string()
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw value of attribute `name` in an opening tag.
pub(crate) fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {name}=\"");
    let value_start = tag.find(&needle)? + needle.len();
    let value_end = tag[value_start..].find('"').map(|i| value_start + i)?;
    Some(&tag[value_start..value_end])
}

/// Opening tags starting with `prefix`, in document order.
pub(crate) fn opening_tags<'a>(html: &'a str, prefix: &'a str) -> impl Iterator<Item = &'a str> {
    let mut remaining = html;
    std::iter::from_fn(move || {
        let start = remaining.find(prefix)?;
        let end = remaining[start..].find('>').map(|i| start + i + 1)?;
        let tag = &remaining[start..end];
        remaining = &remaining[end..];
        Some(tag)
    })
}

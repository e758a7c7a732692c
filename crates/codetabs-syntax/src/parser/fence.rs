//! Code fence tracking for section splitting.
//!
//! A tab body may itself contain fenced markdown (for `markdown-render` tabs),
//! and a `:::` line inside such a fence must not start a new section.

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineClass {
    /// Ordinary content outside any fence.
    Content,
    /// Opening or closing fence marker.
    Fence,
    /// Content inside a fenced block.
    Fenced,
}

/// Tracks whether the current line sits inside a fenced code block.
///
/// Fences use backticks or tildes (three or more). The closing fence must use
/// the same character, be at least as long as the opening one, and carry no
/// info string.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Classify a line and advance the fence state past it.
    pub(crate) fn classify(&mut self, line: &str) -> LineClass {
        let trimmed = line.trim_start();
        match self.open {
            Some((ch, len)) => {
                if closes_fence(trimmed, ch, len) {
                    self.open = None;
                    LineClass::Fence
                } else {
                    LineClass::Fenced
                }
            }
            None => match fence_run(trimmed) {
                Some(fence) => {
                    self.open = Some(fence);
                    LineClass::Fence
                }
                None => LineClass::Content,
            },
        }
    }
}

fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}

fn closes_fence(trimmed: &str, ch: char, min_len: usize) -> bool {
    match fence_run(trimmed) {
        Some((c, count)) if c == ch && count >= min_len => {
            trimmed[count * c.len_utf8()..].trim().is_empty()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(lines: &[&str]) -> Vec<LineClass> {
        let mut tracker = FenceTracker::new();
        lines.iter().map(|line| tracker.classify(line)).collect()
    }

    #[test]
    fn test_plain_lines_are_content() {
        assert_eq!(
            classify_all(&["::: JS", "console.log(1)"]),
            vec![LineClass::Content, LineClass::Content]
        );
    }

    #[test]
    fn test_marker_inside_fence_is_fenced() {
        assert_eq!(
            classify_all(&["```md", "::: not a tab", "```", "::: Next"]),
            vec![
                LineClass::Fence,
                LineClass::Fenced,
                LineClass::Fence,
                LineClass::Content
            ]
        );
    }

    #[test]
    fn test_shorter_or_mismatched_fence_does_not_close() {
        assert_eq!(
            classify_all(&["````", "```", "~~~", "````"]),
            vec![
                LineClass::Fence,
                LineClass::Fenced,
                LineClass::Fenced,
                LineClass::Fence
            ]
        );
    }

    #[test]
    fn test_closing_fence_with_info_string_does_not_close() {
        assert_eq!(
            classify_all(&["~~~", "~~~rust", "~~~  "]),
            vec![LineClass::Fence, LineClass::Fenced, LineClass::Fence]
        );
    }

    #[test]
    fn test_two_backticks_not_fence() {
        assert_eq!(classify_all(&["``x``"]), vec![LineClass::Content]);
    }
}

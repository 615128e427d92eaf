//! Small text helpers for terminal output.

use std::borrow::Cow;

/// Truncates a string to at most `max_len` characters, appending "..." if
/// truncated.
///
/// Counts characters rather than bytes, so multi-byte output from `go` never
/// splits a code point. Returns a `Cow<str>` to avoid allocation when no
/// truncation is needed.
pub fn truncate(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        Cow::Borrowed(s)
    } else if max_len <= 3 {
        Cow::Owned(s.chars().take(max_len).collect())
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        Cow::Owned(format!("{}...", head))
    }
}

/// First non-blank line of a possibly multi-line message.
pub fn first_line(s: &str) -> &str {
    s.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
}

//! Escaping for the two contexts head markup embeds untrusted text in.

use std::borrow::Cow;

/// Escape a value for use inside a double-quoted HTML attribute.
///
/// Only `&`, `<`, `>` and `"` are replaced; every other character,
/// including `'`, passes through unchanged.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Neutralize closing-tag sequences in text embedded in a `<script>` body.
///
/// Rewrites every `</` as `<\/`, which JSON and JavaScript both read back as
/// the same characters but the HTML tokenizer no longer treats as the start
/// of `</script>`.
pub fn escape_script_close(s: &str) -> Cow<'_, str> {
    if s.contains("</") {
        Cow::Owned(s.replace("</", r"<\/"))
    } else {
        Cow::Borrowed(s)
    }
}

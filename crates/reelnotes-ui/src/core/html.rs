//! Markup escaping for untrusted text.

/// Escape `& < > " '` into their entity forms in a single pass.
///
/// Already-escaped input is escaped again (`&amp;` becomes `&amp;amp;`).
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

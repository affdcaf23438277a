//! String-returning wrappers over `markdown_weaver_escape`.

use markdown_weaver_escape::{escape_href, escape_html, escape_html_body_text};

/// Escape for an attribute value or arbitrary HTML text.
pub fn attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing to a String cannot fail.
    let _ = escape_html(&mut out, s);
    out
}

/// Escape text content between tags.
pub fn text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape_html_body_text(&mut out, s);
    out
}

/// Escape a URL for `href`/`src`.
pub fn href(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape_href(&mut out, s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes() {
        assert_eq!(text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(attr(r#"say "hi""#), "say &quot;hi&quot;");
        assert!(!href(r#"/a b"onmouseover="x"#).contains('"'));
    }
}

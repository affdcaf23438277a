use std::sync::LazyLock;

use regex::Regex;

use super::FindContext;
use crate::span::{Span, SpanKind, SpanPayload};
use crate::text_helpers::char_before;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").unwrap());

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\]\n]*)\]\(([^)\s]+)(?:[ \t]+"([^"\n]*)")?\)"#).unwrap()
});

static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>()\[\]"'`]+"#).unwrap());

/// Trailing characters that end a sentence rather than a URL.
const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

/// `[text](url)`. A leading `!` makes it an image, which this finder skips.
pub fn find_links(ctx: &FindContext<'_>) -> Vec<Span> {
    let text = ctx.text;
    ctx.scan(&LINK_RE, |caps| {
        let whole = caps.get(0)?;
        if char_before(text, whole.start()) == Some('!') {
            return None;
        }
        Some(Span::new(
            whole.range(),
            SpanKind::Link,
            SpanPayload::Link {
                text: caps.get(1)?.as_str().to_string(),
                url: caps.get(2)?.as_str().to_string(),
            },
        ))
    })
}

/// `![alt](url)` or `![alt](url "title")`.
pub fn find_images(ctx: &FindContext<'_>) -> Vec<Span> {
    ctx.scan(&IMAGE_RE, |caps| {
        Some(Span::new(
            caps.get(0)?.range(),
            SpanKind::Image,
            SpanPayload::Image {
                alt: caps.get(1)?.as_str().to_string(),
                url: caps.get(2)?.as_str().to_string(),
                title: caps.get(3).map(|m| m.as_str().to_string()),
            },
        ))
    })
}

/// Plain `http(s)://` URLs written straight into the prose.
///
/// URLs that are the target of a link or image (`](url)`) or sit inside an
/// HTML attribute are skipped.
pub fn find_bare_urls(ctx: &FindContext<'_>) -> Vec<Span> {
    let text = ctx.text;
    ctx.scan(&BARE_URL_RE, |caps| {
        let whole = caps.get(0)?;
        let start = whole.start();
        if text[..start].ends_with("](") || matches!(char_before(text, start), Some('"' | '\'' | '<' | '='))
        {
            return None;
        }
        let url = whole.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION);
        // Nothing left after the scheme.
        if url.ends_with("://") {
            return None;
        }
        Some(Span::new(
            start..start + url.len(),
            SpanKind::BareUrl,
            SpanPayload::Link {
                text: url.to_string(),
                url: url.to_string(),
            },
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Selection;

    fn ctx(text: &str) -> FindContext<'_> {
        FindContext::new(text, Selection::collapsed(0), &()).skipping_cursor_check()
    }

    #[test]
    fn test_link() {
        let text = "see [site](https://example.com).";
        let spans = find_links(&ctx(text));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range, 4..31);
        assert_eq!(
            spans[0].payload,
            SpanPayload::Link {
                text: "site".to_string(),
                url: "https://example.com".to_string()
            }
        );
    }

    #[test]
    fn test_link_skips_images() {
        assert!(find_links(&ctx("![alt](pic.png)")).is_empty());
    }

    #[test]
    fn test_image_with_title() {
        let spans = find_images(&ctx(r#"![a cat](/cat.jpg "Cat")"#));
        assert_eq!(
            spans[0].payload,
            SpanPayload::Image {
                alt: "a cat".to_string(),
                url: "/cat.jpg".to_string(),
                title: Some("Cat".to_string())
            }
        );
    }

    #[test]
    fn test_bare_url_trims_punctuation() {
        let text = "Go to https://example.com/a?b=1.";
        let spans = find_bare_urls(&ctx(text));
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].range.clone()], "https://example.com/a?b=1");
    }

    #[test]
    fn test_bare_url_skips_link_targets() {
        assert!(find_bare_urls(&ctx("[site](https://example.com)")).is_empty());
        assert!(find_bare_urls(&ctx(r#"<a href="https://example.com">"#)).is_empty());
        assert!(find_bare_urls(&ctx("https://")).is_empty());
    }
}

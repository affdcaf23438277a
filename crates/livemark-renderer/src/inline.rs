//! Inline markup inside widgets: table cells, summaries, headings, link text.

use livemark_editor_core::{SpanKind, SpanPayload, find_inline_spans};

use crate::escape;
use crate::math::math_html;

/// Everything the live editor renders inline.
pub const ALL_INLINE: &[SpanKind] = &[
    SpanKind::MathInline,
    SpanKind::InlineCode,
    SpanKind::Link,
    SpanKind::BareUrl,
    SpanKind::BoldItalic,
    SpanKind::Bold,
    SpanKind::Italic,
];

/// Table cells get formatting and links, no math.
pub const TABLE_CELL: &[SpanKind] = &[
    SpanKind::InlineCode,
    SpanKind::Link,
    SpanKind::BoldItalic,
    SpanKind::Bold,
    SpanKind::Italic,
];

/// Link text cannot hold another link.
const LINK_TEXT: &[SpanKind] = &[
    SpanKind::MathInline,
    SpanKind::InlineCode,
    SpanKind::BoldItalic,
    SpanKind::Bold,
    SpanKind::Italic,
];

/// Escape `text`, rendering the inline constructs listed in `kinds`.
pub fn render_inline(text: &str, kinds: &[SpanKind]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for span in find_inline_spans(text, kinds) {
        out.push_str(&escape::text(&text[pos..span.range.start]));
        let raw = &text[span.range.clone()];
        out.push_str(&inline_html(span.kind, &span.payload).unwrap_or_else(|| escape::text(raw)));
        pos = span.range.end;
    }
    out.push_str(&escape::text(&text[pos..]));
    out
}

/// Markup for an inline construct, or `None` if `kind` is not inline.
pub fn inline_html(kind: SpanKind, payload: &SpanPayload) -> Option<String> {
    let html = match (kind, payload) {
        (SpanKind::MathInline, SpanPayload::Math { source, display }) => math_html(source, *display),
        (SpanKind::InlineCode, SpanPayload::InlineCode { code }) => {
            format!("<code>{}</code>", escape::text(code))
        }
        (SpanKind::Link, SpanPayload::Link { text, url }) => {
            anchor(url, &render_inline(text, LINK_TEXT), "md-link")
        }
        (SpanKind::BareUrl, SpanPayload::Link { text, url }) => {
            anchor(url, &escape::text(text), "md-link bare-url")
        }
        (SpanKind::BoldItalic, SpanPayload::Emphasis { text }) => {
            format!("<strong><em>{}</em></strong>", escape::text(text))
        }
        (SpanKind::Bold, SpanPayload::Emphasis { text }) => {
            format!("<strong>{}</strong>", escape::text(text))
        }
        (SpanKind::Italic, SpanPayload::Emphasis { text }) => {
            format!("<em>{}</em>", escape::text(text))
        }
        _ => return None,
    };
    Some(html)
}

fn anchor(url: &str, inner_html: &str, class: &str) -> String {
    let href = escape::href(url);
    format!(r#"<a class="{class}" href="{href}" data-url="{href}">{inner_html}</a>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_inline_mixes_text_and_markup() {
        insta::assert_snapshot!(
            render_inline("a < **b** and `c<d>` [e *f*](/g)", ALL_INLINE),
            @r#"a &lt; <strong>b</strong> and <code>c&lt;d&gt;</code> <a class="md-link" href="/g" data-url="/g">e <em>f</em></a>"#
        );
    }

    #[test]
    fn test_kind_filter() {
        assert_eq!(render_inline("$x$ and **y**", TABLE_CELL), "$x$ and <strong>y</strong>");
    }

    #[test]
    fn test_bare_url() {
        let html = render_inline("see https://example.com.", ALL_INLINE);
        assert_eq!(
            html,
            r#"see <a class="md-link bare-url" href="https://example.com" data-url="https://example.com">https://example.com</a>."#
        );
    }

    #[test]
    fn test_block_kinds_have_no_inline_markup() {
        let payload = SpanPayload::Heading {
            level: 1,
            text: "x".to_string(),
        };
        assert_eq!(inline_html(SpanKind::Heading, &payload), None);
    }
}

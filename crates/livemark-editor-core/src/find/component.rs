//! Capitalised JSX-style component tags.
//!
//! One scan classifies every tag against the registry; the known and
//! unknown finders each keep their half.

use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

use super::FindContext;
use super::code::find_inline_code;
use crate::span::{AttrValue, ComponentAttr, ComponentTag, Span, SpanKind, SpanPayload};

static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Z][A-Za-z0-9]*)((?:\s[^<>]*?)?)\s*(/?)>").unwrap()
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"([A-Za-z_:][A-Za-z0-9_:.-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|\{([^}]*)\}))?"#,
    )
    .unwrap()
});

/// Tags whose name the registry knows.
pub fn find_components(ctx: &FindContext<'_>) -> Vec<Span> {
    scan_tags(ctx, SpanKind::Component)
}

/// Capitalised tags the registry does not know, so the view can flag them.
pub fn find_unknown_components(ctx: &FindContext<'_>) -> Vec<Span> {
    scan_tags(ctx, SpanKind::UnknownComponent)
}

// Both finders walk the same tags so their spans never interleave.
fn scan_tags(ctx: &FindContext<'_>, wanted: SpanKind) -> Vec<Span> {
    let text = ctx.text;
    // Tags written inside backticks are code, not components.
    let code_spans: Vec<_> = find_inline_code(&ctx.skipping_cursor_check())
        .into_iter()
        .map(|span| span.range)
        .collect();
    let mut spans = ctx.scan(&OPEN_TAG_RE, |caps| {
        let open = caps.get(0)?;
        if code_spans
            .iter()
            .any(|code| code.start < open.end() && open.start() < code.end)
        {
            return None;
        }
        let name = caps.get(1)?.as_str();
        let attrs = parse_attrs(caps.get(2).map(|m| m.as_str()).unwrap_or_default());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        let (end, children) = if self_closing {
            (open.end(), None)
        } else {
            let closing = format!("</{name}>");
            let close_at = open.end() + text[open.end()..].find(&closing)?;
            let inner = text[open.end()..close_at].trim();
            (close_at + closing.len(), Some(inner.to_string()))
        };

        let kind = if ctx.registry.is_known(name) {
            SpanKind::Component
        } else {
            SpanKind::UnknownComponent
        };
        Some(Span::new(
            open.start()..end,
            kind,
            SpanPayload::Component(ComponentTag {
                name: SmolStr::new(name),
                attrs,
                children,
            }),
        ))
    });
    spans.retain(|span| span.kind == wanted);
    spans
}

/// Parse `key="v"`, `key='v'`, `key={expr}` and bare `key` attributes.
pub fn parse_attrs(raw: &str) -> Vec<ComponentAttr> {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = SmolStr::new(caps.get(1)?.as_str());
            let value = if let Some(m) = caps.get(2).or_else(|| caps.get(3)) {
                AttrValue::Text(m.as_str().to_string())
            } else if let Some(m) = caps.get(4) {
                AttrValue::Expr(m.as_str().trim().to_string())
            } else {
                AttrValue::Flag
            };
            Some(ComponentAttr { name, value })
        })
        .collect()
}

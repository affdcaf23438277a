use std::sync::LazyLock;

use regex::Regex;

use super::FindContext;
use crate::span::{Span, SpanKind, SpanPayload};
use crate::text_helpers::{char_at, char_before};

static INLINE_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([^$\n]+)\$").unwrap());

static BLOCK_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?msR)^\$\$[ \t]*\r?\n(.*?)^\$\$[ \t]*$").unwrap());

/// `$…$` on a single line, never half of a `$$` pair.
pub fn find_inline_math(ctx: &FindContext<'_>) -> Vec<Span> {
    let text = ctx.text;
    ctx.scan(&INLINE_MATH_RE, |caps| {
        let whole = caps.get(0)?;
        if char_before(text, whole.start()) == Some('$') || char_at(text, whole.end()) == Some('$')
        {
            return None;
        }
        let source = caps.get(1)?.as_str();
        if source.trim().is_empty() {
            return None;
        }
        Some(Span::new(
            whole.range(),
            SpanKind::MathInline,
            SpanPayload::Math {
                source: source.to_string(),
                display: false,
            },
        ))
    })
}

/// `$$` fence lines with the LaTeX between them.
pub fn find_block_math(ctx: &FindContext<'_>) -> Vec<Span> {
    ctx.scan(&BLOCK_MATH_RE, |caps| {
        let whole = caps.get(0)?;
        let source = caps.get(1)?.as_str().trim();
        if source.is_empty() {
            return None;
        }
        Some(Span::new(
            whole.range(),
            SpanKind::MathBlock,
            SpanPayload::Math {
                source: source.to_string(),
                display: true,
            },
        ))
    })
}

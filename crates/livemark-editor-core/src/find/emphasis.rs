//! Bold, italic and bold-italic.
//!
//! Content never contains `*` or `_`, so emphasis does not nest. The
//! bold-italic finder runs first in the resolver, which lets the longer
//! delimiter win.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::FindContext;
use crate::span::{Span, SpanKind, SpanPayload};
use crate::text_helpers::{char_at, char_before};

// Content: no delimiters, no newline, no leading or trailing whitespace.
const CONTENT: &str = r"([^*_\s](?:[^*_\n]*[^*_\s])?)";

static BOLD_ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\*\*\*{CONTENT}\*\*\*|___{CONTENT}___|\*\*_{CONTENT}_\*\*|__\*{CONTENT}\*__"
    ))
    .unwrap()
});

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\*\*{CONTENT}\*\*|__{CONTENT}__")).unwrap());

static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\*{CONTENT}\*|_{CONTENT}_")).unwrap());

pub fn find_bold_italic(ctx: &FindContext<'_>) -> Vec<Span> {
    find_emphasis(ctx, &BOLD_ITALIC_RE, SpanKind::BoldItalic)
}

pub fn find_bold(ctx: &FindContext<'_>) -> Vec<Span> {
    find_emphasis(ctx, &BOLD_RE, SpanKind::Bold)
}

pub fn find_italic(ctx: &FindContext<'_>) -> Vec<Span> {
    find_emphasis(ctx, &ITALIC_RE, SpanKind::Italic)
}

fn find_emphasis(ctx: &FindContext<'_>, re: &Regex, kind: SpanKind) -> Vec<Span> {
    let text = ctx.text;
    ctx.scan(re, |caps| {
        let whole = caps.get(0)?;
        if !is_flanked(text, whole.start(), whole.end()) {
            return None;
        }
        Some(Span::new(
            whole.range(),
            kind,
            SpanPayload::Emphasis {
                text: content(caps)?.to_string(),
            },
        ))
    })
}

/// First participating content group of an alternation.
fn content<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str())
}

/// A delimiter run must not continue into a neighbouring `*`, and `_` runs
/// must not sit inside a word (`snake_case_name`).
fn is_flanked(text: &str, start: usize, end: usize) -> bool {
    let (Some(open), Some(close)) = (char_at(text, start), char_before(text, end)) else {
        return false;
    };
    delimiter_may_touch(open, char_before(text, start))
        && delimiter_may_touch(close, char_at(text, end))
}

fn delimiter_may_touch(delimiter: char, neighbour: Option<char>) -> bool {
    match (delimiter, neighbour) {
        (_, None) => true,
        ('*', Some(c)) => c != '*',
        ('_', Some(c)) => !(c.is_alphanumeric() || c == '_'),
        _ => true,
    }
}

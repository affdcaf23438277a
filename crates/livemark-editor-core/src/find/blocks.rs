//! Line-oriented block constructs: headings, list items, the leading import
//! block, and `<details>` blocks.

use std::sync::LazyLock;

use regex::Regex;

use super::FindContext;
use crate::span::{ListItem, ListMarker, Span, SpanKind, SpanPayload};
use crate::text_helpers::lines_with_ranges;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6}) (.+)$").unwrap());

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)([-*]|\d{1,9}\.)[ \t]+").unwrap());

static DETAILS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<details(?:\s[^>]*)?>\s*<summary>(.*?)</summary>(.*?)</details>").unwrap()
});

/// Columns a tab counts for when measuring list indentation.
const TAB_WIDTH: usize = 2;

/// ATX headings, `#` to `######` followed by a space.
pub fn find_headings(ctx: &FindContext<'_>) -> Vec<Span> {
    ctx.scan(&HEADING_RE, |caps| {
        let level = caps.get(1)?.as_str().len() as u8;
        let text = caps.get(2)?.as_str().trim();
        if text.is_empty() {
            return None;
        }
        Some(Span::new(
            caps.get(0)?.range(),
            SpanKind::Heading,
            SpanPayload::Heading {
                level,
                text: text.to_string(),
            },
        ))
    })
}

/// Unordered (`-`, `*`) and ordered (`1.`) list items.
///
/// The span covers the indentation and marker only; the item's text is left
/// to the inline finders.
pub fn find_list_items(ctx: &FindContext<'_>) -> Vec<Span> {
    let text = ctx.text;
    ctx.scan(&LIST_ITEM_RE, |caps| {
        let whole = caps.get(0)?;
        let indent = caps.get(1)?.as_str();
        let marker = caps.get(2)?.as_str();

        let (kind, marker) = match marker.strip_suffix('.') {
            Some(number) => (
                SpanKind::ListItemOrdered,
                ListMarker::Ordered(number.parse().ok()?),
            ),
            None => (
                SpanKind::ListItemUnordered,
                ListMarker::Bullet(marker.chars().next()?),
            ),
        };

        let line_end = text[whole.end()..]
            .find('\n')
            .map(|pos| whole.end() + pos)
            .unwrap_or(text.len());
        if let ListMarker::Bullet(bullet) = marker
            && is_thematic_break(&text[whole.start()..line_end], bullet)
        {
            return None;
        }

        Some(Span::new(
            whole.range(),
            kind,
            SpanPayload::ListItem(ListItem {
                marker,
                indent_level: indent_level(indent),
                line: whole.start()..line_end,
            }),
        ))
    })
}

/// `* * *` or `- - -`: three or more of one marker and nothing else.
fn is_thematic_break(line: &str, bullet: char) -> bool {
    let mut markers = 0;
    for c in line.chars() {
        match c {
            c if c == bullet => markers += 1,
            ' ' | '\t' | '\r' => {}
            _ => return false,
        }
    }
    markers >= 3
}

/// `floor(columns / 2)`, with tabs counting as two columns.
pub fn indent_level(indent: &str) -> usize {
    let columns: usize = indent
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();
    columns / 2
}

/// The run of `import …` lines at the top of an MDX document.
pub fn find_import_block(ctx: &FindContext<'_>) -> Vec<Span> {
    let mut start = None;
    let mut end = 0;
    let mut count = 0;

    for (range, line) in lines_with_ranges(ctx.text) {
        if line.starts_with("import ") {
            start.get_or_insert(range.start);
            end = range.end;
            count += 1;
        } else if start.is_none() && line.trim().is_empty() {
            continue;
        } else {
            break;
        }
    }

    let Some(start) = start else {
        return Vec::new();
    };
    let span = Span::new(
        start..end,
        SpanKind::ImportBlock,
        SpanPayload::Imports { count },
    );
    if ctx.keep(&span) { vec![span] } else { Vec::new() }
}

/// `<details>` blocks with a `<summary>`.
pub fn find_details(ctx: &FindContext<'_>) -> Vec<Span> {
    ctx.scan(&DETAILS_RE, |caps| {
        Some(Span::new(
            caps.get(0)?.range(),
            SpanKind::Details,
            SpanPayload::Details {
                summary: caps.get(1)?.as_str().trim().to_string(),
                body: caps.get(2)?.as_str().trim().to_string(),
            },
        ))
    })
}

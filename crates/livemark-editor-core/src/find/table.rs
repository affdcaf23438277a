use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::FindContext;
use crate::span::{Alignment, Span, SpanKind, SpanPayload, TableData};
use crate::text_helpers::lines_with_ranges;

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|[-:\s|]+\|\s*$").unwrap());

/// Pipe tables: header row, separator row, then at least one data row.
pub fn find_tables(ctx: &FindContext<'_>) -> Vec<Span> {
    let lines: Vec<(Range<usize>, &str)> = lines_with_ranges(ctx.text).collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(table_end) = table_extent(&lines, i) else {
            i += 1;
            continue;
        };

        let rows = &lines[i..table_end];
        if let Some(span) = parse_table(rows) {
            if ctx.keep(&span) {
                spans.push(span);
            }
        }
        i = table_end;
    }

    spans
}

/// Index one past the last row of a table starting at `start`, if one does.
fn table_extent(lines: &[(Range<usize>, &str)], start: usize) -> Option<usize> {
    let (_, header) = lines.get(start)?;
    let (_, separator) = lines.get(start + 1)?;
    if !is_row(header) || !is_separator(separator) {
        return None;
    }

    let data_rows = lines[start + 2..]
        .iter()
        .take_while(|(_, line)| is_row(line) && !is_separator(line))
        .count();
    (data_rows > 0).then_some(start + 2 + data_rows)
}

fn is_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.len() > 1
}

fn is_separator(line: &str) -> bool {
    SEPARATOR_RE.is_match(line) && line.contains('-')
}

fn parse_table(rows: &[(Range<usize>, &str)]) -> Option<Span> {
    let [(first, header), (_, separator), data @ ..] = rows else {
        return None;
    };
    let (last, _) = data.last()?;

    let headers = split_cells(header);
    if headers.is_empty() {
        return None;
    }

    let mut alignments: Vec<Alignment> = split_cells(separator)
        .iter()
        .map(|cell| Alignment::from_separator_cell(cell))
        .collect();
    alignments.resize(headers.len(), Alignment::Left);

    let rows = data.iter().map(|(_, line)| split_cells(line)).collect();

    Some(Span::new(
        first.start..last.end,
        SpanKind::Table,
        SpanPayload::Table(TableData {
            headers,
            alignments,
            rows,
        }),
    ))
}

/// Cells of one `| a | b |` row, trimmed.
fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

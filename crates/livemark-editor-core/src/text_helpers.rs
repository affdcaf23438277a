//! Text navigation helpers over plain `&str` documents.
//!
//! Offsets are byte offsets. Every function tolerates offsets past the end of
//! the text and never splits a UTF-8 sequence.

use std::ops::Range;

/// Find start of line containing offset.
pub fn find_line_start(text: &str, offset: usize) -> usize {
    let offset = floor_char_boundary(text, offset);
    text[..offset].rfind('\n').map(|pos| pos + 1).unwrap_or(0)
}

/// Find end of line containing offset (position of newline or end of text).
pub fn find_line_end(text: &str, offset: usize) -> usize {
    let offset = floor_char_boundary(text, offset);
    text[offset..]
        .find('\n')
        .map(|pos| offset + pos)
        .unwrap_or(text.len())
}

/// Largest char boundary that is `<= offset`, clamped to the text length.
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    let mut pos = offset;
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Character immediately before `offset`, if any.
pub fn char_before(text: &str, offset: usize) -> Option<char> {
    text.get(..offset).and_then(|s| s.chars().next_back())
}

/// Character starting at `offset`, if any.
pub fn char_at(text: &str, offset: usize) -> Option<char> {
    text.get(offset..).and_then(|s| s.chars().next())
}

/// Convert a char offset to a byte offset, clamping past-the-end offsets.
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Convert a byte offset to a char offset.
pub fn byte_to_char(text: &str, byte_offset: usize) -> usize {
    let byte_offset = floor_char_boundary(text, byte_offset);
    text[..byte_offset].chars().count()
}

/// Iterate lines with their byte range, excluding the terminating newline.
///
/// A trailing newline does not produce an extra empty line.
pub fn lines_with_ranges(text: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    let mut start = 0;
    text.split_inclusive('\n').map(move |chunk| {
        let line = chunk.strip_suffix('\n').unwrap_or(chunk);
        let range = start..start + line.len();
        start += chunk.len();
        (range, line)
    })
}

//! Cursor suppression: which spans stay raw so the user can edit them.
//!
//! The default rule keeps a span raw whenever the selection touches it,
//! inclusive on both ends. Code blocks and list items deviate: a touched
//! code block stays in the decoration set as an editable region, and list
//! items are suppressed one line at a time.

use std::ops::Range;

use crate::span::{Span, SpanKind};
use crate::types::Selection;

/// Class for a code block the cursor is inside.
pub const CODE_BLOCK_EDITING_CLASS: &str = "code-block-editing";

/// True when `range` must stay raw text for `selection`.
pub fn suppress(range: &Range<usize>, selection: &Selection) -> bool {
    selection.touches(range)
}

/// How a span found with the cursor check skipped should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Replace with its widget.
    Widget,
    /// Keep raw but mark the region (code blocks under the cursor).
    Editable,
    /// Keep raw with no replacement.
    Raw,
}

/// Apply the per-kind policy to one span.
pub fn visibility(span: &Span, selection: &Selection) -> Visibility {
    let touched = suppress(&span.suppression_range(), selection);
    match (span.kind, touched) {
        (_, false) => Visibility::Widget,
        (SpanKind::CodeBlock, true) => Visibility::Editable,
        (_, true) => Visibility::Raw,
    }
}

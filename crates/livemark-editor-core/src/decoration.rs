//! Decorations: the engine's only output.
//!
//! The view layer owns painting and disposal. A decoration only says what
//! goes where.

use std::cmp::Ordering;
use std::ops::Range;

use serde::Serialize;
use smol_str::{SmolStr, format_smolstr};

use crate::span::{Span, SpanKind, SpanPayload};

/// What to draw in place of a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    pub kind: SpanKind,
    pub payload: SpanPayload,
    /// Whether the widget takes pointer events instead of passing them to
    /// the text underneath (links, `<details>` toggles).
    pub interactive: bool,
}

impl Widget {
    pub fn from_span(span: Span) -> Self {
        let interactive = matches!(
            span.kind,
            SpanKind::Link | SpanKind::BareUrl | SpanKind::Details
        );
        Self {
            kind: span.kind,
            payload: span.payload,
            interactive,
        }
    }
}

/// One conflict-resolved instruction for the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Decoration {
    /// Hide `range` and draw `widget` instead.
    Replace { range: Range<usize>, widget: Widget },
    /// Leave `range` editable but styled with `class`.
    Mark { range: Range<usize>, class: SmolStr },
    /// Style the line starting at `line_start`.
    Line { line_start: usize, class: SmolStr },
}

impl Decoration {
    pub fn replace(span: Span) -> Self {
        Decoration::Replace {
            range: span.range.clone(),
            widget: Widget::from_span(span),
        }
    }

    pub fn mark(range: Range<usize>, class: &str) -> Self {
        Decoration::Mark {
            range,
            class: SmolStr::new(class),
        }
    }

    /// `list-item-indent-N` for a list line.
    pub fn list_indent(line_start: usize, indent_level: usize) -> Self {
        Decoration::Line {
            line_start,
            class: format_smolstr!("list-item-indent-{}", indent_level),
        }
    }

    pub fn start(&self) -> usize {
        match self {
            Decoration::Replace { range, .. } | Decoration::Mark { range, .. } => range.start,
            Decoration::Line { line_start, .. } => *line_start,
        }
    }

    /// Text range the decoration hides or styles. Line decorations have none.
    pub fn range(&self) -> Option<&Range<usize>> {
        match self {
            Decoration::Replace { range, .. } | Decoration::Mark { range, .. } => Some(range),
            Decoration::Line { .. } => None,
        }
    }

    pub fn widget(&self) -> Option<&Widget> {
        match self {
            Decoration::Replace { widget, .. } => Some(widget),
            _ => None,
        }
    }

    /// Line decorations go first at a position, then marks, then widgets.
    fn rank(&self) -> u8 {
        match self {
            Decoration::Line { .. } => 0,
            Decoration::Mark { .. } => 1,
            Decoration::Replace { .. } => 2,
        }
    }

    /// Document order used for the final decoration list.
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.start()
            .cmp(&other.start())
            .then_with(|| self.rank().cmp(&other.rank()))
    }
}

//! Overlap and precedence resolution.
//!
//! Candidate groups arrive in precedence order (see
//! [`BLOCK_FINDERS`](crate::find::BLOCK_FINDERS) and
//! [`INLINE_FINDERS`](crate::find::INLINE_FINDERS)). Each span either claims
//! its range in the covered set or is dropped because an earlier span
//! already owns part of it, so earlier kinds always win.
//!
//! Fenced code is the one exception: fences are claimed before anything
//! else, so a table or `$$` block written inside a fence never outranks it.

use std::ops::Range;

use crate::decoration::Decoration;
use crate::span::{Span, SpanKind, SpanPayload};
use crate::types::Selection;
use crate::visibility::{CODE_BLOCK_EDITING_CLASS, Visibility, visibility};

/// All candidates one finder produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub kind: SpanKind,
    pub spans: Vec<Span>,
}

/// Ranges already committed during one resolution pass.
///
/// Kept sorted and disjoint, so lookups are a binary search.
#[derive(Debug, Clone, Default)]
pub struct CoveredRanges {
    ranges: Vec<Range<usize>>,
}

impl CoveredRanges {
    /// Whether `range` shares an offset with any covered range.
    pub fn intersects(&self, range: &Range<usize>) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= range.start);
        self.ranges
            .get(idx)
            .is_some_and(|covered| covered.start < range.end)
    }

    /// Claim `range` unless it is already (partly) covered.
    pub fn try_claim(&mut self, range: &Range<usize>) -> bool {
        if self.intersects(range) {
            return false;
        }
        let idx = self.ranges.partition_point(|r| r.start < range.start);
        self.ranges.insert(idx, range.clone());
        true
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Turn precedence-ordered candidates into the final, sorted decoration list.
///
/// Code blocks and list items arrive with every match; the cursor policy is
/// applied here. Everything else was already filtered by its finder, and the
/// policy is a no-op for it.
pub fn resolve(candidates: Vec<Candidates>, selection: Selection) -> Vec<Decoration> {
    let mut covered = claim_code_blocks(&candidates);
    let mut decorations = Vec::new();

    for group in candidates {
        let is_fence = group.kind == SpanKind::CodeBlock;
        for span in group.spans {
            if !is_fence && covered.intersects(&span.range) {
                tracing::trace!(
                    target: "livemark::resolve",
                    kind = %span.kind,
                    start = span.range.start,
                    end = span.range.end,
                    "dropped overlapping span"
                );
                continue;
            }

            if let SpanPayload::ListItem(item) = &span.payload {
                decorations.push(Decoration::list_indent(item.line.start, item.indent_level));
            }

            match visibility(&span, &selection) {
                Visibility::Widget => {
                    covered.try_claim(&span.range);
                    decorations.push(Decoration::replace(span));
                }
                Visibility::Editable => {
                    covered.try_claim(&span.range);
                    decorations.push(Decoration::mark(span.range, CODE_BLOCK_EDITING_CLASS));
                }
                Visibility::Raw => {}
            }
        }
    }

    decorations.sort_by(Decoration::cmp_position);
    decorations
}

/// Every fence range, claimed up front. Fences never overlap each other.
fn claim_code_blocks(candidates: &[Candidates]) -> CoveredRanges {
    let mut covered = CoveredRanges::default();
    for span in candidates
        .iter()
        .filter(|group| group.kind == SpanKind::CodeBlock)
        .flat_map(|group| &group.spans)
    {
        covered.try_claim(&span.range);
    }
    covered
}

/// Precedence without any cursor policy: the spans that win, in document order.
pub fn claim_in_order(candidates: Vec<Candidates>) -> Vec<Span> {
    let mut covered = claim_code_blocks(&candidates);
    let mut spans: Vec<Span> = candidates
        .into_iter()
        .flat_map(|group| {
            let is_fence = group.kind == SpanKind::CodeBlock;
            group.spans.into_iter().map(move |span| (is_fence, span))
        })
        .filter(|(is_fence, span)| *is_fence || covered.try_claim(&span.range))
        .map(|(_, span)| span)
        .collect();
    spans.sort_by_key(|span| span.range.start);
    spans
}

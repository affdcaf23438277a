//! Span finders: one scanner per markdown construct.
//!
//! Every finder is a plain function over a [`FindContext`]. Finders share no
//! state, never fail, and return their spans in document order without
//! overlapping each other. Input they cannot make sense of is left alone and
//! stays visible as raw text.
//!
//! Precedence between constructs is not decided here; see [`crate::resolve`].
//! The two tables below fix the order in which the resolver consults the
//! finders, block constructs first.

mod blocks;
mod code;
mod component;
mod emphasis;
mod links;
mod math;
mod table;

pub use blocks::{find_details, find_headings, find_import_block, find_list_items};
pub use code::{find_code_blocks, find_inline_code};
pub use component::{find_components, find_unknown_components, parse_attrs};
pub use emphasis::{find_bold, find_bold_italic, find_italic};
pub use links::{find_bare_urls, find_images, find_links};
pub use math::{find_block_math, find_inline_math};
pub use table::find_tables;

use regex::{Captures, Regex};

use crate::registry::ComponentRegistry;
use crate::span::{Span, SpanKind};
use crate::types::Selection;
use crate::visibility;

/// Everything a finder may look at.
#[derive(Clone, Copy)]
pub struct FindContext<'a> {
    pub text: &'a str,
    pub selection: Selection,
    /// Return every match, even those the selection touches.
    pub skip_cursor_check: bool,
    pub registry: &'a dyn ComponentRegistry,
}

impl<'a> FindContext<'a> {
    pub fn new(text: &'a str, selection: Selection, registry: &'a dyn ComponentRegistry) -> Self {
        Self {
            text,
            selection: selection.clamp_to(text.len()),
            skip_cursor_check: false,
            registry,
        }
    }

    /// Same context, but finders report spans under the cursor too.
    pub fn skipping_cursor_check(self) -> Self {
        Self {
            skip_cursor_check: true,
            ..self
        }
    }

    /// Whether a span found in this context should be reported.
    pub fn keep(&self, span: &Span) -> bool {
        self.skip_cursor_check || !visibility::suppress(&span.suppression_range(), &self.selection)
    }

    /// Run `re` over the whole text, turning each match into a span with `parse`.
    ///
    /// When `parse` rejects a match the scan resumes one character after the
    /// match start, so a valid construct that begins inside a rejected match
    /// is still found. Accepted matches resume after their end, which keeps a
    /// finder's spans disjoint.
    pub(crate) fn scan(
        &self,
        re: &Regex,
        mut parse: impl FnMut(&Captures<'a>) -> Option<Span>,
    ) -> Vec<Span> {
        let text = self.text;
        let mut spans = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = re.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            match parse(&caps) {
                Some(span) if whole.end() > whole.start() => {
                    if self.keep(&span) {
                        spans.push(span);
                    }
                    pos = whole.end();
                }
                _ => pos = next_char_boundary(text, whole.start()),
            }
        }

        spans
    }
}

fn next_char_boundary(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map(|c| offset + c.len_utf8())
        .unwrap_or(text.len() + 1)
}

/// Finder signature used by the precedence tables.
pub type Finder = fn(&FindContext<'_>) -> Vec<Span>;

/// Block constructs in resolution order.
///
/// Code blocks and list items are looked up with the cursor check skipped;
/// the resolver applies their special suppression rules itself.
pub const BLOCK_FINDERS: &[(SpanKind, Finder)] = &[
    (SpanKind::ImportBlock, find_import_block),
    (SpanKind::MathBlock, find_block_math),
    (SpanKind::Details, find_details),
    (SpanKind::Table, find_tables),
    (SpanKind::CodeBlock, find_code_blocks),
    (SpanKind::Image, find_images),
    (SpanKind::Component, find_components),
    (SpanKind::UnknownComponent, find_unknown_components),
    (SpanKind::Heading, find_headings),
    (SpanKind::ListItemUnordered, find_list_items),
];

/// Inline constructs in resolution order.
pub const INLINE_FINDERS: &[(SpanKind, Finder)] = &[
    (SpanKind::MathInline, find_inline_math),
    (SpanKind::InlineCode, find_inline_code),
    (SpanKind::Link, find_links),
    (SpanKind::BareUrl, find_bare_urls),
    (SpanKind::BoldItalic, find_bold_italic),
    (SpanKind::Bold, find_bold),
    (SpanKind::Italic, find_italic),
];

/// Whether `kind`'s finder must see spans under the cursor.
pub fn needs_all_matches(kind: SpanKind) -> bool {
    kind == SpanKind::CodeBlock || kind.is_list_item()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_partition_kinds() {
        assert!(BLOCK_FINDERS.iter().all(|(kind, _)| kind.is_block()));
        assert!(INLINE_FINDERS.iter().all(|(kind, _)| kind.is_inline()));
    }

    #[test]
    fn test_inline_order_is_fixed() {
        let order: Vec<_> = INLINE_FINDERS.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            order,
            vec![
                SpanKind::MathInline,
                SpanKind::InlineCode,
                SpanKind::Link,
                SpanKind::BareUrl,
                SpanKind::BoldItalic,
                SpanKind::Bold,
                SpanKind::Italic,
            ]
        );
    }

    #[test]
    fn test_finders_survive_awkward_input() {
        let inputs = [
            "",
            "\n",
            "$",
            "$$",
            "```",
            "| a |",
            "<",
            "<Foo",
            "**",
            "[x](",
            "héllo *wörld* — ünïcode `çode`",
            "- ",
            "#",
        ];
        for text in inputs {
            let ctx = FindContext::new(text, Selection::collapsed(0), &());
            for (_, finder) in BLOCK_FINDERS.iter().chain(INLINE_FINDERS) {
                for span in finder(&ctx.skipping_cursor_check()) {
                    assert!(span.range.start < span.range.end, "{text:?}");
                    assert!(span.range.end <= text.len(), "{text:?}");
                    assert!(text.is_char_boundary(span.range.start));
                    assert!(text.is_char_boundary(span.range.end));
                }
            }
        }
    }
}

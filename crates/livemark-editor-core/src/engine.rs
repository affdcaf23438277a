//! Full recomputation of the decoration set, and the state object a view
//! plugin drives on every update.

use web_time::Instant;

use crate::decoration::Decoration;
use crate::find::{BLOCK_FINDERS, FindContext, INLINE_FINDERS, needs_all_matches};
use crate::registry::ComponentRegistry;
use crate::resolve::{Candidates, claim_in_order, resolve};
use crate::span::{Span, SpanKind};
use crate::types::Selection;

/// Run every finder in precedence order.
pub fn collect_candidates(
    text: &str,
    selection: Selection,
    registry: &dyn ComponentRegistry,
) -> Vec<Candidates> {
    let ctx = FindContext::new(text, selection, registry);

    BLOCK_FINDERS
        .iter()
        .chain(INLINE_FINDERS)
        .map(|(kind, finder)| {
            let spans = if needs_all_matches(*kind) {
                finder(&ctx.skipping_cursor_check())
            } else {
                finder(&ctx)
            };
            Candidates { kind: *kind, spans }
        })
        .collect()
}

/// Compute the decorations for `text` with the cursor at `selection`.
pub fn decorate(
    text: &str,
    selection: Selection,
    registry: &dyn ComponentRegistry,
) -> Vec<Decoration> {
    let selection = selection.clamp_to(text.len());
    resolve(collect_candidates(text, selection, registry), selection)
}

/// Inline spans of a text fragment, resolved by precedence and ignoring any
/// cursor. `kinds` limits which inline constructs are looked for.
///
/// Used by the renderer for table cells, summaries and similar fragments.
pub fn find_inline_spans(text: &str, kinds: &[SpanKind]) -> Vec<Span> {
    let ctx = FindContext::new(text, Selection::default(), &()).skipping_cursor_check();
    let candidates = INLINE_FINDERS
        .iter()
        .filter(|(kind, _)| kinds.contains(kind))
        .map(|(kind, finder)| Candidates {
            kind: *kind,
            spans: finder(&ctx),
        })
        .collect();
    claim_in_order(candidates)
}

/// One view update, as an editor's update hook sees it.
#[derive(Debug, Clone, Copy)]
pub struct ViewUpdate<'a> {
    pub text: &'a str,
    pub selection: Selection,
    pub doc_changed: bool,
    pub selection_changed: bool,
}

/// Current decoration set for one editor view.
///
/// The set is rebuilt from scratch whenever the document or the selection
/// changes and replaced wholesale.
#[derive(Debug)]
pub struct LiveDecorations<R> {
    registry: R,
    decorations: Vec<Decoration>,
    generation: u64,
}

impl<R: ComponentRegistry> LiveDecorations<R> {
    pub fn new(registry: R, text: &str, selection: Selection) -> Self {
        let mut live = Self {
            registry,
            decorations: Vec::new(),
            generation: 0,
        };
        live.recompute(text, selection);
        live
    }

    /// Apply a view update. Returns whether the set was rebuilt.
    pub fn update(&mut self, update: &ViewUpdate<'_>) -> bool {
        if !update.doc_changed && !update.selection_changed {
            return false;
        }
        self.recompute(update.text, update.selection);
        true
    }

    fn recompute(&mut self, text: &str, selection: Selection) {
        let started = Instant::now();
        self.decorations = decorate(text, selection, &self.registry);
        self.generation += 1;

        tracing::debug!(
            target: "livemark::decorate",
            generation = self.generation,
            doc_len = text.len(),
            from = selection.from(),
            to = selection.to(),
            decorations = self.decorations.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "recomputed decorations"
        );
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Number of recomputations so far, starting at 1 after construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }
}

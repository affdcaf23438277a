//! Deferred highlighting for code block widgets.
//!
//! A code block renders immediately as escaped text. Highlighting happens
//! later, and by then the view may have thrown the widget away, so the
//! target's liveness is checked on both sides of the work.

use std::cell::{Cell, RefCell};

use smol_str::SmolStr;

use crate::config::RendererConfig;
use crate::highlight::shared_highlighter;

/// Where a hydrated widget's markup goes.
pub trait HydrationTarget {
    /// Whether the widget is still attached to the view.
    fn is_live(&self) -> bool;
    fn replace_html(&self, html: String);
}

impl<T: HydrationTarget + ?Sized> HydrationTarget for &T {
    fn is_live(&self) -> bool {
        (**self).is_live()
    }

    fn replace_html(&self, html: String) {
        (**self).replace_html(html)
    }
}

/// In-memory target: holds a widget's current markup until detached.
#[derive(Debug, Default)]
pub struct WidgetSlot {
    html: RefCell<String>,
    detached: Cell<bool>,
}

impl WidgetSlot {
    pub fn new(html: String) -> Self {
        Self {
            html: RefCell::new(html),
            detached: Cell::new(false),
        }
    }

    pub fn detach(&self) {
        self.detached.set(true);
    }

    pub fn html(&self) -> String {
        self.html.borrow().clone()
    }
}

impl HydrationTarget for WidgetSlot {
    fn is_live(&self) -> bool {
        !self.detached.get()
    }

    fn replace_html(&self, html: String) {
        *self.html.borrow_mut() = html;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationOutcome {
    Applied,
    /// The target went away first. Nothing was written.
    Detached,
    /// Highlighting failed even as plain text; the escaped markup stays.
    Unhighlighted,
}

/// Highlighting owed to a code block widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingHighlight {
    pub lang: Option<SmolStr>,
    pub code: String,
    pub config: RendererConfig,
}

impl PendingHighlight {
    pub async fn hydrate<T: HydrationTarget + ?Sized>(self, target: &T) -> HydrationOutcome {
        let highlighter = shared_highlighter(&self.config).await;
        if !target.is_live() {
            return HydrationOutcome::Detached;
        }

        let html = match highlighter.highlight(self.lang.as_deref(), &self.code) {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(target: "livemark::highlight", error = %err, "leaving code block unhighlighted");
                return HydrationOutcome::Unhighlighted;
            }
        };

        if !target.is_live() {
            return HydrationOutcome::Detached;
        }
        target.replace_html(html);
        HydrationOutcome::Applied
    }
}

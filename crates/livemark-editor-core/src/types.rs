//! Selection and offset types shared by the finders, resolver and trigger.
//!
//! All offsets are UTF-8 byte offsets into the document text, which is what
//! regex matching produces. Embedders that track chars convert with
//! [`char_to_byte`](crate::text_helpers::char_to_byte) first.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Text selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where the cursor is now.
/// They may be in any order - use `from()` and `to()` for ordered bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Where selection started
    pub anchor: usize,
    /// Where cursor is now
    pub head: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Lower bound of the selection.
    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Upper bound of the selection.
    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Check if the selection is collapsed (empty, cursor only).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the selection length.
    pub fn len(&self) -> usize {
        self.to() - self.from()
    }

    /// Check if empty (same as is_collapsed).
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Convert to a Range<usize> (ordered).
    pub fn to_range(&self) -> Range<usize> {
        self.from()..self.to()
    }

    /// Check if the selection is backwards (head before anchor).
    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }

    /// Clamp both ends into `0..=doc_len`.
    ///
    /// An empty document always yields `(0, 0)`.
    pub fn clamp_to(&self, doc_len: usize) -> Self {
        Self {
            anchor: self.anchor.min(doc_len),
            head: self.head.min(doc_len),
        }
    }

    /// Whether the selection touches `range`, inclusive on both ends.
    ///
    /// A cursor sitting directly before or after a span counts as touching it,
    /// so the raw markdown shows up as soon as the cursor reaches its edge.
    pub fn touches(&self, range: &Range<usize>) -> bool {
        self.from() <= range.end && self.to() >= range.start
    }
}

/// Whether two half-open ranges share at least one offset.
pub fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        let sel = Selection::new(5, 10);
        assert_eq!(sel.from(), 5);
        assert_eq!(sel.to(), 10);
        assert!(!sel.is_backwards());

        let sel = Selection::new(10, 5);
        assert_eq!(sel.from(), 5);
        assert_eq!(sel.to(), 10);
        assert!(sel.is_backwards());
        assert_eq!(sel.to_range(), 5..10);
    }

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(7);
        assert!(sel.is_collapsed());
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn test_touches_is_inclusive() {
        let span = 6..15;
        assert!(Selection::collapsed(6).touches(&span));
        assert!(Selection::collapsed(15).touches(&span));
        assert!(Selection::collapsed(8).touches(&span));
        assert!(!Selection::collapsed(5).touches(&span));
        assert!(!Selection::collapsed(16).touches(&span));
        assert!(Selection::new(0, 6).touches(&span));
        assert!(Selection::new(20, 2).touches(&span));
    }

    #[test]
    fn test_clamp_to() {
        assert_eq!(Selection::new(3, 40).clamp_to(10), Selection::new(3, 10));
        assert_eq!(Selection::new(3, 40).clamp_to(0), Selection::collapsed(0));
    }

    #[test]
    fn test_ranges_overlap_is_half_open() {
        assert!(ranges_overlap(&(0..5), &(4..6)));
        assert!(!ranges_overlap(&(0..5), &(5..6)));
        assert!(!ranges_overlap(&(5..6), &(0..5)));
        assert!(ranges_overlap(&(0..10), &(2..3)));
    }
}

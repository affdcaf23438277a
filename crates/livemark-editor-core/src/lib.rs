//! livemark-editor-core: the decoration engine behind the live markdown editor.
//!
//! Given document text and a selection, the engine decides which spans of
//! markdown/MDX are replaced by rendered widgets and which stay raw so the
//! user can edit them. The crate is pure Rust with no view dependencies:
//! - span finders, one per construct (`find`)
//! - the precedence resolver and covered range set (`resolve`)
//! - cursor suppression (`visibility`)
//! - `LiveDecorations`, the state a view plugin recomputes on every update

pub mod decoration;
pub mod engine;
pub mod find;
pub mod registry;
pub mod resolve;
pub mod span;
pub mod text_helpers;
pub mod types;
pub mod visibility;


pub use decoration::{Decoration, Widget};
pub use engine::{LiveDecorations, ViewUpdate, collect_candidates, decorate, find_inline_spans};
pub use find::{BLOCK_FINDERS, FindContext, Finder, INLINE_FINDERS};
pub use registry::ComponentRegistry;
pub use resolve::{Candidates, CoveredRanges, resolve};
pub use smol_str::SmolStr;
pub use span::{
    Alignment, AttrValue, ComponentAttr, ComponentTag, ListItem, ListMarker, Span, SpanKind,
    SpanPayload, TableData,
};
pub use types::Selection;
pub use visibility::{CODE_BLOCK_EDITING_CLASS, Visibility, suppress};

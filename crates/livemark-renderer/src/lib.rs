//! livemark renderer
//!
//! Turns the editor core's widgets into HTML: MathML for math, classed
//! syntect markup for code blocks (hydrated after mount), tables, details,
//! images, MDX components, and the small inline widgets.

pub mod component;
pub mod config;
pub mod error;
pub mod escape;
pub mod highlight;
pub mod hydrate;
pub mod inline;
pub mod link;
pub mod math;
pub mod table;
pub mod widget;

pub use component::{ComponentFn, ComponentMap, ComponentRenderer};
pub use config::{CSS_PREFIX, RendererConfig};
pub use error::HighlightError;
pub use highlight::{Highlighter, shared_highlighter, theme_css};
pub use hydrate::{HydrationOutcome, HydrationTarget, PendingHighlight, WidgetSlot};
pub use link::{ClickAction, Modifiers, on_link_click};
pub use widget::{ImageResolver, RenderContext, RenderedWidget, render};

//! MDX component rendering.
//!
//! The embedding application supplies a render function per component name.
//! Names without one fall through to the unknown-component warning.

use std::collections::BTreeMap;
use std::fmt::Write;

use livemark_editor_core::{AttrValue, ComponentRegistry, ComponentTag};
use smol_str::SmolStr;

use crate::escape;
use crate::inline::{ALL_INLINE, render_inline};

/// Renders registered components to HTML.
pub trait ComponentRenderer {
    /// `None` when `tag.name` is not registered.
    fn render_component(&self, tag: &ComponentTag) -> Option<String>;
}

/// Unit type implementation - nothing is registered.
impl ComponentRenderer for () {
    fn render_component(&self, _tag: &ComponentTag) -> Option<String> {
        None
    }
}

impl<T: ComponentRenderer + ?Sized> ComponentRenderer for &T {
    fn render_component(&self, tag: &ComponentTag) -> Option<String> {
        (**self).render_component(tag)
    }
}

pub type ComponentFn = fn(&ComponentTag) -> String;

/// Name → render function table. Serves as both the engine's registry and
/// the renderer's.
#[derive(Debug, Clone, Default)]
pub struct ComponentMap {
    components: BTreeMap<SmolStr, ComponentFn>,
}

impl ComponentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<SmolStr>, render: ComponentFn) -> &mut Self {
        self.components.insert(name.into(), render);
        self
    }

    /// Register every name with [`placeholder_component`].
    pub fn placeholders<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut map = Self::new();
        for name in names {
            map.register(name, placeholder_component);
        }
        map
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(SmolStr::as_str)
    }
}

impl ComponentRegistry for ComponentMap {
    fn is_known(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }
}

impl ComponentRenderer for ComponentMap {
    fn render_component(&self, tag: &ComponentTag) -> Option<String> {
        let render = self.components.get(tag.name.as_str())?;
        Some(render(tag))
    }
}

/// Generic box showing the component name, its attributes as `data-` attributes
/// and its inner text.
pub fn placeholder_component(tag: &ComponentTag) -> String {
    let mut out = format!(
        r#"<div class="mdx-component" data-component="{}""#,
        escape::attr(&tag.name)
    );
    for attr in &tag.attrs {
        let value = match &attr.value {
            AttrValue::Text(v) | AttrValue::Expr(v) => v.as_str(),
            AttrValue::Flag => "",
        };
        let _ = write!(
            out,
            r#" data-{}="{}""#,
            escape::attr(&attr.name.to_ascii_lowercase()),
            escape::attr(value)
        );
    }
    let _ = write!(
        out,
        r#"><span class="mdx-component-name">{}</span>"#,
        escape::text(&tag.name)
    );
    if let Some(children) = tag.children.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(
            out,
            r#"<div class="mdx-component-children">{}</div>"#,
            render_inline(children, ALL_INLINE)
        );
    }
    out.push_str("</div>");
    out
}

/// Warning widget for a tag nobody registered.
pub fn unknown_component_html(name: &str) -> String {
    let name = escape::text(name);
    format!(
        r#"<span class="unknown-component" title="Unknown component: {name}">⚠ Unknown component &lt;{name}&gt;</span>"#
    )
}

//! Widget → HTML.
//!
//! Called lazily by the embedding view for each replace decoration it paints.
//! Rendering never fails: anything that cannot be drawn comes back as a
//! fallback node.

use std::fmt::Write;

use livemark_editor_core::{ListMarker, SpanKind, SpanPayload, Widget};

use crate::component::{ComponentRenderer, unknown_component_html};
use crate::config::RendererConfig;
use crate::escape;
use crate::highlight::code_block_html;
use crate::hydrate::PendingHighlight;
use crate::inline::{ALL_INLINE, inline_html, render_inline};
use crate::math::math_html;
use crate::table::table_html;

/// Resolves image URLs from markdown to actual paths.
pub trait ImageResolver {
    /// `None` keeps the URL as written.
    fn resolve_image_url(&self, url: &str) -> Option<String>;
}

/// Unit type implementation - no image resolution.
impl ImageResolver for () {
    fn resolve_image_url(&self, _url: &str) -> Option<String> {
        None
    }
}

impl<T: ImageResolver + ?Sized> ImageResolver for &T {
    fn resolve_image_url(&self, url: &str) -> Option<String> {
        (**self).resolve_image_url(url)
    }
}

/// Collaborators a widget may need.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub components: &'a dyn ComponentRenderer,
    pub images: &'a dyn ImageResolver,
    pub config: &'a RendererConfig,
}

impl<'a> RenderContext<'a> {
    /// No components, identity image URLs.
    pub fn new(config: &'a RendererConfig) -> Self {
        Self {
            components: &(),
            images: &(),
            config,
        }
    }

    pub fn with_components(self, components: &'a dyn ComponentRenderer) -> Self {
        Self { components, ..self }
    }

    pub fn with_images(self, images: &'a dyn ImageResolver) -> Self {
        Self { images, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWidget {
    pub html: String,
    pub interactive: bool,
    /// Work still owed to the node after it is mounted.
    pub hydration: Option<PendingHighlight>,
}

pub fn render(widget: &Widget, ctx: &RenderContext<'_>) -> RenderedWidget {
    let mut hydration = None;
    let html = match (widget.kind, &widget.payload) {
        (SpanKind::MathBlock, SpanPayload::Math { source, .. }) => math_html(source, true),
        (SpanKind::CodeBlock, SpanPayload::CodeBlock { lang, code }) => {
            hydration = Some(PendingHighlight {
                lang: lang.clone(),
                code: code.clone(),
                config: ctx.config.clone(),
            });
            code_block_html(lang.as_deref(), &escape::text(code), false)
        }
        (SpanKind::Table, SpanPayload::Table(table)) => table_html(table),
        (SpanKind::Details, SpanPayload::Details { summary, body }) => details_html(summary, body),
        (SpanKind::Image, SpanPayload::Image { alt, url, title }) => {
            image_html(alt, url, title.as_deref(), ctx.images)
        }
        (SpanKind::Component, SpanPayload::Component(tag)) => ctx
            .components
            .render_component(tag)
            .unwrap_or_else(|| unknown_component_html(&tag.name)),
        (SpanKind::UnknownComponent, SpanPayload::Component(tag)) => {
            unknown_component_html(&tag.name)
        }
        (SpanKind::Heading, SpanPayload::Heading { level, text }) => format!(
            r#"<span class="md-heading md-h{level}">{}</span>"#,
            render_inline(text, ALL_INLINE)
        ),
        (SpanKind::ListItemUnordered | SpanKind::ListItemOrdered, SpanPayload::ListItem(item)) => {
            let marker = match item.marker {
                ListMarker::Bullet(_) => "•".to_string(),
                ListMarker::Ordered(n) => format!("{n}."),
            };
            format!(r#"<span class="list-marker">{marker}</span> "#)
        }
        (SpanKind::ImportBlock, SpanPayload::Imports { count }) => {
            let noun = if *count == 1 { "import" } else { "imports" };
            format!(r#"<span class="import-pill">{count} {noun}</span>"#)
        }
        (kind, payload) => inline_html(kind, payload).unwrap_or_else(|| {
            tracing::warn!(target: "livemark::render", %kind, "payload does not match widget kind");
            String::new()
        }),
    };

    RenderedWidget {
        html,
        interactive: widget.interactive,
        hydration,
    }
}

fn details_html(summary: &str, body: &str) -> String {
    let mut out = format!(
        r#"<details class="md-details"><summary>{}</summary>"#,
        render_inline(summary, ALL_INLINE)
    );
    for paragraph in paragraphs(body) {
        let _ = write!(out, "<p>{}</p>", render_inline(&paragraph, ALL_INLINE));
    }
    out.push_str("</details>");
    out
}

/// Blank-line separated paragraphs, lines within one joined by `\n`.
fn paragraphs(body: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

fn image_html(alt: &str, url: &str, title: Option<&str>, images: &dyn ImageResolver) -> String {
    let src = images
        .resolve_image_url(url)
        .unwrap_or_else(|| url.to_string());
    let alt = escape::attr(alt);
    let mut out = format!(
        r#"<span class="md-image"><img src="{}" alt="{alt}""#,
        escape::href(&src)
    );
    if let Some(title) = title {
        let _ = write!(out, r#" title="{}""#, escape::attr(title));
    }
    let _ = write!(
        out,
        r#" loading="lazy"><span class="md-image-fallback" hidden>{alt}</span></span>"#
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use livemark_editor_core::{ComponentTag, ListItem, Span};
    use smol_str::SmolStr;

    use crate::component::ComponentMap;

    fn widget(kind: SpanKind, payload: SpanPayload) -> Widget {
        Widget::from_span(Span::new(0..1, kind, payload))
    }

    fn render_default(widget: &Widget) -> RenderedWidget {
        let config = RendererConfig::default();
        render(widget, &RenderContext::new(&config))
    }

    #[test]
    fn test_code_block_renders_plain_then_hydrates() {
        let rendered = render_default(&widget(
            SpanKind::CodeBlock,
            SpanPayload::CodeBlock {
                lang: Some(SmolStr::new("python")),
                code: "if a < b:\n    pass".to_string(),
            },
        ));
        assert_eq!(
            rendered.html,
            "<pre class=\"code-block\" data-lang=\"python\"><code>if a &lt; b:\n    pass</code></pre>"
        );
        let pending = rendered.hydration.expect("code blocks hydrate");
        assert_eq!(pending.lang.as_deref(), Some("python"));
        assert!(!rendered.interactive);
    }

    #[test]
    fn test_math_error_fallback() {
        let rendered = render_default(&widget(
            SpanKind::MathInline,
            SpanPayload::Math {
                source: r"\frac{a".to_string(),
                display: false,
            },
        ));
        assert!(rendered.html.contains("math-error"));
        assert!(rendered.hydration.is_none());
    }

    #[test]
    fn test_details_paragraphs() {
        let rendered = render_default(&widget(
            SpanKind::Details,
            SpanPayload::Details {
                summary: "More `info`".to_string(),
                body: "First *para*\nsame para\n\n  \nSecond [link](/a)".to_string(),
            },
        ));
        assert_eq!(
            rendered.html,
            "<details class=\"md-details\"><summary>More <code>info</code></summary>\
             <p>First <em>para</em>\nsame para</p>\
             <p>Second <a class=\"md-link\" href=\"/a\" data-url=\"/a\">link</a></p></details>"
        );
        assert!(rendered.interactive);
    }

    struct Cdn;

    impl ImageResolver for Cdn {
        fn resolve_image_url(&self, url: &str) -> Option<String> {
            url.strip_prefix("/img/")
                .map(|name| format!("https://cdn.example.com/{name}"))
        }
    }

    #[test]
    fn test_image_resolution_and_title() {
        let image = widget(
            SpanKind::Image,
            SpanPayload::Image {
                alt: "a \"cat\"".to_string(),
                url: "/img/cat.png".to_string(),
                title: Some("Cat".to_string()),
            },
        );
        let config = RendererConfig::default();
        let ctx = RenderContext::new(&config).with_images(&Cdn);
        let html = render(&image, &ctx).html;
        assert!(html.contains(r#"src="https://cdn.example.com/cat.png""#));
        assert!(html.contains(r#"alt="a &quot;cat&quot;""#));
        assert!(html.contains(r#"title="Cat""#));
        assert!(html.contains("md-image-fallback"));

        let plain = render_default(&image).html;
        assert!(plain.contains(r#"src="/img/cat.png""#));
    }

    #[test]
    fn test_components() {
        let tag = ComponentTag {
            name: SmolStr::new("Callout"),
            attrs: Vec::new(),
            children: None,
        };
        let known = widget(SpanKind::Component, SpanPayload::Component(tag.clone()));
        let unknown = widget(SpanKind::UnknownComponent, SpanPayload::Component(tag));

        let map = ComponentMap::placeholders(["Callout"]);
        let config = RendererConfig::default();
        let ctx = RenderContext::new(&config).with_components(&map);
        assert!(render(&known, &ctx).html.contains("mdx-component"));
        assert!(render(&unknown, &ctx).html.contains("unknown-component"));
        assert!(render_default(&known).html.contains("unknown-component"));
    }

    #[test]
    fn test_small_widgets() {
        let heading = widget(
            SpanKind::Heading,
            SpanPayload::Heading {
                level: 2,
                text: "Hello **you**".to_string(),
            },
        );
        assert_eq!(
            render_default(&heading).html,
            r#"<span class="md-heading md-h2">Hello <strong>you</strong></span>"#
        );

        let ordered = widget(
            SpanKind::ListItemOrdered,
            SpanPayload::ListItem(ListItem {
                marker: ListMarker::Ordered(3),
                indent_level: 0,
                line: 0..10,
            }),
        );
        assert_eq!(
            render_default(&ordered).html,
            r#"<span class="list-marker">3.</span> "#
        );

        let one = widget(SpanKind::ImportBlock, SpanPayload::Imports { count: 1 });
        let many = widget(SpanKind::ImportBlock, SpanPayload::Imports { count: 4 });
        assert!(render_default(&one).html.contains("1 import<"));
        assert!(render_default(&many).html.contains("4 imports"));

        let bold = widget(
            SpanKind::BoldItalic,
            SpanPayload::Emphasis {
                text: "both".to_string(),
            },
        );
        assert_eq!(render_default(&bold).html, "<strong><em>both</em></strong>");
    }
}

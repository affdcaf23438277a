//! Click handling for link widgets.

use livemark_editor_core::{SpanPayload, Widget};

/// Keyboard modifiers held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn platform_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Open the URL in a new tab or window.
    OpenInNewContext(String),
    /// Let the click place the cursor as usual.
    Ignore,
}

/// A modified click on a link opens it; a plain click does nothing so the
/// text stays editable.
pub fn on_link_click(widget: &Widget, modifiers: Modifiers) -> ClickAction {
    match &widget.payload {
        SpanPayload::Link { url, .. } if widget.interactive && modifiers.platform_modifier() => {
            ClickAction::OpenInNewContext(url.clone())
        }
        _ => ClickAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livemark_editor_core::{Span, SpanKind};

    fn link_widget() -> Widget {
        Widget::from_span(Span::new(
            0..20,
            SpanKind::Link,
            SpanPayload::Link {
                text: "site".to_string(),
                url: "https://example.com".to_string(),
            },
        ))
    }

    #[test]
    fn test_plain_click_is_ignored() {
        assert_eq!(
            on_link_click(&link_widget(), Modifiers::default()),
            ClickAction::Ignore
        );
    }

    #[test]
    fn test_modified_click_opens() {
        let expected = ClickAction::OpenInNewContext("https://example.com".to_string());
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert_eq!(on_link_click(&link_widget(), ctrl), expected);
        assert_eq!(on_link_click(&link_widget(), meta), expected);
    }

    #[test]
    fn test_non_links_ignore_clicks() {
        let bold = Widget::from_span(Span::new(
            0..5,
            SpanKind::Bold,
            SpanPayload::Emphasis {
                text: "x".to_string(),
            },
        ));
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(on_link_click(&bold, ctrl), ClickAction::Ignore);
    }
}

//! Candidate spans produced by the finders.
//!
//! A span is one occurrence of one markdown construct: its byte range in the
//! document, what kind of construct it is, and the pieces a widget needs to
//! draw it.

use std::fmt;
use std::ops::Range;

use serde::Serialize;
use smol_str::SmolStr;

/// Every construct the engine knows how to widgetize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    ImportBlock,
    MathBlock,
    Details,
    Table,
    CodeBlock,
    Image,
    Component,
    UnknownComponent,
    Heading,
    ListItemUnordered,
    ListItemOrdered,
    MathInline,
    InlineCode,
    Link,
    BareUrl,
    BoldItalic,
    Bold,
    Italic,
}

impl SpanKind {
    /// Block constructs are resolved before any inline construct.
    pub fn is_block(self) -> bool {
        !self.is_inline()
    }

    pub fn is_inline(self) -> bool {
        matches!(
            self,
            SpanKind::MathInline
                | SpanKind::InlineCode
                | SpanKind::Link
                | SpanKind::BareUrl
                | SpanKind::BoldItalic
                | SpanKind::Bold
                | SpanKind::Italic
        )
    }

    pub fn is_list_item(self) -> bool {
        matches!(self, SpanKind::ListItemUnordered | SpanKind::ListItemOrdered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpanKind::ImportBlock => "import-block",
            SpanKind::MathBlock => "math-block",
            SpanKind::Details => "details",
            SpanKind::Table => "table",
            SpanKind::CodeBlock => "code-block",
            SpanKind::Image => "image",
            SpanKind::Component => "component",
            SpanKind::UnknownComponent => "unknown-component",
            SpanKind::Heading => "heading",
            SpanKind::ListItemUnordered => "list-item-unordered",
            SpanKind::ListItemOrdered => "list-item-ordered",
            SpanKind::MathInline => "math-inline",
            SpanKind::InlineCode => "inline-code",
            SpanKind::Link => "link",
            SpanKind::BareUrl => "bare-url",
            SpanKind::BoldItalic => "bold-italic",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column alignment derived from a table separator cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// `:---:` centre, `---:` right, anything else left.
    pub fn from_separator_cell(cell: &str) -> Self {
        let cell = cell.trim();
        match (cell.starts_with(':'), cell.ends_with(':') && cell.len() > 1) {
            (true, true) => Alignment::Center,
            (false, true) => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Parsed pipe table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
}

/// Value of a component attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum AttrValue {
    /// `key="text"` or `key='text'`
    Text(String),
    /// `key={expression}`, kept verbatim without the braces
    Expr(String),
    /// Bare `key`
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentAttr {
    pub name: SmolStr,
    pub value: AttrValue,
}

/// A capitalised JSX-style tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentTag {
    pub name: SmolStr,
    pub attrs: Vec<ComponentAttr>,
    /// Inner text for `<Name>…</Name>`, `None` for self-closing tags.
    pub children: Option<String>,
}

impl ComponentTag {
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum ListMarker {
    Bullet(char),
    Ordered(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub marker: ListMarker,
    /// `floor(indent_columns / 2)`, tabs counting as two columns.
    pub indent_level: usize,
    /// Whole line, used for per-line cursor suppression.
    pub line: Range<usize>,
}

/// Kind-specific data a widget needs to draw a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SpanPayload {
    Math {
        source: String,
        display: bool,
    },
    Image {
        alt: String,
        url: String,
        title: Option<String>,
    },
    Details {
        summary: String,
        body: String,
    },
    Table(TableData),
    CodeBlock {
        lang: Option<SmolStr>,
        code: String,
    },
    Component(ComponentTag),
    Heading {
        level: u8,
        text: String,
    },
    Emphasis {
        text: String,
    },
    InlineCode {
        code: String,
    },
    Link {
        text: String,
        url: String,
    },
    ListItem(ListItem),
    Imports {
        count: usize,
    },
}

/// One candidate occurrence of a construct, not yet resolved against others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub range: Range<usize>,
    pub kind: SpanKind,
    pub payload: SpanPayload,
}

impl Span {
    pub fn new(range: Range<usize>, kind: SpanKind, payload: SpanPayload) -> Self {
        debug_assert!(range.start < range.end, "empty span for {kind}");
        Self {
            range,
            kind,
            payload,
        }
    }

    /// Range the cursor must touch for this span to stay raw.
    ///
    /// List items are suppressed per line; everything else by its own range.
    pub fn suppression_range(&self) -> Range<usize> {
        match &self.payload {
            SpanPayload::ListItem(item) => item.line.clone(),
            _ => self.range.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_inline_partition() {
        assert!(SpanKind::CodeBlock.is_block());
        assert!(SpanKind::ListItemOrdered.is_block());
        assert!(SpanKind::UnknownComponent.is_block());
        assert!(SpanKind::Link.is_inline());
        assert!(SpanKind::BoldItalic.is_inline());
        assert!(!SpanKind::Heading.is_inline());
    }

    #[test]
    fn test_alignment_from_separator() {
        assert_eq!(Alignment::from_separator_cell(":---:"), Alignment::Center);
        assert_eq!(Alignment::from_separator_cell(" ---: "), Alignment::Right);
        assert_eq!(Alignment::from_separator_cell(":---"), Alignment::Left);
        assert_eq!(Alignment::from_separator_cell("---"), Alignment::Left);
        assert_eq!(Alignment::from_separator_cell(":"), Alignment::Left);
    }

    #[test]
    fn test_list_item_suppresses_by_line() {
        let span = Span::new(
            4..6,
            SpanKind::ListItemUnordered,
            SpanPayload::ListItem(ListItem {
                marker: ListMarker::Bullet('-'),
                indent_level: 0,
                line: 4..12,
            }),
        );
        assert_eq!(span.suppression_range(), 4..12);
    }
}

use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

use super::FindContext;
use crate::span::{Span, SpanKind, SpanPayload};
use crate::text_helpers::{char_at, char_before};

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?msR)^```([^`\r\n]*)\r?\n(.*?)^```[ \t]*$").unwrap());

/// Single-backtick code. Never part of a longer backtick run, so fences
/// are left to [`find_code_blocks`].
pub fn find_inline_code(ctx: &FindContext<'_>) -> Vec<Span> {
    let text = ctx.text;
    ctx.scan(&INLINE_CODE_RE, |caps| {
        let whole = caps.get(0)?;
        if char_before(text, whole.start()) == Some('`') || char_at(text, whole.end()) == Some('`')
        {
            return None;
        }
        Some(Span::new(
            whole.range(),
            SpanKind::InlineCode,
            SpanPayload::InlineCode {
                code: caps.get(1)?.as_str().to_string(),
            },
        ))
    })
}

/// Triple-backtick fences with an optional language tag.
///
/// The tag is the first whitespace-separated word of the info string, so
/// ```` ```rust title="main.rs" ```` is tagged `rust`.
pub fn find_code_blocks(ctx: &FindContext<'_>) -> Vec<Span> {
    ctx.scan(&CODE_FENCE_RE, |caps| {
        let whole = caps.get(0)?;
        let lang = caps
            .get(1)?
            .as_str()
            .split_whitespace()
            .next()
            .map(SmolStr::new);
        let body = caps.get(2)?.as_str();
        let code = body.strip_suffix('\n').unwrap_or(body);
        let code = code.strip_suffix('\r').unwrap_or(code);
        Some(Span::new(
            whole.range(),
            SpanKind::CodeBlock,
            SpanPayload::CodeBlock {
                lang,
                code: code.to_string(),
            },
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Selection;

    fn ctx(text: &str) -> FindContext<'_> {
        FindContext::new(text, Selection::collapsed(0), &()).skipping_cursor_check()
    }

    #[test]
    fn test_inline_code() {
        let text = "use `foo()` and `bar`";
        let spans = find_inline_code(&ctx(text));
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].range.clone()], "`foo()`");
        assert_eq!(
            spans[1].payload,
            SpanPayload::InlineCode {
                code: "bar".to_string()
            }
        );
    }

    #[test]
    fn test_inline_code_ignores_fences() {
        assert!(find_inline_code(&ctx("```python\nprint(1)\n```")).is_empty());
        assert!(find_inline_code(&ctx("``double``")).is_empty());
    }

    #[test]
    fn test_code_block_with_language() {
        let text = "intro\n```python extra\nprint(1)\n```\noutro";
        let spans = find_code_blocks(&ctx(text));
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].range.clone()], "```python extra\nprint(1)\n```");
        assert_eq!(
            spans[0].payload,
            SpanPayload::CodeBlock {
                lang: Some(SmolStr::new("python")),
                code: "print(1)".to_string()
            }
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let text = "```\na\n\nb\n```";
        let spans = find_code_blocks(&ctx(text));
        assert_eq!(
            spans[0].payload,
            SpanPayload::CodeBlock {
                lang: None,
                code: "a\n\nb".to_string()
            }
        );
    }

    #[test]
    fn test_unclosed_fence_is_plain_text() {
        assert!(find_code_blocks(&ctx("```rust\nfn main() {}\n")).is_empty());
    }

    #[test]
    fn test_code_block_with_crlf_line_endings() {
        let text = "a\r\n```rust\r\nfn x() {}\r\n```\r\nb";
        let spans = find_code_blocks(&ctx(text));
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].range.clone()], "```rust\r\nfn x() {}\r\n```");
        assert_eq!(
            spans[0].payload,
            SpanPayload::CodeBlock {
                lang: Some(SmolStr::new("rust")),
                code: "fn x() {}".to_string()
            }
        );
    }

    #[test]
    fn test_two_blocks_stay_separate() {
        let text = "```js\na\n```\n\n```sh\nb\n```";
        let spans = find_code_blocks(&ctx(text));
        assert_eq!(spans.len(), 2);
        assert!(spans[0].range.end < spans[1].range.start);
    }
}

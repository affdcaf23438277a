//! Syntax highlighting for code block widgets.
//!
//! Output uses CSS classes rather than inline styles, so a theme's colours
//! come from [`theme_css`].

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, OnceLock};

use smol_str::SmolStr;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tokio::sync::OnceCell;

use crate::config::RendererConfig;
use crate::error::HighlightError;
use crate::escape;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

static SHARED: OnceCell<Highlighter> = OnceCell::const_new();

/// The process-wide highlighter. The first caller's config wins.
pub async fn shared_highlighter(config: &RendererConfig) -> &'static Highlighter {
    SHARED
        .get_or_init(|| async { Highlighter::new(config) })
        .await
}

/// Canonical grammar token for common fence tags.
///
/// `None` means the tag asks for plain text.
pub fn normalize_language(lang: &str) -> Option<&str> {
    let canonical = match lang {
        "py" => "python",
        "sh" | "shell" | "zsh" => "bash",
        "js" | "jsx" | "mjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "rs" => "rust",
        "yml" => "yaml",
        "md" | "mdx" => "markdown",
        "rb" => "ruby",
        "c++" | "cc" => "cpp",
        "cs" => "c#",
        "golang" => "go",
        "txt" | "text" | "plaintext" => return None,
        other => other,
    };
    Some(canonical)
}

/// Which syntax set a grammar came from.
#[derive(Clone, Copy)]
enum Source {
    Bundled,
    Extra,
}

pub struct Highlighter {
    css_prefix: &'static str,
    syntax_dir: Option<PathBuf>,
    extra: OnceLock<Option<SyntaxSet>>,
}

impl Highlighter {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            css_prefix: config.css_prefix,
            syntax_dir: config.syntax_dir.clone(),
            extra: OnceLock::new(),
        }
    }

    /// Highlight `code` as a complete `<pre>` block.
    ///
    /// Falls back to plain text when the grammar fails; an error means plain
    /// text failed too.
    pub fn highlight(&self, lang: Option<&str>, code: &str) -> Result<String, HighlightError> {
        let (source, syntax) = self.resolve(lang);
        let inner = match self.classed_html(self.set(source), syntax, code) {
            Ok(inner) => inner,
            Err(err) => {
                tracing::warn!(
                    target: "livemark::highlight",
                    grammar = %syntax.name,
                    error = %err,
                    "highlighting failed, retrying as plain text"
                );
                self.classed_html(&SYNTAX_SET, SYNTAX_SET.find_syntax_plain_text(), code)?
            }
        };
        Ok(code_block_html(lang, &inner, true))
    }

    /// Name of the grammar `lang` resolves to.
    pub fn grammar_name(&self, lang: Option<&str>) -> &str {
        &self.resolve(lang).1.name
    }

    fn set(&self, source: Source) -> &SyntaxSet {
        match source {
            Source::Bundled => &SYNTAX_SET,
            Source::Extra => self.extra_syntaxes().unwrap_or(&SYNTAX_SET),
        }
    }

    fn resolve(&self, lang: Option<&str>) -> (Source, &SyntaxReference) {
        let plain = (Source::Bundled, SYNTAX_SET.find_syntax_plain_text());
        let Some(lang) = lang.map(str::trim).filter(|l| !l.is_empty()) else {
            return plain;
        };

        if let Some(syntax) = find_syntax(&SYNTAX_SET, lang) {
            return (Source::Bundled, syntax);
        }
        let lowered = lang.to_lowercase();
        let Some(canonical) = normalize_language(&lowered) else {
            return plain;
        };
        if let Some(syntax) = find_syntax(&SYNTAX_SET, canonical) {
            return (Source::Bundled, syntax);
        }
        if let Some(syntax) = self
            .extra_syntaxes()
            .and_then(|set| find_syntax(set, lang).or_else(|| find_syntax(set, canonical)))
        {
            return (Source::Extra, syntax);
        }

        tracing::debug!(target: "livemark::highlight", lang, "no grammar, using plain text");
        plain
    }

    /// Bundled grammars plus the configured directory, built at most once.
    fn extra_syntaxes(&self) -> Option<&SyntaxSet> {
        self.extra
            .get_or_init(|| {
                let dir = self.syntax_dir.as_deref()?;
                match load_extra_syntaxes(dir) {
                    Ok(set) => Some(set),
                    Err(err) => {
                        tracing::warn!(target: "livemark::highlight", error = %err, "extra grammars unavailable");
                        None
                    }
                }
            })
            .as_ref()
    }

    fn classed_html(
        &self,
        set: &SyntaxSet,
        syntax: &SyntaxReference,
        code: &str,
    ) -> Result<String, HighlightError> {
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            set,
            ClassStyle::SpacedPrefixed {
                prefix: self.css_prefix,
            },
        );
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|source| HighlightError::Highlight {
                    grammar: syntax.name.clone(),
                    source,
                })?;
        }
        Ok(generator.finalize())
    }
}

fn find_syntax<'s>(set: &'s SyntaxSet, token: &str) -> Option<&'s SyntaxReference> {
    set.find_syntax_by_token(token)
        .or_else(|| set.find_syntax_by_name(token))
}

fn load_extra_syntaxes(dir: &Path) -> Result<SyntaxSet, HighlightError> {
    let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
    builder
        .add_from_folder(dir, true)
        .map_err(|source| HighlightError::GrammarLoad {
            path: dir.to_path_buf(),
            source,
        })?;
    tracing::debug!(target: "livemark::highlight", dir = %dir.display(), "loaded extra grammars");
    Ok(builder.build())
}

/// The `<pre>` wrapper shared by plain and highlighted code blocks.
pub fn code_block_html(lang: Option<&str>, inner: &str, highlighted: bool) -> String {
    let class = if highlighted {
        "code-block highlighted"
    } else {
        "code-block"
    };
    match lang {
        Some(lang) => format!(
            r#"<pre class="{class}" data-lang="{}"><code>{inner}</code></pre>"#,
            escape::attr(lang)
        ),
        None => format!(r#"<pre class="{class}"><code>{inner}</code></pre>"#),
    }
}

/// Stylesheet for `theme`, matching the classes [`Highlighter`] emits.
pub fn theme_css(theme: &str, css_prefix: &'static str) -> Result<String, HighlightError> {
    let Some(found) = THEME_SET.themes.get(theme) else {
        return Err(HighlightError::UnknownTheme {
            name: SmolStr::new(theme),
            available: available_themes().join(", "),
        });
    };
    css_for_theme_with_class_style(found, ClassStyle::SpacedPrefixed { prefix: css_prefix }).map_err(
        |source| HighlightError::Css {
            name: SmolStr::new(theme),
            source,
        },
    )
}

pub fn available_themes() -> Vec<&'static str> {
    THEME_SET.themes.keys().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter() -> Highlighter {
        Highlighter::new(&RendererConfig::default())
    }

    #[test]
    fn test_alias_table() {
        assert_eq!(normalize_language("py"), Some("python"));
        assert_eq!(normalize_language("zsh"), Some("bash"));
        assert_eq!(normalize_language("tsx"), Some("typescript"));
        assert_eq!(normalize_language("c++"), Some("cpp"));
        assert_eq!(normalize_language("cs"), Some("c#"));
        assert_eq!(normalize_language("text"), None);
        assert_eq!(normalize_language("haskell"), Some("haskell"));
    }

    #[test]
    fn test_language_cascade() {
        let hl = highlighter();
        assert_eq!(hl.grammar_name(Some("python")), "Python");
        assert_eq!(hl.grammar_name(Some("py")), "Python");
        assert_eq!(hl.grammar_name(Some("rs")), "Rust");
        assert_eq!(hl.grammar_name(Some("golang")), "Go");
        assert_eq!(hl.grammar_name(Some("txt")), "Plain Text");
        assert_eq!(hl.grammar_name(Some("no-such-language")), "Plain Text");
        assert_eq!(hl.grammar_name(None), "Plain Text");
    }

    #[test]
    fn test_highlight_emits_prefixed_classes() {
        let html = highlighter()
            .highlight(Some("rust"), "fn main() {}\n")
            .expect("rust highlights");
        assert!(html.starts_with(r#"<pre class="code-block highlighted" data-lang="rust">"#));
        assert!(html.contains(r#"class="hl-"#));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let html = highlighter()
            .highlight(None, "<script>")
            .expect("plain text highlights");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_missing_syntax_dir_falls_back() {
        let hl = Highlighter::new(&RendererConfig::default().with_syntax_dir("/nonexistent/grammars"));
        assert_eq!(hl.grammar_name(Some("zig-but-not-really")), "Plain Text");
    }

    #[test]
    fn test_theme_css() {
        let css = theme_css("InspiredGitHub", "hl-").expect("bundled theme");
        assert!(css.contains(".hl-"));

        let err = theme_css("no-such-theme", "hl-").unwrap_err();
        assert!(matches!(err, HighlightError::UnknownTheme { .. }));
    }
}

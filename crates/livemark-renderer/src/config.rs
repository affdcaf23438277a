use std::path::PathBuf;

use smol_str::SmolStr;

/// Class prefix for highlighted code spans.
pub const CSS_PREFIX: &str = "hl-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Name of a syntect theme, used when generating highlight CSS.
    pub highlight_theme: SmolStr,
    /// Directory of extra `.sublime-syntax` grammars, loaded on first miss.
    pub syntax_dir: Option<PathBuf>,
    pub css_prefix: &'static str,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            highlight_theme: SmolStr::new("InspiredGitHub"),
            syntax_dir: None,
            css_prefix: CSS_PREFIX,
        }
    }
}

impl RendererConfig {
    pub fn with_theme(mut self, theme: impl Into<SmolStr>) -> Self {
        self.highlight_theme = theme.into();
        self
    }

    pub fn with_syntax_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.syntax_dir = Some(dir.into());
        self
    }
}

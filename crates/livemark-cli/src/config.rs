//! Optional KDL config for the CLI.
//!
//! ```kdl
//! components "Callout" "YouTube"
//! highlight-theme "base16-ocean.dark"
//! syntax-dir "grammars"
//! ```

use std::path::{Path, PathBuf};

use kdl::KdlDocument;
use livemark_editor_core::SmolStr;
use livemark_renderer::RendererConfig;
use miette::{IntoDiagnostic, Result, WrapErr};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Component names treated as registered.
    pub components: Vec<SmolStr>,
    pub highlight_theme: Option<SmolStr>,
    pub syntax_dir: Option<PathBuf>,
}

impl CliConfig {
    pub fn parse(source: &str) -> Result<Self> {
        let doc: KdlDocument = source.parse().into_diagnostic()?;
        let mut config = CliConfig::default();

        if let Some(node) = doc.get("components") {
            config.components = node
                .entries()
                .iter()
                .filter_map(|entry| entry.value().as_string())
                .map(SmolStr::new)
                .collect();
        }
        config.highlight_theme = first_string(&doc, "highlight-theme").map(SmolStr::new);
        config.syntax_dir = first_string(&doc, "syntax-dir").map(PathBuf::from);
        Ok(config)
    }

    /// Load `path`; a relative `syntax-dir` is taken relative to the file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::parse(&source)
            .wrap_err_with(|| format!("invalid config {}", path.display()))?;
        if let (Some(dir), Some(base)) = (config.syntax_dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        Ok(config)
    }

    /// `explicit` if given, else the per-user config when it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn renderer_config(&self) -> RendererConfig {
        let mut config = RendererConfig::default();
        if let Some(theme) = &self.highlight_theme {
            config = config.with_theme(theme.clone());
        }
        if let Some(dir) = &self.syntax_dir {
            config = config.with_syntax_dir(dir.clone());
        }
        config
    }
}

fn first_string<'d>(doc: &'d KdlDocument, name: &str) -> Option<&'d str> {
    doc.get(name)?.entries().first()?.value().as_string()
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("livemark").join("config.kdl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = CliConfig::parse(
            r#"
            components "Callout" "YouTube"
            highlight-theme "base16-ocean.dark"
            syntax-dir "/opt/grammars"
            "#,
        )
        .unwrap();
        assert_eq!(config.components, vec!["Callout", "YouTube"]);
        assert_eq!(config.highlight_theme.as_deref(), Some("base16-ocean.dark"));

        let renderer = config.renderer_config();
        assert_eq!(renderer.highlight_theme, "base16-ocean.dark");
        assert_eq!(renderer.syntax_dir, Some(PathBuf::from("/opt/grammars")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.renderer_config(), RendererConfig::default());
    }

    #[test]
    fn test_invalid_kdl_is_an_error() {
        assert!(CliConfig::parse("components \"unterminated").is_err());
    }
}

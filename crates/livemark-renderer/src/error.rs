use std::path::PathBuf;

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HighlightError {
    #[error("failed to load extra grammars from {}", path.display())]
    #[diagnostic(
        code(livemark::highlight::grammar_load),
        help("the directory should contain .sublime-syntax files")
    )]
    GrammarLoad {
        path: PathBuf,
        #[source]
        source: syntect::LoadingError,
    },

    #[error("highlighting failed for {grammar}")]
    #[diagnostic(code(livemark::highlight::highlight))]
    Highlight {
        grammar: String,
        #[source]
        source: syntect::Error,
    },

    #[error("unknown highlight theme {name:?}")]
    #[diagnostic(
        code(livemark::highlight::unknown_theme),
        help("available themes: {available}")
    )]
    UnknownTheme { name: SmolStr, available: String },

    #[error("failed to generate css for theme {name:?}")]
    #[diagnostic(code(livemark::highlight::css))]
    Css {
        name: SmolStr,
        #[source]
        source: syntect::Error,
    },
}

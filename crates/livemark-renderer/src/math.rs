//! LaTeX math rendering via pulldown-latex → MathML

use pulldown_latex::{
    Parser, Storage, config::DisplayMode, config::RenderConfig, mathml::push_mathml,
};

use crate::escape;

/// Result of attempting to render LaTeX math
pub enum MathResult {
    /// Successfully rendered MathML
    Success(String),
    /// Rendering failed - contains fallback HTML with source and error message
    Error { html: String, message: String },
}

/// Render LaTeX math to MathML
///
/// # Arguments
/// * `latex` - The LaTeX source string (without delimiters like $ or $$)
/// * `display_mode` - If true, render as display math (block); if false, inline
pub fn render_math(latex: &str, display_mode: bool) -> MathResult {
    let storage = Storage::new();
    let parser = Parser::new(latex, &storage);
    let config = RenderConfig {
        display_mode: if display_mode {
            DisplayMode::Block
        } else {
            DisplayMode::Inline
        },
        ..Default::default()
    };

    let events: Vec<_> = parser.collect();
    let errors: Vec<String> = events
        .iter()
        .filter_map(|e| e.as_ref().err().map(|err| err.to_string()))
        .collect();

    if !errors.is_empty() {
        let message = errors.join("; ");
        return MathResult::Error {
            html: format_error_html(latex, &message, display_mode),
            message,
        };
    }

    let mut mathml = String::new();
    if let Err(e) = push_mathml(&mut mathml, events.into_iter(), config) {
        let message = e.to_string();
        return MathResult::Error {
            html: format_error_html(latex, &message, display_mode),
            message,
        };
    }
    MathResult::Success(mathml)
}

/// Widget markup for a math span. Failures come back as the error fallback.
pub fn math_html(latex: &str, display_mode: bool) -> String {
    match render_math(latex, display_mode) {
        MathResult::Success(mathml) => {
            let (tag, class) = mode(display_mode);
            format!(r#"<{tag} class="math {class}">{mathml}</{tag}>"#)
        }
        MathResult::Error { html, message } => {
            tracing::debug!(target: "livemark::render", %message, "math fallback");
            html
        }
    }
}

fn mode(display_mode: bool) -> (&'static str, &'static str) {
    if display_mode {
        ("div", "math-display")
    } else {
        ("span", "math-inline")
    }
}

fn format_error_html(latex: &str, error: &str, display_mode: bool) -> String {
    let (tag, mode_class) = mode(display_mode);
    let escaped_latex = escape::text(latex);
    let escaped_error = escape::attr(error);
    format!(
        r#"<{tag} class="math math-error {mode_class}" title="{escaped_error}"><code>{escaped_latex}</code></{tag}>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_inline_math() {
        let MathResult::Success(mathml) = render_math("x^2", false) else {
            panic!("x^2 should render");
        };
        assert!(mathml.contains("<math"));
        assert!(mathml.contains("</math>"));
    }

    #[test]
    fn renders_display_math() {
        let html = math_html(r"\frac{a}{b}", true);
        assert!(html.starts_with(r#"<div class="math math-display">"#));
        assert!(html.contains("<mfrac"));
    }

    #[test]
    fn handles_invalid_latex() {
        // Unclosed brace
        let result = render_math(r"\frac{a", false);
        let MathResult::Error { html, message } = result else {
            panic!("unclosed brace should fail");
        };
        assert!(html.contains("math-error"));
        assert!(html.contains(r"\frac{a"));
        assert!(!message.is_empty());
    }

    #[test]
    fn error_fallback_escapes_source() {
        let html = math_html(r"\frac{<b>", false);
        assert!(html.contains("math-error"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.starts_with("<span"));
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use livemark_editor_core::text_helpers::char_to_byte;
use livemark_editor_core::{Decoration, Selection, decorate};
use livemark_renderer::{ComponentMap, RenderContext, WidgetSlot, render, theme_css};
use miette::{IntoDiagnostic, Result, WrapErr};

mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(version, about = "Livemark - inspect the live editor's decorations", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a KDL config file
    #[arg(long, global = true, env = "LIVEMARK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the decorations for a document and selection
    Decorate {
        /// Markdown or MDX file
        file: PathBuf,

        /// Selection start
        #[arg(long, default_value_t = 0)]
        from: usize,

        /// Selection end, defaults to --from
        #[arg(long)]
        to: Option<usize>,

        /// Offsets are in characters rather than bytes
        #[arg(long)]
        chars: bool,

        /// Render each widget to HTML instead of printing JSON
        #[arg(long)]
        html: bool,
    },
    /// Print the CSS for a syntax highlighting theme
    Css {
        /// syntect theme name
        #[arg(long)]
        theme: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_miette();
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Decorate {
            file,
            from,
            to,
            chars,
            html,
        } => decorate_file(&config, file, from, to.unwrap_or(from), chars, html).await,
        Commands::Css { theme } => {
            let renderer_config = config.renderer_config();
            let theme = theme.unwrap_or_else(|| renderer_config.highlight_theme.to_string());
            let css = theme_css(&theme, renderer_config.css_prefix)?;
            println!("{css}");
            Ok(())
        }
    }
}

async fn decorate_file(
    config: &CliConfig,
    file: PathBuf,
    from: usize,
    to: usize,
    chars: bool,
    html: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;

    let selection = if chars {
        Selection::new(char_to_byte(&text, from), char_to_byte(&text, to))
    } else {
        Selection::new(from, to)
    };
    let components = ComponentMap::placeholders(config.components.iter().cloned());
    let decorations = decorate(&text, selection, &components);
    tracing::info!(
        file = %file.display(),
        decorations = decorations.len(),
        "decorated"
    );

    if !html {
        let json = serde_json::to_string_pretty(&decorations).into_diagnostic()?;
        println!("{json}");
        return Ok(());
    }

    let renderer_config = config.renderer_config();
    let ctx = RenderContext::new(&renderer_config).with_components(&components);
    for decoration in &decorations {
        match decoration {
            Decoration::Replace { range, widget } => {
                let rendered = render(widget, &ctx);
                let slot = WidgetSlot::new(rendered.html);
                if let Some(pending) = rendered.hydration {
                    pending.hydrate(&slot).await;
                }
                println!("<!-- {range:?} {} -->\n{}", widget.kind, slot.html());
            }
            Decoration::Mark { range, class } => println!("<!-- {range:?} mark {class} -->"),
            Decoration::Line { line_start, class } => {
                println!("<!-- line {line_start} {class} -->")
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::tty::IsTty;
use spark_ellipsis::{EllipsisConfig, EllipsisPosition, EllipsisText, WrapMode};
use tracing::debug;

const DEFAULT_WIDTH: usize = 80;
const DEFAULT_ELLIPSIS: &str = "…";

/// Fit text to a number of terminal lines, eliding the overflow.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Text to fit. Read from stdin when omitted.
    text: Option<String>,

    /// Box width in cells. Defaults to the terminal width.
    #[arg(short, long)]
    width: Option<usize>,

    /// Maximum number of lines.
    #[arg(short, long)]
    lines: Option<usize>,

    /// Where to put the ellipsis.
    #[arg(short, long, value_enum)]
    position: Option<Position>,

    /// Ellipsis marker.
    #[arg(short, long)]
    ellipsis: Option<String>,

    /// Ellipsis color: hex, a color name, "ansi:N" or "default".
    #[arg(long)]
    color: Option<String>,

    /// Line wrapping mode.
    #[arg(long, value_enum)]
    wrap: Option<Wrap>,

    /// YAML settings file. Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Never emit escape sequences.
    #[arg(long)]
    no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    End,
    Middle,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Wrap {
    Char,
    Word,
}

impl From<Position> for EllipsisPosition {
    fn from(position: Position) -> Self {
        match position {
            Position::End => EllipsisPosition::End,
            Position::Middle => EllipsisPosition::Middle,
        }
    }
}

impl From<Wrap> for WrapMode {
    fn from(wrap: Wrap) -> Self {
        match wrap {
            Wrap::Char => WrapMode::Char,
            Wrap::Word => WrapMode::Word,
        }
    }
}

impl Cli {
    /// Config file values with flags applied on top.
    fn config(&self) -> Result<EllipsisConfig> {
        let mut config = match &self.config {
            Some(path) => EllipsisConfig::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => EllipsisConfig {
                ellipsis: Some(DEFAULT_ELLIPSIS.to_string()),
                ..Default::default()
            },
        };

        if let Some(ellipsis) = &self.ellipsis {
            config.ellipsis = Some(ellipsis.clone());
        }
        if let Some(lines) = self.lines {
            config.limit_lines = lines;
        }
        if let Some(position) = self.position {
            config.position = position.into();
        }
        if let Some(color) = &self.color {
            config.color = Some(color.clone());
        }
        if let Some(wrap) = self.wrap {
            config.wrap = wrap.into();
        }
        Ok(config)
    }
}

fn init_logging() {
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_spec))
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn read_text(arg: Option<String>) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("reading text from stdin")?;
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((width, _)) if width > 0 => width as usize,
        _ => DEFAULT_WIDTH,
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = cli.config()?.validate().context("invalid ellipsis settings")?;
    let width = cli.width.unwrap_or_else(terminal_width);
    let color = !cli.no_color && io::stdout().is_tty();
    let text = read_text(cli.text)?;
    debug!(width, color, ?settings, "fitting");

    let label = EllipsisText::with_settings(text, width, settings);
    let mut stdout = io::stdout().lock();
    label.write_to(&mut stdout, color).context("writing output")?;
    writeln!(stdout).context("writing output")?;
    stdout.flush().context("writing output")
}

fn main() -> Result<()> {
    init_logging();
    run(Cli::parse())
}

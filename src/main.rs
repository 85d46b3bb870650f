use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use inline_chords::{load_sheet, render_json, render_text};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inline-chords")]
#[command(about = "Render and transpose lyric sheets with inline [chord] markup")]
#[command(version)]
struct Cli {
    /// Sheet to read, or `-` for stdin
    input: PathBuf,

    /// Half-steps to transpose by, on top of the sheet's own `transpose`
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    steps: i32,

    /// Undo all transposition after applying it
    #[arg(long)]
    reset: bool,

    /// Output format
    #[arg(short, long, value_enum, env = "INLINE_CHORDS_FORMAT", default_value_t = Format::Text)]
    format: Format,

    /// Leave out the title and transposition label
    #[arg(long)]
    no_header: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` directives when given and valid, `warn` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn run(cli: Cli) -> Result<()> {
    let source = read_source(&cli.input)?;
    let mut sheet = load_sheet(&source)
        .with_context(|| format!("failed to load sheet '{}'", cli.input.display()))?;

    sheet.transpose(cli.steps);
    if cli.reset {
        sheet.reset_transposition();
    }

    let output = match cli.format {
        Format::Text => render_text(&sheet, !cli.no_header),
        Format::Json => render_json(&sheet)?,
    };
    print!("{}", output);
    Ok(())
}

fn read_source(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("failed to read '{}'", input.display()))
}

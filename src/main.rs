use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use clozegen::cloze::ThreadRandom;
use clozegen::config::Config;
use clozegen::pipeline;

/// Generate Anki cloze deletion cards from parallel sentence corpora.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a JSON config file (optional; defaults apply when absent).
    #[arg(long, default_value = "")]
    config: String,

    /// Source-language sentence table (tab-delimited: id, lang, text).
    source_sentences: Option<PathBuf>,

    /// Target-language sentence table (tab-delimited: id, lang, text).
    target_sentences: Option<PathBuf>,

    /// Translation link table (tab-delimited: source id, target id).
    links: Option<PathBuf>,

    /// Word frequency list (space-delimited: word, rank).
    frequency_list: Option<PathBuf>,

    /// Output card table.
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // 1. Load config, then let positional paths override it
    let mut config = Config::load(&cli.config)?;
    if let Some(path) = cli.source_sentences {
        config.source_sentences = path;
    }
    if let Some(path) = cli.target_sentences {
        config.target_sentences = path;
    }
    if let Some(path) = cli.links {
        config.links = path;
    }
    if let Some(path) = cli.frequency_list {
        config.frequency_list = path;
    }
    if let Some(path) = cli.output {
        config.output = path;
    }
    config.validate()?;

    // 2. Run the pipeline
    let report = pipeline::generate(&config, &mut ThreadRandom)?;

    info!(
        "Wrote {} cards to {}",
        report.written,
        config.output.display()
    );
    Ok(())
}

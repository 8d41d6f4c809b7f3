//! `sloka` command-line entry point.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use sloka_core::SlokaConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Phonetic { text, no_syllabify } => commands::phonetic(&text, no_syllabify),
        Commands::Iast { text } => commands::iast(&text),
        Commands::Voices => {
            let config = load_config(cli.config.as_deref())?;
            commands::voices(&config);
        }
        Commands::Play {
            verse,
            mode,
            repeats,
            slow,
            char_ms,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let options = commands::PlayOptions {
                mode,
                repeats,
                slow,
                char_ms,
            };
            commands::play(&config, &verse, options).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<SlokaConfig> {
    SlokaConfig::load_or_default(path).context("Failed to load configuration")
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

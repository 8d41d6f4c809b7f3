//! Argument parsing.

use clap::{Parser, Subcommand};
use sloka_core::RenderingMode;
use std::path::PathBuf;

/// Sanskrit verse transliteration and playback.
#[derive(Debug, Parser)]
#[command(name = "sloka")]
#[command(about = "Turn Sanskrit verses into speakable text and sequence their playback")]
#[command(version = sloka_core::VERSION)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "SLOKA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert Devanagari to romanized phonetic text
    Phonetic {
        /// Devanagari text
        text: String,
        /// Skip the breathing spaces inserted into long words
        #[arg(long)]
        no_syllabify: bool,
    },
    /// Clean IAST transliteration into plain ASCII
    Iast {
        /// IAST text
        text: String,
    },
    /// Show the voice chosen for every mode and phase
    Voices,
    /// Play a verse on the simulated engine, printing each utterance
    Play {
        /// Verse JSON file
        #[arg(long)]
        verse: PathBuf,
        /// Rendering mode (overrides the configured one)
        #[arg(long)]
        mode: Option<RenderingMode>,
        /// Full cycles to play (overrides the configured count)
        #[arg(long)]
        repeats: Option<u32>,
        /// Use the slow speech rate
        #[arg(long)]
        slow: bool,
        /// Simulated milliseconds per character
        #[arg(long, default_value_t = 40)]
        char_ms: u64,
    },
}

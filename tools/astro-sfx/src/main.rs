//! astro-sfx - sound effect tool for the astro-audio engine
//!
//! # Commands
//!
//! - `astro-sfx list` - Show every builtin sound with its lengths and duration
//! - `astro-sfx render <sound>` - Write the DAC stream of a sound as WAV
//! - `astro-sfx play <sound>...` - Play sounds on the audio device (`device` feature)
//! - `astro-sfx config init` - Write a config file with default values
//!
//! # Usage
//!
//! ```bash
//! astro-sfx list
//! astro-sfx render enemy-explode -o boom.wav
//! astro-sfx play player-fire enemy-explode --preempt-after-ms 30
//! RUST_LOG=astro_audio=debug astro-sfx play level-up
//! ```

mod config_cmd;
mod list;
mod play;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use astro_audio::AudioConfig;
use astro_audio::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};

/// astro-sfx - sound effect tool for the astro-audio engine
#[derive(Parser, Debug)]
#[command(name = "astro-sfx")]
#[command(about = "List, render and play single-channel DAC sound effects")]
#[command(version)]
struct Cli {
    /// Config file (missing file means defaults)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every builtin sound
    List,

    /// Write the DAC stream of one sound as an 8-bit mono WAV file
    Render(render::RenderArgs),

    /// Play sounds on the host audio device
    Play(play::PlayArgs),

    /// Manage the config file
    Config(config_cmd::ConfigArgs),
}

fn load_config(cli: &Cli) -> Result<AudioConfig> {
    astro_audio::config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::List => list::execute(),
        Commands::Render(args) => render::execute(args),
        Commands::Play(args) => play::execute(args, &load_config(&cli)?),
        Commands::Config(args) => config_cmd::execute(args, &cli.config),
    }
}

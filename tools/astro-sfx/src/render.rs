//! Render command - export a sound's DAC stream as WAV

use std::path::PathBuf;

use anyhow::{Context, Result};
use astro_audio::render::render_to_wav;
use astro_audio::{SoundId, SoundTable};
use clap::Args;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Sound to render (e.g. enemy-explode)
    pub sound: SoundId,

    /// Output WAV file (defaults to <sound>.wav)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.wav", self.sound.name())))
    }
}

/// Execute the render command
pub fn execute(args: &RenderArgs) -> Result<()> {
    let path = args.output_path();
    let count = render_to_wav(&SoundTable::builtin(), args.sound, &path)
        .with_context(|| format!("Failed to render {} to {}", args.sound, path.display()))?;

    println!("Wrote {} samples to {}", count, path.display());
    Ok(())
}

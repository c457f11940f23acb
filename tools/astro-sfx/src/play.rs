//! Play command - audition sounds on the host audio device
//!
//! Each sound is requested in turn and allowed to finish. With
//! `--preempt-after-ms` the next sound is requested early instead, so the
//! single-channel cut-off can be heard.

use anyhow::Result;
use astro_audio::{AudioConfig, SoundId};
use clap::Args;

/// Arguments for the play command
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Sounds to play, in order (e.g. player-fire enemy-explode)
    #[arg(required = true)]
    pub sounds: Vec<SoundId>,

    /// Silence between sounds in milliseconds
    #[arg(long, default_value = "250")]
    pub gap_ms: u64,

    /// Request the next sound this many milliseconds after the previous one
    /// instead of waiting for it to finish
    #[arg(long)]
    pub preempt_after_ms: Option<u64>,
}

#[cfg(feature = "device")]
pub fn execute(args: &PlayArgs, config: &AudioConfig) -> Result<()> {
    use std::time::Duration;

    use anyhow::Context;
    use astro_audio::SoundTable;
    use astro_audio::output::start_on_device;
    use tracing::{info, warn};

    let (system, output) = start_on_device(config).context("Failed to start audio output")?;
    info!(
        "Playing {} sound(s) on device at {} Hz",
        args.sounds.len(),
        output.sample_rate()
    );

    let table = SoundTable::builtin();
    let last = args.sounds.len() - 1;
    for (i, &id) in args.sounds.iter().enumerate() {
        println!("> {}", id);
        system.play(id);

        if let Some(ms) = args.preempt_after_ms.filter(|_| i < last) {
            std::thread::sleep(Duration::from_millis(ms));
            continue;
        }

        let timeout = table.get(id).nominal_duration() * 2 + Duration::from_secs(1);
        if !system.wait_until_idle(timeout) {
            warn!("{} did not finish within {:?}", id, timeout);
        }
        std::thread::sleep(Duration::from_millis(args.gap_ms));
    }

    // Let the device drain what is still queued
    let ring_latency = config.output.ring_capacity as u64 * 1000
        / u64::from(astro_audio::OUTPUT_SAMPLE_RATE);
    std::thread::sleep(Duration::from_millis(ring_latency));

    let dropped = system.shutdown().map_or(0, |sink| sink.dropped());
    if dropped > 0 {
        warn!("{} samples were dropped on a full output ring", dropped);
    }
    drop(output);
    Ok(())
}

#[cfg(not(feature = "device"))]
pub fn execute(args: &PlayArgs, _config: &AudioConfig) -> Result<()> {
    anyhow::bail!(
        "cannot play {} sound(s): astro-sfx was built without the `device` feature \
         (rebuild with `--features device`, or use `render` to write a WAV file)",
        args.sounds.len()
    )
}

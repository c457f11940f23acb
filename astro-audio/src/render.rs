//! Offline rendering
//!
//! Runs the pump without a timer to capture the exact DAC stream one
//! uninterrupted playback produces, and exports it as WAV for auditioning.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::engine::Engine;
use crate::error::{AudioError, Result};
use crate::sink::CaptureSink;
use crate::sound::SoundId;
use crate::table::SoundTable;
use crate::{OUTPUT_BIT_DEPTH, OUTPUT_SAMPLE_RATE};

/// WAV layout of the DAC stream: mono, 8-bit unsigned, 11 kHz
pub fn dac_wav_spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: OUTPUT_SAMPLE_RATE,
        bits_per_sample: u16::from(OUTPUT_BIT_DEPTH),
        sample_format: SampleFormat::Int,
    }
}

/// Every DAC value one playback of `id` writes, in tick order
pub fn render_sound(table: &SoundTable, id: SoundId) -> Vec<u8> {
    let engine = Engine::new(table.clone());
    engine.init();
    engine.play(id);

    let mut sink = CaptureSink::with_capacity(table.get(id).output_len());
    while engine.is_playing() {
        engine.tick(&mut sink);
    }
    sink.into_samples()
}

/// Write unsigned 8-bit DAC samples to a WAV file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_wav(path: &Path, samples: &[u8]) -> Result<()> {
    let mut writer = WavWriter::create(path, dac_wav_spec())?;
    for &sample in samples {
        // hound takes 8-bit samples signed and stores them offset-binary
        writer.write_sample((i16::from(sample) - 128) as i8)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read back a WAV file written by [`write_wav`]
///
/// # Errors
///
/// Returns an error if the file is unreadable or not 8-bit.
pub fn read_wav(path: &Path) -> Result<Vec<u8>> {
    let mut reader = WavReader::open(path)?;
    reader
        .samples::<i8>()
        .map(|s| {
            s.map(|v| (i16::from(v) + 128) as u8)
                .map_err(AudioError::from)
        })
        .collect()
}

/// Render `id` and write it to `path`, returning the sample count
///
/// # Errors
///
/// Returns an error if the WAV file cannot be written.
pub fn render_to_wav(table: &SoundTable, id: SoundId, path: &Path) -> Result<usize> {
    let samples = render_sound(table, id);
    write_wav(path, &samples)?;
    tracing::info!(
        "Rendered {} ({} samples, {:.3}s) to {}",
        id,
        samples.len(),
        samples.len() as f64 / f64::from(OUTPUT_SAMPLE_RATE),
        path.display()
    );
    Ok(samples.len())
}

//! List command - show the builtin sound table

use anyhow::Result;
use astro_audio::{OUTPUT_SAMPLE_RATE, SampleBuffer, SoundId, SoundTable};

/// One formatted table row
fn row(id: SoundId, buffer: &SampleBuffer) -> String {
    format!(
        "{:<16}{:>10}{:>10}{:>10}{:>10.3}s",
        id.name(),
        buffer.len(),
        buffer.output_len(),
        buffer.source_sample_rate(),
        buffer.nominal_duration().as_secs_f64()
    )
}

/// Execute the list command
pub fn execute() -> Result<()> {
    let table = SoundTable::builtin();

    println!(
        "{:<16}{:>10}{:>10}{:>10}{:>11}",
        "SOUND", "SOURCE", "OUTPUT", "RATE", "DURATION"
    );
    for (id, buffer) in table.iter() {
        println!("{}", row(id, buffer));
    }
    println!(
        "\nOutput: {} Hz, 8-bit unsigned mono, every 4th source sample",
        OUTPUT_SAMPLE_RATE
    );
    Ok(())
}

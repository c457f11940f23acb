//! astro-audio - single-channel DAC sound effect engine
//!
//! Streams compiled-in 8-bit sample tables to a one-channel DAC at a fixed
//! 11 kHz cadence, reading every fourth source sample.
//!
//! Architecture:
//! - `SoundTable` is the immutable catalog of sample buffers
//! - `Engine` owns the table and the shared playback record
//! - Game code calls `Engine::play` (or one of the per-sound wrappers)
//! - A periodic trigger calls `Engine::tick` once per output sample period,
//!   which writes at most one sample to an `OutputSink`
//! - Starting a sound always preempts whatever is playing (no mixing)
//!
//! Engine specs:
//! - 11,000 Hz output rate
//! - 4:1 flat decimation (no filtering)
//! - 8-bit unsigned mono output
//!
//! # Example
//!
//! ```
//! use astro_audio::{CaptureSink, Engine, SoundTable};
//!
//! let engine = Engine::new(SoundTable::builtin());
//! engine.init();
//! engine.play_player_fire();
//!
//! let mut sink = CaptureSink::new();
//! while engine.is_playing() {
//!     engine.tick(&mut sink);
//! }
//! assert!(!sink.samples().is_empty());
//! ```

pub mod config;
pub mod engine;
mod error;
#[cfg(feature = "device")]
pub mod output;
pub mod pump;
pub mod render;
pub mod resample;
pub mod sink;
pub mod sound;
pub mod state;
pub mod system;
pub mod table;
pub mod trigger;

pub use config::AudioConfig;
pub use engine::Engine;
pub use error::{AudioError, Result};
pub use sink::{CaptureSink, DacLatch, NullSink, OutputSink, RingSink};
pub use sound::{SampleBuffer, SoundId};
pub use state::PlaybackState;
pub use system::SoundSystem;
pub use table::SoundTable;

/// DAC output rate (periodic trigger frequency)
pub const OUTPUT_SAMPLE_RATE: u32 = 11_000;

/// Source samples consumed per output tick
pub const DECIMATION_STRIDE: usize = 4;

/// Output sample width in bits (unsigned)
pub const OUTPUT_BIT_DEPTH: u8 = 8;

/// DAC midscale, the level of a powered-but-silent output
pub const DAC_MIDSCALE: u8 = 0x80;

//! Error types for the host-side operations of the engine
//!
//! The pump and request paths never fail; everything here belongs to table
//! construction, configuration, export and device setup.

use std::path::PathBuf;

use crate::sound::SoundId;

/// Errors produced outside the real-time path
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// A sample buffer with no samples was offered to a sound table
    #[error("sound '{0}' has no samples (length must be at least 1)")]
    EmptySound(SoundId),

    /// A sample buffer with a bit depth other than 8
    #[error("sound '{sound}' is {bit_depth}-bit; only 8-bit buffers are supported")]
    UnsupportedBitDepth {
        /// Offending sound
        sound: SoundId,
        /// Declared bit depth
        bit_depth: u8,
    },

    /// A sample buffer too long for the 32-bit playback cursor
    #[error("sound '{sound}' has {len} samples; at most {} are addressable", u32::MAX)]
    SoundTooLong {
        /// Offending sound
        sound: SoundId,
        /// Sample count
        len: usize,
    },

    /// A sound name that is not part of the identifier set
    #[error("unknown sound '{0}'")]
    UnknownSound(String),

    /// Config file exists but could not be parsed
    #[error("invalid config file {path}: {source}")]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be serialized
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// WAV encoding failed
    #[error("WAV export failed: {0}")]
    Wav(#[from] hound::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Host audio device could not be opened or started
    #[error("audio device error: {0}")]
    Device(String),
}

/// Result type for host-side engine operations
pub type Result<T> = std::result::Result<T, AudioError>;

//! Sound identifiers and sample buffers

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AudioError;
use crate::{DECIMATION_STRIDE, OUTPUT_SAMPLE_RATE};

/// The closed set of sounds the game can request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SoundId {
    GameOver = 0,
    LevelUp = 1,
    PlayerFire = 2,
    EnemyFire = 3,
    PlayerExplode = 4,
    EnemyExplode = 5,
}

impl SoundId {
    /// Number of sound identifiers
    pub const COUNT: usize = 6;

    /// Every identifier, in table order
    pub const ALL: [SoundId; Self::COUNT] = [
        SoundId::GameOver,
        SoundId::LevelUp,
        SoundId::PlayerFire,
        SoundId::EnemyFire,
        SoundId::PlayerExplode,
        SoundId::EnemyExplode,
    ];

    /// Position of this sound in a `SoundTable`
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Handle stored in the playback record (0 is reserved for "no sound")
    #[inline]
    pub const fn handle(self) -> u16 {
        self as u16 + 1
    }

    /// Inverse of [`SoundId::handle`]
    #[inline]
    pub const fn from_handle(handle: u16) -> Option<SoundId> {
        match handle {
            1 => Some(SoundId::GameOver),
            2 => Some(SoundId::LevelUp),
            3 => Some(SoundId::PlayerFire),
            4 => Some(SoundId::EnemyFire),
            5 => Some(SoundId::PlayerExplode),
            6 => Some(SoundId::EnemyExplode),
            _ => None,
        }
    }

    /// Kebab-case name used by config files and the CLI
    pub const fn name(self) -> &'static str {
        match self {
            SoundId::GameOver => "game-over",
            SoundId::LevelUp => "level-up",
            SoundId::PlayerFire => "player-fire",
            SoundId::EnemyFire => "enemy-fire",
            SoundId::PlayerExplode => "player-explode",
            SoundId::EnemyExplode => "enemy-explode",
        }
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoundId {
    type Err = AudioError;

    /// Accepts kebab-case or snake_case, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        SoundId::ALL
            .into_iter()
            .find(|id| id.name() == normalized)
            .ok_or_else(|| AudioError::UnknownSound(s.to_string()))
    }
}

/// An immutable, compiled-in 8-bit sample buffer
///
/// `source_sample_rate` records how the data was authored; the pump never
/// reads it. Playback always runs at [`OUTPUT_SAMPLE_RATE`] with a stride of
/// [`DECIMATION_STRIDE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleBuffer {
    data: &'static [u8],
    bit_depth: u8,
    source_sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap 8-bit unsigned sample data
    pub const fn new(data: &'static [u8], source_sample_rate: u32) -> Self {
        Self {
            data,
            bit_depth: 8,
            source_sample_rate,
        }
    }

    /// Wrap sample data with an explicit bit depth
    ///
    /// Only 8-bit buffers are accepted by [`crate::SoundTable::new`]; this
    /// exists so asset records can be carried through unchanged and rejected
    /// there.
    pub const fn with_bit_depth(data: &'static [u8], bit_depth: u8, source_sample_rate: u32) -> Self {
        Self {
            data,
            bit_depth,
            source_sample_rate,
        }
    }

    /// Raw samples
    #[inline]
    pub const fn data(&self) -> &'static [u8] {
        self.data
    }

    /// Sample count in source-rate units (before decimation)
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub const fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub const fn source_sample_rate(&self) -> u32 {
        self.source_sample_rate
    }

    /// Number of output ticks one uninterrupted playback emits a sample on
    pub const fn output_len(&self) -> usize {
        self.data.len().div_ceil(DECIMATION_STRIDE)
    }

    /// Wall-clock length of one uninterrupted playback
    pub fn nominal_duration(&self) -> Duration {
        let micros = self.output_len() as u64 * 1_000_000 / OUTPUT_SAMPLE_RATE as u64;
        Duration::from_micros(micros)
    }
}

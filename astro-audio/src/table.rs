//! Sound asset table
//!
//! Maps every [`SoundId`] to a compiled-in [`SampleBuffer`]. The builtin
//! tables live in `assets/` as raw unsigned 8-bit files produced by the
//! offline converter.

use crate::error::{AudioError, Result};
use crate::sound::{SampleBuffer, SoundId};

const GAME_OVER: &[u8] = include_bytes!("../assets/game_over.u8");
const LEVEL_UP: &[u8] = include_bytes!("../assets/level_up.u8");
const PLAYER_FIRE: &[u8] = include_bytes!("../assets/player_fire.u8");
const ENEMY_FIRE: &[u8] = include_bytes!("../assets/enemy_fire.u8");
const PLAYER_EXPLODE: &[u8] = include_bytes!("../assets/player_explode.u8");
const ENEMY_EXPLODE: &[u8] = include_bytes!("../assets/enemy_explode.u8");

/// Authoring rate of the generated effects (4x the output rate)
const SYNTH_SOURCE_RATE: u32 = 44_000;

/// The enemy explosion was converted from a 44.1 kHz WAV and tagged 11 kHz
/// by the converter
const ENEMY_EXPLODE_SOURCE_RATE: u32 = 11_000;

const BUILTIN: [SampleBuffer; SoundId::COUNT] = [
    SampleBuffer::new(GAME_OVER, SYNTH_SOURCE_RATE),
    SampleBuffer::new(LEVEL_UP, SYNTH_SOURCE_RATE),
    SampleBuffer::new(PLAYER_FIRE, SYNTH_SOURCE_RATE),
    SampleBuffer::new(ENEMY_FIRE, SYNTH_SOURCE_RATE),
    SampleBuffer::new(PLAYER_EXPLODE, SYNTH_SOURCE_RATE),
    SampleBuffer::new(ENEMY_EXPLODE, ENEMY_EXPLODE_SOURCE_RATE),
];

// A zero-length builtin asset is a build defect, not a runtime condition.
const _: () = {
    let mut i = 0;
    while i < BUILTIN.len() {
        assert!(!BUILTIN[i].is_empty(), "builtin sound table contains an empty buffer");
        i += 1;
    }
};

/// Immutable catalog of sample buffers, one per [`SoundId`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundTable {
    buffers: [SampleBuffer; SoundId::COUNT],
}

impl SoundTable {
    /// The compiled-in asset set
    pub const fn builtin() -> Self {
        Self { buffers: BUILTIN }
    }

    /// Build a table from custom buffers, indexed by [`SoundId::index`]
    ///
    /// # Errors
    ///
    /// Rejects empty buffers, buffers that are not 8-bit and buffers longer
    /// than the playback cursor can address.
    pub fn new(buffers: [SampleBuffer; SoundId::COUNT]) -> Result<Self> {
        for id in SoundId::ALL {
            let buffer = &buffers[id.index()];
            if buffer.bit_depth() != 8 {
                return Err(AudioError::UnsupportedBitDepth {
                    sound: id,
                    bit_depth: buffer.bit_depth(),
                });
            }
            if buffer.is_empty() {
                return Err(AudioError::EmptySound(id));
            }
            if u32::try_from(buffer.len()).is_err() {
                return Err(AudioError::SoundTooLong {
                    sound: id,
                    len: buffer.len(),
                });
            }
        }
        Ok(Self { buffers })
    }

    /// Build a table where every sound uses the same buffer
    pub fn uniform(buffer: SampleBuffer) -> Result<Self> {
        Self::new([buffer; SoundId::COUNT])
    }

    /// Replace one entry, re-validating it
    pub fn with_sound(mut self, id: SoundId, buffer: SampleBuffer) -> Result<Self> {
        self.buffers[id.index()] = buffer;
        Self::new(self.buffers)
    }

    /// Buffer for a sound
    #[inline]
    pub fn get(&self, id: SoundId) -> &SampleBuffer {
        &self.buffers[id.index()]
    }

    /// All entries in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (SoundId, &SampleBuffer)> {
        SoundId::ALL.into_iter().zip(self.buffers.iter())
    }
}

impl Default for SoundTable {
    fn default() -> Self {
        Self::builtin()
    }
}

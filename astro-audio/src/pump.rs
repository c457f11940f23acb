//! Periodic sample pump
//!
//! One call to [`advance`] is one tick of the DAC timer: emit the sample under
//! the cursor, then step the cursor by [`DECIMATION_STRIDE`]. When the step
//! would leave the buffer the record goes idle in the same tick, so the last
//! 1-3 samples of a buffer whose length is not a multiple of the stride are
//! dropped instead of over-read.
//!
//! The function is pure; [`crate::Engine::tick`] takes care of publishing the
//! successor record and feeding the sink.

use crate::DECIMATION_STRIDE;
use crate::sound::SampleBuffer;
use crate::state::PlaybackState;
use crate::table::SoundTable;

/// Result of one pump tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PumpStep {
    /// Sample for the DAC, `None` when idle
    pub sample: Option<u8>,
    /// Record after this tick
    pub next: PlaybackState,
}

impl PumpStep {
    #[inline]
    const fn idle(next: PlaybackState) -> Self {
        Self { sample: None, next }
    }
}

/// Advance playback by one output tick
#[inline]
pub fn advance(state: PlaybackState, table: &SoundTable) -> PumpStep {
    if !state.is_active() {
        return PumpStep::idle(state);
    }

    let Some(id) = state.active_sound() else {
        debug_assert!(false, "playback record holds unknown handle {}", state.sound);
        return PumpStep::idle(PlaybackState::stopped(state.request_seq));
    };

    let data = table.get(id).data();
    let Some(&sample) = data.get(state.cursor()) else {
        // Unreachable while the record invariant holds
        return PumpStep::idle(PlaybackState::stopped(state.request_seq));
    };

    let next_cursor = state.cursor() + DECIMATION_STRIDE;
    let next = if next_cursor < data.len() {
        PlaybackState {
            cursor: next_cursor as u32,
            ..state
        }
    } else {
        PlaybackState::stopped(state.request_seq)
    };

    PumpStep {
        sample: Some(sample),
        next,
    }
}

/// Every sample one uninterrupted playback of `buffer` emits, in order
pub fn decimated(buffer: &SampleBuffer) -> impl Iterator<Item = u8> + '_ {
    buffer.data().iter().copied().step_by(DECIMATION_STRIDE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::SoundId;

    static RAMP: [u8; 16] = [
        0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e,
        0x1f,
    ];

    fn ramp_table() -> SoundTable {
        SoundTable::uniform(SampleBuffer::new(&RAMP, 44_000)).unwrap()
    }

    fn run_until_idle(mut state: PlaybackState, table: &SoundTable) -> Vec<u8> {
        let mut out = Vec::new();
        while state.is_active() {
            let step = advance(state, table);
            out.extend(step.sample);
            state = step.next;
        }
        out
    }

    #[test]
    fn test_idle_emits_nothing_and_keeps_state() {
        let table = ramp_table();
        let state = PlaybackState::stopped(9);
        let step = advance(state, &table);
        assert_eq!(step.sample, None);
        assert_eq!(step.next, state);
    }

    #[test]
    fn test_every_fourth_sample() {
        let table = ramp_table();
        let out = run_until_idle(PlaybackState::start(SoundId::LevelUp, 1), &table);
        assert_eq!(out, vec![0x10, 0x14, 0x18, 0x1c]);
    }

    #[test]
    fn test_last_sample_clears_selection_in_same_tick() {
        let table = ramp_table();
        let state = PlaybackState {
            cursor: 12,
            ..PlaybackState::start(SoundId::GameOver, 3)
        };
        let step = advance(state, &table);
        assert_eq!(step.sample, Some(0x1c));
        assert!(!step.next.is_active());
        assert_eq!(step.next.cursor(), 0);
        assert_eq!(step.next.request_seq, 3);
    }

    #[test]
    fn test_cursor_advances_by_stride() {
        let table = ramp_table();
        let step = advance(PlaybackState::start(SoundId::EnemyFire, 1), &table);
        assert_eq!(step.next.cursor(), DECIMATION_STRIDE);
        assert!(step.next.is_active());
    }

    #[test]
    fn test_out_of_range_cursor_is_treated_as_exhausted() {
        let table = ramp_table();
        let bogus = PlaybackState {
            cursor: 400,
            ..PlaybackState::start(SoundId::EnemyFire, 1)
        };
        let step = advance(bogus, &table);
        assert_eq!(step.sample, None);
        assert!(!step.next.is_active());
    }

    #[test]
    fn test_decimated_matches_pump() {
        let table = SoundTable::builtin();
        for (id, buffer) in table.iter() {
            let pumped = run_until_idle(PlaybackState::start(id, 1), &table);
            let expected: Vec<u8> = decimated(buffer).collect();
            assert_eq!(pumped, expected, "{id}");
            assert_eq!(pumped.len(), buffer.output_len(), "{id}");
        }
    }
}

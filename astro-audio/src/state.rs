//! Shared playback record
//!
//! The whole playback state fits in one 8-byte POD record so that both the
//! request path and the pump can replace it with a single atomic operation.
//! No lock is ever taken and neither side can observe a half-written record.

use std::sync::atomic::{AtomicU16, AtomicU64, Ordering};

use bytemuck::{Pod, Zeroable};

use crate::sound::SoundId;
use crate::table::SoundTable;

/// Playback record (8 bytes, POD)
///
/// `sound == 0` means idle. While a sound is selected `cursor` is always a
/// valid index into its buffer; the pump clears `sound` in the same step
/// that would move `cursor` past the end.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct PlaybackState {
    /// Sound handle (0 = idle, see [`SoundId::handle`])
    pub sound: u16,
    /// Bumped by every request so two otherwise identical records differ
    pub request_seq: u16,
    /// Next source sample to emit
    pub cursor: u32,
}

impl PlaybackState {
    /// Nothing selected
    pub const IDLE: Self = Self {
        sound: 0,
        request_seq: 0,
        cursor: 0,
    };

    /// Freshly requested sound, positioned at its first sample
    #[inline]
    pub const fn start(id: SoundId, request_seq: u16) -> Self {
        Self {
            sound: id.handle(),
            request_seq,
            cursor: 0,
        }
    }

    /// Idle record carrying a request sequence number
    #[inline]
    pub const fn stopped(request_seq: u16) -> Self {
        Self {
            sound: 0,
            request_seq,
            cursor: 0,
        }
    }

    /// True while a buffer is selected and not exhausted
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.sound != 0
    }

    /// Currently selected sound
    #[inline]
    pub const fn active_sound(&self) -> Option<SoundId> {
        SoundId::from_handle(self.sound)
    }

    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor as usize
    }

    /// Checks `is_active <=> (buffer selected && cursor < len)` against a table
    pub fn holds_invariant(&self, table: &SoundTable) -> bool {
        match self.active_sound() {
            Some(id) => self.cursor() < table.get(id).len(),
            None => self.sound == 0 && self.cursor == 0,
        }
    }

    #[inline]
    fn to_bits(self) -> u64 {
        bytemuck::cast(self)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        bytemuck::cast(bits)
    }
}

/// Atomic home of the [`PlaybackState`] shared by the request and pump contexts
#[derive(Debug)]
pub struct PlaybackCell {
    word: AtomicU64,
    next_seq: AtomicU16,
}

impl PlaybackCell {
    pub const fn new() -> Self {
        Self {
            word: AtomicU64::new(0),
            next_seq: AtomicU16::new(1),
        }
    }

    /// Current record
    #[inline]
    pub fn load(&self) -> PlaybackState {
        PlaybackState::from_bits(self.word.load(Ordering::Acquire))
    }

    /// Switch to `id` at cursor 0, replacing whatever was selected
    #[inline]
    pub fn request(&self, id: SoundId) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.word
            .store(PlaybackState::start(id, seq).to_bits(), Ordering::Release);
    }

    /// Deselect any sound
    #[inline]
    pub fn stop(&self) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.word
            .store(PlaybackState::stopped(seq).to_bits(), Ordering::Release);
    }

    /// Unconditionally reset to idle (initialization only)
    pub fn reset(&self) {
        self.word.store(PlaybackState::IDLE.to_bits(), Ordering::Release);
    }

    /// Replace `current` with `next` unless a request landed in between
    ///
    /// Returns false when the record no longer equals `current`; the newer
    /// record is left in place.
    #[inline]
    pub fn commit(&self, current: PlaybackState, next: PlaybackState) -> bool {
        self.word
            .compare_exchange(
                current.to_bits(),
                next.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

impl Default for PlaybackCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_state_size() {
        // Must fit a single AtomicU64
        assert_eq!(std::mem::size_of::<PlaybackState>(), 8);
    }

    #[test]
    fn test_bits_round_trip() {
        let state = PlaybackState {
            sound: SoundId::EnemyFire.handle(),
            request_seq: 0xBEEF,
            cursor: 1234,
        };
        assert_eq!(PlaybackState::from_bits(state.to_bits()), state);
    }

    #[test]
    fn test_default_is_idle() {
        let cell = PlaybackCell::new();
        assert_eq!(cell.load(), PlaybackState::IDLE);
        assert!(!cell.load().is_active());
        assert_eq!(PlaybackState::default(), PlaybackState::IDLE);
    }

    #[test]
    fn test_request_selects_sound_at_cursor_zero() {
        let cell = PlaybackCell::new();
        cell.request(SoundId::LevelUp);
        let state = cell.load();
        assert!(state.is_active());
        assert_eq!(state.active_sound(), Some(SoundId::LevelUp));
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_repeated_request_changes_record() {
        let cell = PlaybackCell::new();
        cell.request(SoundId::PlayerFire);
        let first = cell.load();
        cell.request(SoundId::PlayerFire);
        let second = cell.load();
        assert_ne!(first, second);
        assert_eq!(first.active_sound(), second.active_sound());
    }

    #[test]
    fn test_commit_loses_to_request() {
        let cell = PlaybackCell::new();
        cell.request(SoundId::PlayerFire);
        let seen = cell.load();

        // A request lands while the pump is between load and commit
        cell.request(SoundId::EnemyExplode);

        let advanced = PlaybackState { cursor: 4, ..seen };
        assert!(!cell.commit(seen, advanced));
        assert_eq!(cell.load().active_sound(), Some(SoundId::EnemyExplode));
        assert_eq!(cell.load().cursor(), 0);
    }

    #[test]
    fn test_commit_applies_when_unchanged() {
        let cell = PlaybackCell::new();
        cell.request(SoundId::PlayerFire);
        let seen = cell.load();
        let advanced = PlaybackState { cursor: 4, ..seen };
        assert!(cell.commit(seen, advanced));
        assert_eq!(cell.load(), advanced);
    }

    #[test]
    fn test_stop_clears_selection() {
        let cell = PlaybackCell::new();
        cell.request(SoundId::GameOver);
        cell.stop();
        let state = cell.load();
        assert!(!state.is_active());
        assert_eq!(state.active_sound(), None);
        assert!(state.holds_invariant(&SoundTable::builtin()));
    }
}

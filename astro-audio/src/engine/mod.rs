//! Sound engine: request API and pump entry point
//!
//! The engine owns the [`SoundTable`] and the shared [`PlaybackCell`]. Game
//! code calls [`Engine::play`] from any thread; the periodic trigger calls
//! [`Engine::tick`]. Both paths are wait-free.
//!
//! Playback is preemptive and single-channel: a request always replaces the
//! sound in progress, even when it is the same sound, and nothing is queued.
//! A rapid-fire shot therefore cuts off an explosion that is still playing.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::pump;
use crate::sink::OutputSink;
use crate::sound::SoundId;
use crate::state::{PlaybackCell, PlaybackState};
use crate::table::SoundTable;


/// Single-channel sample playback engine
#[derive(Debug)]
pub struct Engine {
    table: SoundTable,
    cell: PlaybackCell,
    initialized: AtomicBool,
}

impl Engine {
    /// Create an engine over `table`
    ///
    /// The engine is not usable until [`Engine::init`] has been called.
    pub fn new(table: SoundTable) -> Self {
        Self {
            table,
            cell: PlaybackCell::new(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Reset playback to idle and accept requests from now on
    ///
    /// # Panics
    ///
    /// Panics when called more than once.
    pub fn init(&self) {
        assert!(
            !self.initialized.load(Ordering::Acquire),
            "sound engine initialized twice"
        );
        self.cell.reset();
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            panic!("sound engine initialized twice");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Start `id` from its first sample, cancelling whatever is playing
    ///
    /// Takes effect no later than the next tick that begins after this call
    /// returns.
    ///
    /// # Panics
    ///
    /// Panics when the engine has not been initialized.
    #[inline]
    pub fn play(&self, id: SoundId) {
        assert!(
            self.is_initialized(),
            "play({id}) called before the sound engine was initialized"
        );
        self.cell.request(id);
    }

    /// Silence the channel without starting a new sound
    ///
    /// # Panics
    ///
    /// Panics when the engine has not been initialized.
    #[inline]
    pub fn stop(&self) {
        assert!(
            self.is_initialized(),
            "stop() called before the sound engine was initialized"
        );
        self.cell.stop();
    }

    pub fn play_game_over(&self) {
        self.play(SoundId::GameOver);
    }

    pub fn play_level_up(&self) {
        self.play(SoundId::LevelUp);
    }

    pub fn play_player_fire(&self) {
        self.play(SoundId::PlayerFire);
    }

    pub fn play_enemy_fire(&self) {
        self.play(SoundId::EnemyFire);
    }

    pub fn play_player_explode(&self) {
        self.play(SoundId::PlayerExplode);
    }

    pub fn play_enemy_explode(&self) {
        self.play(SoundId::EnemyExplode);
    }

    /// Run one pump tick: emit at most one sample into `sink`
    ///
    /// Returns the emitted sample. If a request lands while the tick is
    /// running, the request wins and this tick's successor record is thrown
    /// away; the sample already taken belongs to the record the tick started
    /// with.
    #[inline]
    pub fn tick<S: OutputSink + ?Sized>(&self, sink: &mut S) -> Option<u8> {
        let current = self.cell.load();
        let step = pump::advance(current, &self.table);

        if step.next != current {
            // false means a request replaced `current`; it stays in place
            let _ = self.cell.commit(current, step.next);
        }

        match step.sample {
            Some(sample) => sink.write(sample),
            None => sink.idle(),
        }
        step.sample
    }

    /// Copy of the playback record
    #[inline]
    pub fn snapshot(&self) -> PlaybackState {
        self.cell.load()
    }

    /// True while a sound is selected and not exhausted
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.cell.load().is_active()
    }

    /// Sound currently selected, if any
    #[inline]
    pub fn now_playing(&self) -> Option<SoundId> {
        self.cell.load().active_sound()
    }

    pub fn table(&self) -> &SoundTable {
        &self.table
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SoundTable::builtin())
    }
}

//! Sound system: engine, periodic trigger and sink wired together
//!
//! This is the host initialization entry point. It creates the engine,
//! initializes it, and arms the trigger thread that drives the sink.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::OUTPUT_SAMPLE_RATE;
use crate::config::AudioConfig;
use crate::engine::Engine;
use crate::error::Result;
use crate::sink::OutputSink;
use crate::sound::SoundId;
use crate::table::SoundTable;
use crate::trigger::{PumpHandle, PumpThread};

/// Poll step of [`SoundSystem::wait_until_idle`]
const IDLE_POLL: Duration = Duration::from_millis(1);

/// Running sound system
///
/// Dropping it stops the trigger thread.
pub struct SoundSystem<S> {
    engine: Arc<Engine>,
    pump: PumpHandle<S>,
}

impl<S: OutputSink + Send + 'static> SoundSystem<S> {
    /// Start the builtin sound set on `sink`
    ///
    /// # Errors
    ///
    /// Returns an error if the trigger thread cannot be spawned.
    pub fn start(config: &AudioConfig, sink: S) -> Result<Self> {
        Self::with_table(SoundTable::builtin(), config, sink)
    }

    /// Start a custom sound table on `sink`
    ///
    /// # Errors
    ///
    /// Returns an error if the trigger thread cannot be spawned.
    pub fn with_table(table: SoundTable, config: &AudioConfig, sink: S) -> Result<Self> {
        let engine = Arc::new(Engine::new(table));
        engine.init();

        let pump = PumpThread::spawn(Arc::clone(&engine), sink, &config.trigger)?;
        info!(
            "Sound system started: {} Hz on thread '{}'",
            OUTPUT_SAMPLE_RATE, config.trigger.thread_name
        );

        Ok(Self { engine, pump })
    }

    /// Stop the trigger thread and take the sink back
    pub fn shutdown(self) -> Option<S> {
        self.pump.shutdown()
    }
}

impl<S> SoundSystem<S> {
    #[inline]
    pub fn play(&self, id: SoundId) {
        self.engine.play(id);
    }

    #[inline]
    pub fn stop(&self) {
        self.engine.stop();
    }

    pub fn play_game_over(&self) {
        self.engine.play_game_over();
    }

    pub fn play_level_up(&self) {
        self.engine.play_level_up();
    }

    pub fn play_player_fire(&self) {
        self.engine.play_player_fire();
    }

    pub fn play_enemy_fire(&self) {
        self.engine.play_enemy_fire();
    }

    pub fn play_player_explode(&self) {
        self.engine.play_player_explode();
    }

    pub fn play_enemy_explode(&self) {
        self.engine.play_enemy_explode();
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn now_playing(&self) -> Option<SoundId> {
        self.engine.now_playing()
    }

    /// Block the calling thread until playback ends or `timeout` passes
    ///
    /// Returns true when the engine went idle in time. Not for use on a
    /// real-time thread.
    pub fn wait_until_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.engine.is_playing() {
            if !self.pump.is_alive() || Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(IDLE_POLL);
        }
        true
    }

    /// Shared engine, for handing the request API to other threads
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn pump(&self) -> &PumpHandle<S> {
        &self.pump
    }
}

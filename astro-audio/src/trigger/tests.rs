use super::*;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use crate::config::TriggerConfig;
use crate::pump::decimated;
use crate::sink::{CaptureSink, OutputSink};
use crate::sound::SoundId;
use crate::{Engine, OUTPUT_SAMPLE_RATE};

fn started_engine() -> Arc<Engine> {
    let engine = Arc::new(Engine::default());
    engine.init();
    engine
}

fn quiet_config() -> TriggerConfig {
    TriggerConfig {
        thread_name: "astro-pump-test".to_string(),
        metrics: false,
        ..TriggerConfig::default()
    }
}

#[test]
fn test_ticks_due_at_output_rate() {
    assert_eq!(ticks_due(Duration::ZERO), 0);
    assert_eq!(ticks_due(Duration::from_secs(1)), u64::from(OUTPUT_SAMPLE_RATE));
    assert_eq!(ticks_due(Duration::from_millis(100)), 1100);
    // One period is 90.9 µs
    assert_eq!(ticks_due(Duration::from_micros(90)), 0);
    assert_eq!(ticks_due(Duration::from_micros(91)), 1);
}

/// Records the name of the thread that drives it
#[derive(Default)]
struct ThreadNameSink {
    name: Option<String>,
}

impl OutputSink for ThreadNameSink {
    fn write(&mut self, _sample: u8) {}

    fn idle(&mut self) {
        if self.name.is_none() {
            self.name = std::thread::current().name().map(str::to_string);
        }
    }
}

#[test]
fn test_thread_is_named_and_alive() {
    let engine = started_engine();
    let handle = PumpThread::spawn(engine, ThreadNameSink::default(), &quiet_config()).unwrap();
    assert!(handle.is_alive());
    std::thread::sleep(Duration::from_millis(20));

    let sink = handle.shutdown().unwrap();
    assert_eq!(sink.name.as_deref(), Some("astro-pump-test"));
}

#[test]
fn test_tick_rate_matches_clock() {
    let engine = started_engine();
    let started = Instant::now();
    let handle = PumpThread::spawn(engine, CaptureSink::new(), &quiet_config()).unwrap();

    std::thread::sleep(Duration::from_millis(200));
    let delivered = handle.ticks() + handle.late_ticks();
    let sink = handle.shutdown().unwrap();
    let upper = ticks_due(started.elapsed()) + 1;

    // Generous lower bound for loaded CI machines
    assert!(delivered >= 1100, "only {delivered} ticks in 200 ms");
    assert!(delivered <= upper, "{delivered} ticks exceed {upper}");
    assert!(sink.samples().is_empty());
    assert!(sink.idle_ticks() > 0);
}

#[test]
fn test_thread_plays_requested_sound_in_full() {
    let engine = started_engine();
    let handle = PumpThread::spawn(Arc::clone(&engine), CaptureSink::new(), &quiet_config()).unwrap();

    engine.play_player_fire();
    let deadline = Instant::now() + Duration::from_secs(5);
    while engine.is_playing() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(!engine.is_playing(), "player fire never finished");

    let sink = handle.shutdown().unwrap();
    let expected: Vec<u8> = decimated(engine.table().get(SoundId::PlayerFire)).collect();
    assert_eq!(sink.samples(), expected.as_slice());
}

#[test]
fn test_drop_stops_thread() {
    let engine = started_engine();
    let handle = PumpThread::spawn(Arc::clone(&engine), CaptureSink::new(), &quiet_config()).unwrap();
    std::thread::sleep(Duration::from_millis(10));
    drop(handle);

    // The thread held the only other reference to the engine
    assert_eq!(Arc::strong_count(&engine), 1);
}

fn detached_pump(config: &TriggerConfig) -> PumpThread<CaptureSink> {
    let (_tx, rx) = std::sync::mpsc::channel();
    PumpThread::new(rx, started_engine(), CaptureSink::new(), config)
}

#[test]
fn test_stall_is_caught_up_to_cap() {
    let config = TriggerConfig {
        max_catch_up_ticks: 200,
        ..quiet_config()
    };
    let mut pump = detached_pump(&config);
    pump.start -= Duration::from_millis(100);
    pump.run_due_ticks();

    // At least 1100 ticks were due; 200 ran and the rest were skipped
    let ran = pump.ticks.load(Ordering::Relaxed);
    let late = pump.late.load(Ordering::Relaxed);
    assert_eq!(ran, 200);
    assert!(late >= 900);
    assert_eq!(pump.accounted, ran + late);
    assert_eq!(pump.sink.idle_ticks(), 200);
}

#[test]
fn test_short_delay_is_fully_caught_up() {
    let mut pump = detached_pump(&quiet_config());
    pump.start -= Duration::from_millis(10);
    pump.run_due_ticks();

    assert!(pump.ticks.load(Ordering::Relaxed) >= 110);
    assert_eq!(pump.late.load(Ordering::Relaxed), 0);

    // Nothing new is due immediately afterwards
    let before = pump.accounted;
    pump.run_due_ticks();
    assert!(pump.accounted - before <= 2);
}

#[test]
fn test_late_ticks_do_not_advance_playback() {
    let config = TriggerConfig {
        max_catch_up_ticks: 3,
        ..quiet_config()
    };
    let mut pump = detached_pump(&config);
    pump.engine.play_enemy_explode();
    pump.start -= Duration::from_millis(50);
    pump.run_due_ticks();

    assert_eq!(pump.sink.samples().len(), 3);
    assert_eq!(pump.engine.snapshot().cursor(), 12);
}

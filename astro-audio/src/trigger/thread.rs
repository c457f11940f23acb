//! Pump thread implementation

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::OUTPUT_SAMPLE_RATE;
use crate::config::TriggerConfig;
use crate::engine::Engine;
use crate::error::Result;
use crate::sink::OutputSink;

use super::handle::PumpHandle;
use super::metrics::PumpMetrics;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Number of output ticks that fall in `elapsed` at the fixed output rate
pub fn ticks_due(elapsed: Duration) -> u64 {
    (elapsed.as_nanos() * OUTPUT_SAMPLE_RATE as u128 / NANOS_PER_SEC) as u64
}

/// Time from the start of the clock at which tick number `tick` is due
fn tick_deadline(tick: u64) -> Duration {
    let nanos = tick as u128 * NANOS_PER_SEC / OUTPUT_SAMPLE_RATE as u128;
    Duration::from_nanos(nanos as u64)
}

/// Pump thread state
pub struct PumpThread<S> {
    /// Disconnect is the only signal; nothing is ever sent
    rx: mpsc::Receiver<()>,

    pub(super) engine: Arc<Engine>,

    pub(super) sink: S,

    /// Clock origin for tick deadlines
    pub(super) start: Instant,

    /// Ticks accounted for since `start`, run or skipped
    pub(super) accounted: u64,

    max_catch_up_ticks: u64,
    poll_interval: Duration,
    log_metrics: bool,

    /// Counters shared with the handle
    pub(super) ticks: Arc<AtomicU64>,
    pub(super) late: Arc<AtomicU64>,

    metrics: PumpMetrics,
}

impl<S: OutputSink + Send + 'static> PumpThread<S> {
    /// Spawn the pump thread
    ///
    /// The thread owns `sink` and gives it back through
    /// [`PumpHandle::shutdown`].
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to create the thread.
    pub fn spawn(engine: Arc<Engine>, sink: S, config: &TriggerConfig) -> Result<PumpHandle<S>> {
        let (tx, rx) = mpsc::channel::<()>();
        let pump = Self::new(rx, engine, sink, config);
        let ticks = Arc::clone(&pump.ticks);
        let late = Arc::clone(&pump.late);

        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || pump.run())?;

        Ok(PumpHandle {
            tx: Some(tx),
            handle: Some(handle),
            ticks,
            late,
        })
    }

    pub(super) fn new(
        rx: mpsc::Receiver<()>,
        engine: Arc<Engine>,
        sink: S,
        config: &TriggerConfig,
    ) -> Self {
        Self {
            rx,
            engine,
            sink,
            start: Instant::now(),
            accounted: 0,
            max_catch_up_ticks: u64::from(config.max_catch_up_ticks.max(1)),
            poll_interval: config.poll_interval(),
            log_metrics: config.metrics,
            ticks: Arc::new(AtomicU64::new(0)),
            late: Arc::new(AtomicU64::new(0)),
            metrics: PumpMetrics::new(),
        }
    }

    /// Main thread loop
    fn run(mut self) -> S {
        debug!("Pump thread started ({} Hz)", OUTPUT_SAMPLE_RATE);
        self.start = Instant::now();

        loop {
            // 1. Run every tick that came due since the last wake-up
            self.run_due_ticks();

            if self.log_metrics {
                self.metrics.maybe_log();
            }

            // 2. Sleep until the next tick is due, bounded by the poll interval
            let next = tick_deadline(self.accounted + 1);
            let wait = next
                .saturating_sub(self.start.elapsed())
                .min(self.poll_interval);
            match self.rx.recv_timeout(wait) {
                Ok(()) | Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    debug!("Pump thread exiting (channel disconnected)");
                    break;
                }
            }
        }

        debug!(
            "Pump thread finished: {} ticks, {} late",
            self.ticks.load(Ordering::Relaxed),
            self.late.load(Ordering::Relaxed)
        );
        self.sink
    }

    pub(super) fn run_due_ticks(&mut self) {
        let due = ticks_due(self.start.elapsed());
        let mut pending = due.saturating_sub(self.accounted);

        if pending > self.max_catch_up_ticks {
            let skipped = pending - self.max_catch_up_ticks;
            self.accounted += skipped;
            self.metrics.late_ticks += skipped;
            self.late.fetch_add(skipped, Ordering::Relaxed);
            warn!(
                "Pump thread fell behind by {} ticks, skipping {}",
                pending, skipped
            );
            pending = self.max_catch_up_ticks;
        }

        let mut sounding = 0;
        for _ in 0..pending {
            if self.engine.tick(&mut self.sink).is_some() {
                sounding += 1;
            }
        }

        self.accounted += pending;
        self.ticks.fetch_add(pending, Ordering::Relaxed);
        self.metrics.record_batch(pending, sounding);
        if pending > 0 {
            trace!("Ran {} ticks ({} sounding)", pending, sounding);
        }
    }
}

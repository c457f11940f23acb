//! Pump thread health monitoring

use std::time::Instant;

use tracing::debug;

/// Per-interval pump counters, logged and reset once per second
#[derive(Debug, Clone)]
pub(super) struct PumpMetrics {
    /// Ticks that produced a sample
    pub sample_ticks: u64,
    /// Ticks that found the engine idle
    pub idle_ticks: u64,
    /// Ticks skipped because the thread fell too far behind
    pub late_ticks: u64,
    /// Wake-ups that ran at least one tick
    pub batches: u64,
    /// Largest number of ticks run in one wake-up
    pub max_batch: u64,
    /// Timestamp of last metrics log
    pub last_log_time: Instant,
}

impl PumpMetrics {
    pub fn new() -> Self {
        Self {
            sample_ticks: 0,
            idle_ticks: 0,
            late_ticks: 0,
            batches: 0,
            max_batch: 0,
            last_log_time: Instant::now(),
        }
    }

    /// Record one wake-up that ran `ran` ticks, `sounding` of them with a sample
    pub fn record_batch(&mut self, ran: u64, sounding: u64) {
        if ran == 0 {
            return;
        }
        self.batches += 1;
        self.max_batch = self.max_batch.max(ran);
        self.sample_ticks += sounding;
        self.idle_ticks += ran - sounding;
    }

    /// Log metrics if enough time has passed (every 1 second)
    pub fn maybe_log(&mut self) {
        if self.last_log_time.elapsed().as_secs() < 1 {
            return;
        }

        let ticks = self.sample_ticks + self.idle_ticks;
        let avg_batch = if self.batches > 0 {
            ticks as f64 / self.batches as f64
        } else {
            0.0
        };
        debug!(
            "PUMP METRICS [tid={:?}]: ticks={} (sounding={}, idle={}), late={}, \
             batches={}, avg_batch={:.1}, max_batch={}",
            std::thread::current().id(),
            ticks,
            self.sample_ticks,
            self.idle_ticks,
            self.late_ticks,
            self.batches,
            avg_batch,
            self.max_batch
        );

        // Reset counters for next interval (show per-second rates)
        self.sample_ticks = 0;
        self.idle_ticks = 0;
        self.late_ticks = 0;
        self.batches = 0;
        self.max_batch = 0;
        self.last_log_time = Instant::now();
    }
}

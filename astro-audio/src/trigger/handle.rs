//! Pump thread handle
//!
//! Owns the pump thread's lifetime: dropping the handle stops the thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use tracing::warn;

/// Handle to a running pump thread
///
/// Returned from [`PumpThread::spawn`](super::PumpThread::spawn). The thread
/// runs until the handle is dropped or [`PumpHandle::shutdown`] is called.
pub struct PumpHandle<S> {
    /// Control channel (Option to allow explicit drop before join)
    pub(super) tx: Option<Sender<()>>,

    /// Thread join handle; the thread hands its sink back on exit
    pub(super) handle: Option<JoinHandle<S>>,

    /// Ticks run since spawn, published by the thread
    pub(super) ticks: Arc<AtomicU64>,

    /// Ticks skipped since spawn, published by the thread
    pub(super) late: Arc<AtomicU64>,
}

impl<S> PumpHandle<S> {
    /// Check if the pump thread is still running
    pub fn is_alive(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Total ticks delivered to the engine so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Total ticks skipped after stalls so far
    pub fn late_ticks(&self) -> u64 {
        self.late.load(Ordering::Relaxed)
    }

    /// Stop the thread and take its sink back
    ///
    /// Returns `None` if the thread panicked.
    pub fn shutdown(mut self) -> Option<S> {
        self.stop()
    }

    fn stop(&mut self) -> Option<S> {
        // Drop the sender first: the thread's recv_timeout() returns
        // Disconnected and the loop ends. Joining first would deadlock.
        drop(self.tx.take());

        let handle = self.handle.take()?;
        match handle.join() {
            Ok(sink) => Some(sink),
            Err(_) => {
                warn!("pump thread panicked");
                None
            }
        }
    }
}

impl<S> Drop for PumpHandle<S> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

//! Output sinks
//!
//! An [`OutputSink`] stands in for the DAC data register. The pump calls
//! [`OutputSink::write`] on every tick that has a sample and
//! [`OutputSink::idle`] on every tick that does not. Implementations run in
//! the periodic context and must return promptly: no blocking, no waiting on
//! locks, no unbounded work.

use ringbuf::HeapProd;
use ringbuf::traits::{Observer, Producer};

use crate::DAC_MIDSCALE;

/// Destination for one 8-bit sample per pump tick
pub trait OutputSink {
    /// Latch one sample
    fn write(&mut self, sample: u8);

    /// A tick passed with nothing playing
    #[inline]
    fn idle(&mut self) {}
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    #[inline]
    fn write(&mut self, sample: u8) {
        (**self).write(sample);
    }

    #[inline]
    fn idle(&mut self) {
        (**self).idle();
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    #[inline]
    fn write(&mut self, sample: u8) {
        (**self).write(sample);
    }

    #[inline]
    fn idle(&mut self) {
        (**self).idle();
    }
}

/// Discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    #[inline]
    fn write(&mut self, _sample: u8) {}
}

/// The DAC data register: holds the last written value
///
/// Powers up at midscale. Idle ticks leave the level untouched, like a
/// stopped timer leaves the real converter.
#[derive(Clone, Copy, Debug)]
pub struct DacLatch {
    value: u8,
    writes: u64,
}

impl DacLatch {
    pub fn new() -> Self {
        Self {
            value: DAC_MIDSCALE,
            writes: 0,
        }
    }

    /// Current output level
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Number of samples latched since power-up
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Output level as signed 16-bit PCM (0x00 -> -32768, 0x80 -> 0)
    pub fn sample_i16(&self) -> i16 {
        (self.value as i16 - 128) * 256
    }
}

impl Default for DacLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for DacLatch {
    #[inline]
    fn write(&mut self, sample: u8) {
        self.value = sample;
        self.writes += 1;
    }
}

/// Records every write
///
/// Used by tests and offline rendering. Grows without bound, so keep it out
/// of real-time contexts.
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    samples: Vec<u8>,
    idle_ticks: u64,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            idle_ticks: 0,
        }
    }

    /// Samples written so far, in tick order
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Ticks that passed without a sample
    pub fn idle_ticks(&self) -> u64 {
        self.idle_ticks
    }

    /// Most recent sample, if any
    pub fn last(&self) -> Option<u8> {
        self.samples.last().copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.idle_ticks = 0;
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

impl OutputSink for CaptureSink {
    #[inline]
    fn write(&mut self, sample: u8) {
        self.samples.push(sample);
    }

    #[inline]
    fn idle(&mut self) {
        self.idle_ticks += 1;
    }
}

/// Feeds a ring buffer drained by another thread (e.g. an audio device callback)
///
/// A full ring drops the sample and counts it; the pump never waits for the
/// consumer.
pub struct RingSink {
    producer: HeapProd<u8>,
    dropped: u64,
}

impl RingSink {
    pub fn new(producer: HeapProd<u8>) -> Self {
        Self {
            producer,
            dropped: 0,
        }
    }

    /// Samples lost to a full ring
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Samples waiting for the consumer
    pub fn queued(&self) -> usize {
        self.producer.occupied_len()
    }
}

impl OutputSink for RingSink {
    #[inline]
    fn write(&mut self, sample: u8) {
        if self.producer.try_push(sample).is_err() {
            self.dropped += 1;
            tracing::trace!(dropped = self.dropped, "output ring full, sample dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbuf::HeapRb;
    use ringbuf::traits::{Consumer, Split};

    #[test]
    fn test_dac_latch_powers_up_at_midscale() {
        let dac = DacLatch::new();
        assert_eq!(dac.value(), 0x80);
        assert_eq!(dac.sample_i16(), 0);
    }

    #[test]
    fn test_dac_latch_holds_value_through_idle() {
        let mut dac = DacLatch::new();
        dac.write(0x00);
        assert_eq!(dac.sample_i16(), -32768);
        dac.write(0xff);
        dac.idle();
        dac.idle();
        assert_eq!(dac.value(), 0xff);
        assert_eq!(dac.sample_i16(), 32512);
        assert_eq!(dac.writes(), 2);
    }

    #[test]
    fn test_capture_sink_counts_idle_ticks() {
        let mut sink = CaptureSink::new();
        sink.write(1);
        sink.idle();
        sink.write(2);
        sink.idle();
        assert_eq!(sink.samples(), &[1, 2]);
        assert_eq!(sink.idle_ticks(), 2);
        assert_eq!(sink.last(), Some(2));
    }

    #[test]
    fn test_ring_sink_drops_when_full() {
        let (producer, mut consumer) = HeapRb::<u8>::new(4).split();
        let mut sink = RingSink::new(producer);
        for sample in 0..6 {
            sink.write(sample);
        }
        assert_eq!(sink.dropped(), 2);
        assert_eq!(sink.queued(), 4);

        let drained: Vec<u8> = std::iter::from_fn(|| consumer.try_pop()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sink_by_mutable_reference() {
        fn feed(mut sink: impl OutputSink) {
            sink.write(7);
            sink.idle();
        }
        let mut capture = CaptureSink::new();
        feed(&mut capture);
        assert_eq!(capture.samples(), &[7]);
        assert_eq!(capture.idle_ticks(), 1);
    }
}

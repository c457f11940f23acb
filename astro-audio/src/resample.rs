//! DAC stream to device rate conversion
//!
//! A real DAC holds each written value until the next write. [`DacResampler`]
//! reproduces that on a host audio device running at its own rate: it
//! repeats the current 11 kHz value for as many device frames as it spans
//! (zero-order hold) and keeps holding it when the ring runs dry.

use ringbuf::HeapCons;
use ringbuf::traits::Consumer;

use crate::OUTPUT_SAMPLE_RATE;

/// Zero-order-hold upsampler from the DAC rate to a device rate
pub struct DacResampler {
    consumer: HeapCons<u8>,
    /// DAC samples per device frame
    step: f64,
    /// Fractional position between DAC samples
    phase: f64,
    /// Value on the DAC output
    level: u8,
    /// Device frames that wanted a new DAC sample and found the ring empty
    starved: u64,
}

impl DacResampler {
    /// Resample into `device_rate`, starting at `initial_level`
    pub fn new(consumer: HeapCons<u8>, device_rate: u32, initial_level: u8) -> Self {
        Self {
            consumer,
            step: f64::from(OUTPUT_SAMPLE_RATE) / f64::from(device_rate.max(1)),
            phase: 0.0,
            level: initial_level,
            starved: 0,
        }
    }

    /// DAC level for the next device frame
    #[inline]
    pub fn next_level(&mut self) -> u8 {
        self.phase += self.step;
        while self.phase >= 1.0 {
            self.phase -= 1.0;
            match self.consumer.try_pop() {
                Some(sample) => self.level = sample,
                None => self.starved += 1,
            }
        }
        self.level
    }

    /// Fill interleaved `frame`-sized chunks of `data`, converting each level
    pub fn fill<T: Copy>(&mut self, data: &mut [T], channels: usize, convert: impl Fn(u8) -> T) {
        for frame in data.chunks_mut(channels.max(1)) {
            frame.fill(convert(self.next_level()));
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn starved(&self) -> u64 {
        self.starved
    }
}

/// Unsigned 8-bit level to a centered float sample
#[inline]
pub fn level_to_f32(level: u8) -> f32 {
    (f32::from(level) - 128.0) / 128.0
}

/// Unsigned 8-bit level to a signed 16-bit sample
#[inline]
pub fn level_to_i16(level: u8) -> i16 {
    (i16::from(level) - 128) << 8
}

/// Unsigned 8-bit level to an unsigned 16-bit sample (0x8000 is silence)
#[inline]
pub fn level_to_u16(level: u8) -> u16 {
    u16::from(level) << 8
}

//! Host audio device output using cpal and a ring buffer
//!
//! The pump thread writes DAC samples into a [`RingSink`]; the cpal callback
//! drains the ring through a [`DacResampler`] at the device rate.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::HeapRb;
use ringbuf::traits::Split;
use tracing::{error, info};

use crate::config::{AudioConfig, OutputConfig};
use crate::error::{AudioError, Result};
use crate::resample::{DacResampler, level_to_f32, level_to_i16, level_to_u16};
use crate::sink::RingSink;
use crate::system::SoundSystem;

/// Default output device stream fed by the DAC ring buffer
pub struct DeviceOutput {
    /// The cpal stream (kept alive for the duration)
    _stream: cpal::Stream,
    /// Device sample rate
    sample_rate: u32,
    /// Device channel count; every channel carries the same mono signal
    channels: u16,
}

impl DeviceOutput {
    /// Open the default output device
    ///
    /// Returns the running stream and the sink the pump must write to.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Device`] if no device is available or the
    /// stream cannot be built or started.
    pub fn open(config: &OutputConfig) -> Result<(Self, RingSink)> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::Device("No audio output device available".to_string()))?;

        let supported = device.default_output_config().map_err(|e| {
            AudioError::Device(format!("Failed to get default output config: {}", e))
        })?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels();
        let sample_format = supported.sample_format();

        let ring = HeapRb::<u8>::new(config.ring_capacity.max(1));
        let (producer, consumer) = ring.split();
        let mut resampler = DacResampler::new(consumer, sample_rate, config.idle_level);
        let frame = usize::from(channels);

        let stream_config: cpal::StreamConfig = supported.into();
        let on_error = |err: cpal::StreamError| error!("Audio stream error: {}", err);

        let stream = match sample_format {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    resampler.fill(data, frame, level_to_f32);
                },
                on_error,
                None,
            ),
            cpal::SampleFormat::I16 => device.build_output_stream(
                &stream_config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    resampler.fill(data, frame, level_to_i16);
                },
                on_error,
                None,
            ),
            cpal::SampleFormat::U16 => device.build_output_stream(
                &stream_config,
                move |data: &mut [u16], _: &cpal::OutputCallbackInfo| {
                    resampler.fill(data, frame, level_to_u16);
                },
                on_error,
                None,
            ),
            other => {
                return Err(AudioError::Device(format!(
                    "Unsupported sample format: {:?}",
                    other
                )));
            }
        }
        .map_err(|e| AudioError::Device(format!("Failed to build audio stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| AudioError::Device(format!("Failed to play audio stream: {}", e)))?;

        info!(
            "Audio stream started: {} Hz, {} channel(s), {:?}",
            sample_rate, channels, sample_format
        );

        Ok((
            Self {
                _stream: stream,
                sample_rate,
                channels,
            },
            RingSink::new(producer),
        ))
    }

    /// Get the device sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }
}

/// Start the builtin sound set on the default output device
///
/// Keep the returned [`DeviceOutput`] alive for as long as sound should be
/// heard.
///
/// # Errors
///
/// Returns an error if the device cannot be opened or the trigger thread
/// cannot be spawned.
pub fn start_on_device(config: &AudioConfig) -> Result<(SoundSystem<RingSink>, DeviceOutput)> {
    let (output, sink) = DeviceOutput::open(&config.output)?;
    let system = SoundSystem::start(config, sink)?;
    Ok((system, output))
}

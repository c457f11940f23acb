//! Host configuration (`astro-sfx.toml`)
//!
//! Only the host-side layers are configurable: how the trigger thread paces
//! ticks and how the device output buffers them. Output rate, stride and bit
//! depth are compile-time constants of the engine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, Result};
use crate::DAC_MIDSCALE;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "astro-sfx.toml";

/// Engine host configuration.
///
/// Every section and field falls back to its default, so an empty file is a
/// valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AudioConfig {
    /// Periodic trigger thread settings
    #[serde(default)]
    pub trigger: TriggerConfig,
    /// Device output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Periodic trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Name of the pump thread (default: "astro-pump")
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
    /// Longest sleep between tick batches in microseconds (default: 1000)
    #[serde(default = "default_poll_interval_us")]
    pub poll_interval_us: u64,
    /// Most ticks run back-to-back after a stall; the rest are skipped
    /// (default: 550, 50 ms at 11 kHz)
    #[serde(default = "default_max_catch_up_ticks")]
    pub max_catch_up_ticks: u32,
    /// Log pump metrics once per second at debug level (default: true)
    #[serde(default = "default_true")]
    pub metrics: bool,
}

/// Device output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Ring buffer capacity between pump and device, in DAC samples
    /// (default: 1024, about 93 ms)
    #[serde(default = "default_ring_capacity")]
    pub ring_capacity: usize,
    /// Level the device plays before the first sample arrives (default: 128)
    #[serde(default = "default_idle_level")]
    pub idle_level: u8,
}

fn default_thread_name() -> String {
    "astro-pump".to_string()
}
fn default_poll_interval_us() -> u64 {
    1000
}
fn default_max_catch_up_ticks() -> u32 {
    550
}
fn default_true() -> bool {
    true
}

fn default_ring_capacity() -> usize {
    1024
}
fn default_idle_level() -> u8 {
    DAC_MIDSCALE
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            thread_name: default_thread_name(),
            poll_interval_us: default_poll_interval_us(),
            max_catch_up_ticks: default_max_catch_up_ticks(),
            metrics: default_true(),
        }
    }
}

impl TriggerConfig {
    /// Poll interval as a `Duration`, never zero
    pub fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.poll_interval_us.max(1))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ring_capacity: default_ring_capacity(),
            idle_level: default_idle_level(),
        }
    }
}

/// Loads the configuration from `path`.
///
/// Returns default values if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<AudioConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(AudioConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&content).map_err(|source| AudioError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves the configuration to `path`.
///
/// Creates the parent directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file
/// cannot be written.
pub fn save(path: &Path, config: &AudioConfig) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AudioConfig::default();
        assert_eq!(config.trigger.thread_name, "astro-pump");
        assert_eq!(config.trigger.poll_interval_us, 1000);
        assert_eq!(config.trigger.max_catch_up_ticks, 550);
        assert!(config.trigger.metrics);
        assert_eq!(config.output.ring_capacity, 1024);
        assert_eq!(config.output.idle_level, 0x80);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: AudioConfig = toml::from_str("").unwrap();
        assert_eq!(config, AudioConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AudioConfig = toml::from_str(
            r#"
            [trigger]
            max_catch_up_ticks = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.trigger.max_catch_up_ticks, 100);
        assert_eq!(config.trigger.thread_name, "astro-pump");
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_poll_interval_never_zero() {
        let trigger = TriggerConfig {
            poll_interval_us: 0,
            ..TriggerConfig::default()
        };
        assert_eq!(trigger.poll_interval(), Duration::from_micros(1));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AudioConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_CONFIG_FILE);

        let mut config = AudioConfig::default();
        config.trigger.metrics = false;
        config.output.ring_capacity = 4096;
        save(&path, &config).unwrap();

        assert_eq!(load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[trigger]\npoll_interval_us = \"soon\"\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, AudioError::Config { .. }));
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}

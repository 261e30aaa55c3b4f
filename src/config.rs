use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub asr: AsrConfig,
    pub tts: TtsConfig,
    pub gps: GpsConfig,
}

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub device: Option<String>,
    pub sample_rate: u32,
    pub block_size: usize,
    pub record_seconds: u32,
}

/// Speech recognition configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AsrConfig {
    pub model: PathBuf,
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TtsConfig {
    pub binary: String,
    pub model: String,
    pub sample_rate: u32,
    /// ALSA device passed to aplay (e.g. "plughw:0,0"). None = default device.
    pub playback_device: Option<String>,
}

/// GPS receiver configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GpsConfig {
    pub port: String,
    pub baud: u32,
    pub timeout_reads: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            sample_rate: defaults::SAMPLE_RATE,
            block_size: defaults::BLOCK_SIZE,
            record_seconds: defaults::RECORD_SECONDS,
        }
    }
}

impl Default for AsrConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from(defaults::DEFAULT_ASR_MODEL),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            binary: defaults::TTS_BINARY.to_string(),
            model: defaults::DEFAULT_TTS_MODEL.to_string(),
            sample_rate: defaults::TTS_SAMPLE_RATE,
            playback_device: None,
        }
    }
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            port: defaults::GPS_PORT.to_string(),
            baud: defaults::GPS_BAUD,
            timeout_reads: defaults::GPS_TIMEOUT_READS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    // Re-panic on invalid TOML or other errors
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SAHAYAK_ASR_MODEL → asr.model
    /// - SAHAYAK_TTS_MODEL → tts.model
    /// - SAHAYAK_AUDIO_DEVICE → audio.device
    /// - SAHAYAK_GPS_PORT → gps.port
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("SAHAYAK_ASR_MODEL")
            && !model.is_empty()
        {
            self.asr.model = PathBuf::from(model);
        }

        if let Ok(model) = std::env::var("SAHAYAK_TTS_MODEL")
            && !model.is_empty()
        {
            self.tts.model = model;
        }

        if let Ok(device) = std::env::var("SAHAYAK_AUDIO_DEVICE")
            && !device.is_empty()
        {
            self.audio.device = Some(device);
        }

        if let Ok(port) = std::env::var("SAHAYAK_GPS_PORT")
            && !port.is_empty()
        {
            self.gps.port = port;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/sahayak/config.toml on Linux
    #[cfg(feature = "cli")]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("sahayak")
            .join("config.toml")
    }
}

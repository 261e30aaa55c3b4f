//! Error types for sahayak.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SahayakError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio capture errors
    #[error("Audio device not found: {device}")]
    AudioDeviceNotFound { device: String },

    #[error("Audio capture failed: {message}")]
    AudioCapture { message: String },

    // Audio playback errors
    #[error("Playback tool not found: {tool}")]
    PlaybackToolNotFound { tool: String },

    #[error("Audio playback failed: {message}")]
    PlaybackFailed { message: String },

    // Recognition errors
    #[error("Recognition model not found at {path}")]
    RecognizerModelNotFound { path: String },

    #[error("Recognition failed: {message}")]
    Recognition { message: String },

    // Synthesis errors
    #[error("Synthesis process is not running: {message}")]
    SynthesisProcessDown { message: String },

    #[error("Speech synthesis failed: {message}")]
    SynthesisFailed { message: String },

    // GPS errors. Callers convert these to "no fix" at the GpsReader
    // boundary; they never propagate into the voice loop.
    #[error("GPS error: {message}")]
    Gps { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SahayakError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = SahayakError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn test_audio_device_not_found_display() {
        let error = SahayakError::AudioDeviceNotFound {
            device: "default".to_string(),
        };
        assert_eq!(error.to_string(), "Audio device not found: default");
    }

    #[test]
    fn test_audio_capture_display() {
        let error = SahayakError::AudioCapture {
            message: "buffer overflow".to_string(),
        };
        assert_eq!(error.to_string(), "Audio capture failed: buffer overflow");
    }

    #[test]
    fn test_recognizer_model_not_found_display() {
        let error = SahayakError::RecognizerModelNotFound {
            path: "/models/vosk-model-hi".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Recognition model not found at /models/vosk-model-hi"
        );
    }

    #[test]
    fn test_synthesis_process_down_display() {
        let error = SahayakError::SynthesisProcessDown {
            message: "piper exited".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Synthesis process is not running: piper exited"
        );
    }

    #[test]
    fn test_gps_display() {
        let error = SahayakError::Gps {
            message: "port closed".to_string(),
        };
        assert_eq!(error.to_string(), "GPS error: port closed");
    }

    #[test]
    fn test_playback_tool_not_found_display() {
        let error = SahayakError::PlaybackToolNotFound {
            tool: "aplay".to_string(),
        };
        assert_eq!(error.to_string(), "Playback tool not found: aplay");
    }

    #[test]
    fn test_other_display() {
        let error = SahayakError::Other("unexpected error".to_string());
        assert_eq!(error.to_string(), "unexpected error");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: SahayakError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: SahayakError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);

        fn returns_error() -> Result<i32> {
            Err(SahayakError::Other("test error".to_string()))
        }
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<SahayakError>();
        assert_sync::<SahayakError>();
    }

    #[test]
    fn test_error_debug_format() {
        let error = SahayakError::ConfigFileNotFound {
            path: "/test/path".to_string(),
        };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ConfigFileNotFound"));
        assert!(debug_str.contains("/test/path"));
    }
}

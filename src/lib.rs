//! sahayak - Offline Hindi voice assistant
//!
//! Microphone → speech recognition → keyword intents → spoken replies,
//! with GPS place resolution. Fully offline.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(all(feature = "cpal-audio", feature = "cli"))]
pub mod app;
pub mod asr;
pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod gps;
pub mod intent;
pub mod output;
pub mod tts;
pub mod voice_loop;

// Core traits (source → recognize → plan → speak)
pub use asr::recognizer::{RecognitionResult, SpeechRecognizer};
pub use audio::playback::{AudioOutput, PcmFormat};
pub use audio::source::AudioSource;
pub use tts::synthesizer::SpeechSynthesizer;

// Intent dispatch
pub use intent::classifier::{Intent, IntentClassifier};
pub use intent::planner::{PlannedReply, ResponsePlanner};

// GPS
pub use gps::nmea::GpsFix;
pub use gps::places::{Place, PlaceResolver};

// Orchestration
pub use voice_loop::{LoopState, VoiceLoop, VoiceLoopConfig};

// Error handling
pub use error::{Result, SahayakError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.2.0+abc1234"` when git hash is available, `"0.2.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        // In a git repo build, GIT_HASH is set → expect "0.2.0+<hash>"
        // In CI without git, expect plain "0.2.0"
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            assert!(
                ver.contains('+'),
                "With GIT_HASH set, version should contain '+', got: {}",
                ver
            );
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}

//! Vosk-based speech recognition.
//!
//! This module provides a Vosk implementation of the SpeechRecognizer trait.
//! Vosk performs its own endpoint detection, which drives the
//! accumulate-and-finalize protocol: `feed` returns partial results until
//! the engine decides the utterance has ended.
//!
//! # Feature Gate
//!
//! This module requires the `vosk-asr` feature and the Vosk C library at
//! link time. To build with Vosk support:
//!
//! ```bash
//! cargo build --features vosk-asr
//! ```

use crate::asr::recognizer::{RecognitionResult, RecognizerConfig, SpeechRecognizer};
use crate::error::{Result, SahayakError};

#[cfg(feature = "vosk-asr")]
use std::sync::Once;
#[cfg(feature = "vosk-asr")]
use vosk::{DecodingState, Model, Recognizer};

#[cfg(feature = "vosk-asr")]
static LOG_LEVEL_SET: Once = Once::new();

/// Vosk-based recognizer implementation.
///
/// Owns one Kaldi recognizer instance for the whole run; `reset` clears the
/// decoder between utterances. Feeding audio at a rate other than the one
/// the recognizer was created with silently corrupts transcripts, so the
/// configured rate must match the capture stream exactly.
///
/// # Feature Gate
///
/// This type is only functional when the `vosk-asr` feature is enabled.
#[cfg(feature = "vosk-asr")]
pub struct VoskRecognizer {
    recognizer: Recognizer,
    // Model must outlive the recognizer built from it.
    _model: Model,
    config: RecognizerConfig,
    model_name: String,
}

#[cfg(feature = "vosk-asr")]
impl std::fmt::Debug for VoskRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoskRecognizer")
            .field("config", &self.config)
            .field("model_name", &self.model_name)
            .field("recognizer", &"<Recognizer>")
            .finish()
    }
}

/// Vosk-based recognizer placeholder (without the vosk-asr feature).
///
/// This is a stub implementation that returns errors when used.
/// Enable the `vosk-asr` feature to use real recognition.
#[cfg(not(feature = "vosk-asr"))]
#[derive(Debug)]
pub struct VoskRecognizer {
    config: RecognizerConfig,
    model_name: String,
}

fn model_name_from(config: &RecognizerConfig) -> String {
    config
        .model_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(feature = "vosk-asr")]
impl VoskRecognizer {
    /// Create a new Vosk recognizer.
    ///
    /// # Arguments
    /// * `config` - Model directory and sample rate
    ///
    /// # Errors
    /// Returns `SahayakError::RecognizerModelNotFound` if the model directory
    /// doesn't exist, `SahayakError::Recognition` if loading fails.
    pub fn new(config: RecognizerConfig) -> Result<Self> {
        // Silence Kaldi's startup chatter (only once)
        LOG_LEVEL_SET.call_once(|| {
            vosk::set_log_level(vosk::LogLevel::Error);
        });

        if !config.model_path.exists() {
            return Err(SahayakError::RecognizerModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }

        let path_str = config
            .model_path
            .to_str()
            .ok_or_else(|| SahayakError::Recognition {
                message: "Invalid UTF-8 in model path".to_string(),
            })?;

        let model = Model::new(path_str).ok_or_else(|| SahayakError::Recognition {
            message: format!("Failed to load Vosk model from {}", path_str),
        })?;

        let recognizer = Recognizer::new(&model, config.sample_rate as f32).ok_or_else(|| {
            SahayakError::Recognition {
                message: format!(
                    "Failed to create recognizer at {} Hz",
                    config.sample_rate
                ),
            }
        })?;

        let model_name = model_name_from(&config);

        Ok(Self {
            recognizer,
            _model: model,
            config,
            model_name,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    fn take_final_text(&mut self) -> String {
        self.recognizer
            .result()
            .single()
            .map(|r| r.text.trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(not(feature = "vosk-asr"))]
impl VoskRecognizer {
    /// Create a new Vosk recognizer (stub implementation).
    pub fn new(config: RecognizerConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(SahayakError::RecognizerModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }

        let model_name = model_name_from(&config);
        Ok(Self { config, model_name })
    }

    /// Get the configuration
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }
}

#[cfg(feature = "vosk-asr")]
impl SpeechRecognizer for VoskRecognizer {
    fn feed(&mut self, samples: &[i16]) -> Result<RecognitionResult> {
        match self.recognizer.accept_waveform(samples) {
            Ok(DecodingState::Finalized) => Ok(RecognitionResult::finalized(
                self.take_final_text(),
            )),
            Ok(DecodingState::Running) => Ok(RecognitionResult::partial()),
            // The engine failing on a block means no decodable speech in
            // this utterance, not a fatal condition; finalize empty so the
            // loop re-prompts.
            Ok(DecodingState::Failed) => Ok(RecognitionResult::finalized("")),
            Err(e) => Err(SahayakError::Recognition {
                message: format!("accept_waveform failed: {:?}", e),
            }),
        }
    }

    fn transcribe(&mut self, samples: &[i16]) -> Result<String> {
        // Reset on both sides so decoder state never crosses utterances.
        self.recognizer.reset();

        if let Err(e) = self.recognizer.accept_waveform(samples) {
            self.recognizer.reset();
            return Err(SahayakError::Recognition {
                message: format!("accept_waveform failed: {:?}", e),
            });
        }

        let text = self
            .recognizer
            .final_result()
            .single()
            .map(|r| r.text.trim().to_string())
            .unwrap_or_default();

        self.recognizer.reset();
        Ok(text)
    }

    fn reset(&mut self) {
        self.recognizer.reset();
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(not(feature = "vosk-asr"))]
impl SpeechRecognizer for VoskRecognizer {
    fn feed(&mut self, _samples: &[i16]) -> Result<RecognitionResult> {
        Err(SahayakError::Recognition {
            message: concat!(
                "Vosk feature not enabled. This binary was built without speech recognition.\n",
                "To fix: cargo build --release (vosk-asr is enabled by default)\n",
                "The Vosk C library must be installed: https://alphacephei.com/vosk/install"
            )
            .to_string(),
        })
    }

    fn transcribe(&mut self, _samples: &[i16]) -> Result<String> {
        Err(SahayakError::Recognition {
            message: "Vosk feature not enabled".to_string(),
        })
    }

    fn reset(&mut self) {}

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

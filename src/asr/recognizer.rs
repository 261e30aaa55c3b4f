use crate::defaults;
use crate::error::{Result, SahayakError};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Result of feeding audio into the recognizer.
///
/// `finalized` flips to true once the engine's endpoint detector decides
/// the utterance is complete; `text` then carries the best transcript for
/// the whole utterance (empty if no decodable speech was present).
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub finalized: bool,
    pub text: String,
}

impl RecognitionResult {
    /// A non-final, in-progress result.
    pub fn partial() -> Self {
        Self {
            finalized: false,
            text: String::new(),
        }
    }

    /// A finalized result carrying the utterance transcript.
    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            finalized: true,
            text: text.into(),
        }
    }
}

/// Trait for speech-to-text engines.
///
/// This trait allows swapping implementations (real Vosk vs mock).
/// Both entry points must be safe to interleave with `reset`; decoder
/// state must never leak from one utterance into the next.
pub trait SpeechRecognizer: Send {
    /// Feed one captured block (push model).
    ///
    /// Accumulates audio inside the engine; returns `finalized = false`
    /// until the engine's endpoint detector signals utterance completion,
    /// then `finalized = true` with the transcript.
    ///
    /// # Arguments
    /// * `samples` - Audio block as 16-bit PCM at the engine's sample rate
    fn feed(&mut self, samples: &[i16]) -> Result<RecognitionResult>;

    /// Transcribe a complete pre-recorded utterance (pull model).
    ///
    /// Resets engine state before and after the call so utterances never
    /// leak decoder state across turns.
    ///
    /// # Returns
    /// The transcript, empty if no decodable speech was present
    fn transcribe(&mut self, samples: &[i16]) -> Result<String>;

    /// Discard accumulated decoder state between utterances.
    fn reset(&mut self);

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;
}

/// Configuration for recognizer initialization
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    pub model_path: PathBuf,
    pub sample_rate: u32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(defaults::DEFAULT_ASR_MODEL),
            sample_rate: defaults::SAMPLE_RATE,
        }
    }
}

/// Mock recognizer for testing.
///
/// `feed` plays back a scripted queue of results; `transcribe` plays back
/// a scripted queue of transcripts. Records every reset.
#[derive(Debug, Default)]
pub struct MockRecognizer {
    model_name: String,
    feed_results: VecDeque<RecognitionResult>,
    transcripts: VecDeque<String>,
    reset_count: usize,
    fed_samples: usize,
    should_fail: bool,
}

impl MockRecognizer {
    /// Create a new mock recognizer with default settings
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            ..Default::default()
        }
    }

    /// Queue a feed result (returned in order; partial once exhausted)
    pub fn with_feed_result(mut self, result: RecognitionResult) -> Self {
        self.feed_results.push_back(result);
        self
    }

    /// Queue a transcript for `transcribe` (empty string once exhausted)
    pub fn with_transcript(mut self, text: &str) -> Self {
        self.transcripts.push_back(text.to_string());
        self
    }

    /// Configure the mock to fail on feed/transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of resets seen so far
    pub fn reset_count(&self) -> usize {
        self.reset_count
    }

    /// Total samples fed so far
    pub fn fed_samples(&self) -> usize {
        self.fed_samples
    }
}

impl SpeechRecognizer for MockRecognizer {
    fn feed(&mut self, samples: &[i16]) -> Result<RecognitionResult> {
        if self.should_fail {
            return Err(SahayakError::Recognition {
                message: "mock recognition failure".to_string(),
            });
        }
        self.fed_samples += samples.len();
        Ok(self
            .feed_results
            .pop_front()
            .unwrap_or_else(RecognitionResult::partial))
    }

    fn transcribe(&mut self, samples: &[i16]) -> Result<String> {
        if self.should_fail {
            return Err(SahayakError::Recognition {
                message: "mock recognition failure".to_string(),
            });
        }
        // Pull model resets around every call, like the real engine.
        self.reset();
        self.fed_samples += samples.len();
        let text = self.transcripts.pop_front().unwrap_or_default();
        self.reset();
        Ok(text)
    }

    fn reset(&mut self) {
        self.reset_count += 1;
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_result_constructors() {
        let partial = RecognitionResult::partial();
        assert!(!partial.finalized);
        assert!(partial.text.is_empty());

        let done = RecognitionResult::finalized("नमस्ते");
        assert!(done.finalized);
        assert_eq!(done.text, "नमस्ते");
    }

    #[test]
    fn test_mock_recognizer_plays_feed_script() {
        let mut rec = MockRecognizer::new("test-model")
            .with_feed_result(RecognitionResult::partial())
            .with_feed_result(RecognitionResult::finalized("समय"));

        let first = rec.feed(&[0i16; 160]).unwrap();
        assert!(!first.finalized);

        let second = rec.feed(&[0i16; 160]).unwrap();
        assert!(second.finalized);
        assert_eq!(second.text, "समय");

        // Script exhausted → partial
        let third = rec.feed(&[0i16; 160]).unwrap();
        assert!(!third.finalized);
    }

    #[test]
    fn test_mock_recognizer_transcribe_resets_around_call() {
        let mut rec = MockRecognizer::new("test-model").with_transcript("अभी समय क्या है");

        let text = rec.transcribe(&[0i16; 16000]).unwrap();
        assert_eq!(text, "अभी समय क्या है");
        assert_eq!(rec.reset_count(), 2, "reset before and after");

        // Exhausted script behaves like silence
        let empty = rec.transcribe(&[0i16; 16000]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_mock_recognizer_failure() {
        let mut rec = MockRecognizer::new("test-model").with_failure();

        let result = rec.feed(&[0i16; 160]);
        assert!(result.is_err());
        match result {
            Err(SahayakError::Recognition { message }) => {
                assert_eq!(message, "mock recognition failure");
            }
            _ => panic!("Expected Recognition error"),
        }

        assert!(rec.transcribe(&[0i16; 160]).is_err());
    }

    #[test]
    fn test_mock_recognizer_counts_samples() {
        let mut rec = MockRecognizer::new("test-model");
        rec.feed(&[0i16; 160]).unwrap();
        rec.feed(&[0i16; 320]).unwrap();
        assert_eq!(rec.fed_samples(), 480);
    }

    #[test]
    fn test_recognizer_config_default() {
        let config = RecognizerConfig::default();
        assert_eq!(config.model_path, PathBuf::from("vosk-model-hi"));
        assert_eq!(config.sample_rate, 16000);
    }

    #[test]
    fn test_recognizer_trait_is_object_safe() {
        let mut rec: Box<dyn SpeechRecognizer> = Box::new(
            MockRecognizer::new("boxed").with_feed_result(RecognitionResult::finalized("शहर")),
        );

        assert_eq!(rec.model_name(), "boxed");
        let result = rec.feed(&[0i16; 100]).unwrap();
        assert_eq!(result.text, "शहर");
    }
}

use crate::defaults;
use crate::error::{Result, SahayakError};

/// Trait for text-to-speech output.
///
/// This trait allows swapping implementations (real Piper vs mock).
/// Only one `speak` call is ever in flight; the voice loop's sequential
/// cycle contract enforces it, so implementations need no internal locking.
pub trait SpeechSynthesizer: Send {
    /// Synthesize and play `text`, blocking until playback completes.
    ///
    /// Empty text is a no-op: nothing is written to the engine.
    ///
    /// # Errors
    /// Returns `SynthesisProcessDown` when the engine process has died and
    /// could not be respawned; the caller degrades to printing the reply.
    fn speak(&mut self, text: &str) -> Result<()>;
}

/// Configuration for the Piper engine.
#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    /// Piper binary name or path.
    pub binary: String,
    /// Voice model passed to `--model`.
    pub model: String,
    /// Sample rate of the engine's raw output.
    pub sample_rate: u32,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            binary: defaults::TTS_BINARY.to_string(),
            model: defaults::DEFAULT_TTS_MODEL.to_string(),
            sample_rate: defaults::TTS_SAMPLE_RATE,
        }
    }
}

/// Mock synthesizer for testing.
///
/// Records every spoken text instead of producing sound.
#[derive(Debug, Default)]
pub struct MockSynthesizer {
    spoken: Vec<String>,
    attempts: usize,
    should_fail: bool,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail on speak
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Texts spoken so far (successful calls only, no-ops excluded).
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    /// Total speak attempts, including failures and no-ops.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn speak(&mut self, text: &str) -> Result<()> {
        self.attempts += 1;
        if text.is_empty() {
            return Ok(());
        }
        if self.should_fail {
            return Err(SahayakError::SynthesisProcessDown {
                message: "mock synthesis failure".to_string(),
            });
        }
        self.spoken.push(text.to_string());
        Ok(())
    }
}

//! Piper TTS bridges.
//!
//! [`PiperSynthesizer`] keeps one Piper process alive for the whole run;
//! spawning per utterance reloads the voice model and adds seconds of
//! latency, which is exactly what this design exists to avoid. One request
//! is one text line written to the child's stdin; the reply is a bounded
//! window of raw PCM read from its stdout, sized from the text length
//! rather than measured. A dead child triggers one respawn attempt before
//! the next write.
//!
//! [`FilePiperSynthesizer`] is the lower-complexity fallback: spawn per
//! call, synthesize into a scratch WAV, play the file. Higher latency,
//! no persistent state.

use crate::audio::playback::{AudioOutput, PcmFormat};
use crate::defaults;
use crate::error::{Result, SahayakError};
use crate::tts::synthesizer::{SpeechSynthesizer, SynthesizerConfig};
use std::io::{Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Compute the raw-PCM window read for one utterance, in bytes.
///
/// The window grows with the text length and is clamped to a fixed upper
/// bound. Reading a fixed window regardless of the actual synthesized
/// duration risks truncated or padded audio; the tradeoff buys bounded
/// latency without framing support from the engine.
pub(crate) fn window_bytes(text: &str) -> usize {
    let secs = (defaults::TTS_WINDOW_BASE_SECS
        + text.chars().count() as f32 * defaults::TTS_WINDOW_SECS_PER_CHAR)
        .min(defaults::TTS_WINDOW_MAX_SECS);
    let bytes = (secs * defaults::TTS_BYTES_PER_SEC as f32) as usize;
    // Keep sample alignment
    bytes & !1
}

struct PiperProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
}

/// Persistent-process Piper bridge.
///
/// The child is spawned lazily on the first non-empty `speak` (the
/// composition root warms it up at startup) and owned exclusively for the
/// program lifetime. Killed on drop.
pub struct PiperSynthesizer<O: AudioOutput> {
    config: SynthesizerConfig,
    process: Option<PiperProcess>,
    output: O,
}

impl<O: AudioOutput> PiperSynthesizer<O> {
    /// Create a bridge without spawning the engine yet.
    pub fn new(config: SynthesizerConfig, output: O) -> Self {
        Self {
            config,
            process: None,
            output,
        }
    }

    /// True while the engine child process is alive.
    pub fn is_running(&mut self) -> bool {
        match self.process.as_mut() {
            Some(p) => matches!(p.child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn spawn_process(&self) -> Result<PiperProcess> {
        let mut child = Command::new(&self.config.binary)
            .args(["--model", &self.config.model, "--output-raw"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SahayakError::SynthesisProcessDown {
                message: format!("Failed to spawn {}: {}", self.config.binary, e),
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SahayakError::SynthesisProcessDown {
                message: "Piper stdin unavailable".to_string(),
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SahayakError::SynthesisProcessDown {
                message: "Piper stdout unavailable".to_string(),
            })?;

        Ok(PiperProcess {
            child,
            stdin,
            stdout,
        })
    }

    /// Make sure a live child exists, respawning a dead one once.
    fn ensure_running(&mut self) -> Result<()> {
        if let Some(p) = self.process.as_mut() {
            match p.child.try_wait() {
                Ok(None) => return Ok(()),
                // Exited or unknowable; drop the handle and respawn below.
                _ => {
                    self.process = None;
                }
            }
        }

        let process = self.spawn_process()?;
        self.process = Some(process);
        Ok(())
    }
}

impl<O: AudioOutput> SpeechSynthesizer for PiperSynthesizer<O> {
    fn speak(&mut self, text: &str) -> Result<()> {
        // No-op before touching the child at all.
        if text.is_empty() {
            return Ok(());
        }

        self.ensure_running()?;
        let Some(process) = self.process.as_mut() else {
            return Err(SahayakError::SynthesisProcessDown {
                message: "Piper process unavailable".to_string(),
            });
        };

        // One request = one line in.
        let write_result = process
            .stdin
            .write_all(text.as_bytes())
            .and_then(|_| process.stdin.write_all(b"\n"))
            .and_then(|_| process.stdin.flush());
        if let Err(e) = write_result {
            self.process = None;
            return Err(SahayakError::SynthesisProcessDown {
                message: format!("Failed to write to Piper: {}", e),
            });
        }

        // One reply = a bounded byte window out.
        let mut pcm = vec![0u8; window_bytes(text)];
        if let Err(e) = process.stdout.read_exact(&mut pcm) {
            self.process = None;
            return Err(SahayakError::SynthesisProcessDown {
                message: format!("Failed to read from Piper: {}", e),
            });
        }

        self.output
            .play(&pcm, PcmFormat::mono(self.config.sample_rate))
    }
}

impl<O: AudioOutput> Drop for PiperSynthesizer<O> {
    fn drop(&mut self) {
        if let Some(mut p) = self.process.take() {
            let _ = p.child.kill();
            let _ = p.child.wait();
        }
    }
}

/// Spawn-per-call fallback bridge.
///
/// Synthesizes into a scratch WAV under the system temp directory, decodes
/// it with hound and hands the samples to the playback sink. The scratch
/// file is transient; it is removed after playback.
pub struct FilePiperSynthesizer<O: AudioOutput> {
    config: SynthesizerConfig,
    output: O,
}

impl<O: AudioOutput> FilePiperSynthesizer<O> {
    pub fn new(config: SynthesizerConfig, output: O) -> Self {
        Self { config, output }
    }

    fn scratch_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sahayak-response-{}.wav", std::process::id()))
    }
}

impl<O: AudioOutput> SpeechSynthesizer for FilePiperSynthesizer<O> {
    fn speak(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let wav_path = Self::scratch_path();
        let wav_str = wav_path.to_string_lossy().into_owned();

        let mut child = Command::new(&self.config.binary)
            .args(["--model", &self.config.model, "--output_file", &wav_str])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SahayakError::SynthesisFailed {
                message: format!("Failed to spawn {}: {}", self.config.binary, e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .and_then(|_| stdin.write_all(b"\n"))
                .map_err(|e| SahayakError::SynthesisFailed {
                    message: format!("Failed to write to Piper: {}", e),
                })?;
            // Drop closes stdin so Piper finishes the file.
        }

        let status = child.wait().map_err(|e| SahayakError::SynthesisFailed {
            message: format!("Failed to wait for Piper: {}", e),
        })?;
        if !status.success() {
            return Err(SahayakError::SynthesisFailed {
                message: format!("Piper exited with status {:?}", status),
            });
        }

        let reader =
            hound::WavReader::open(&wav_path).map_err(|e| SahayakError::SynthesisFailed {
                message: format!("Failed to read synthesized WAV: {}", e),
            })?;
        let spec = reader.spec();
        let mut pcm = Vec::new();
        for sample in reader.into_samples::<i16>() {
            let sample = sample.map_err(|e| SahayakError::SynthesisFailed {
                message: format!("Corrupt synthesized WAV: {}", e),
            })?;
            pcm.extend_from_slice(&sample.to_le_bytes());
        }

        let _ = std::fs::remove_file(&wav_path);

        self.output.play(
            &pcm,
            PcmFormat {
                sample_rate: spec.sample_rate,
                channels: spec.channels,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::playback::MockAudioOutput;

    #[test]
    fn test_window_bytes_grows_with_text() {
        let short = window_bytes("नमस्ते");
        let long = window_bytes("आप समय तारीख शहर राज्य पूछ सकते हैं");
        assert!(long > short);
    }

    #[test]
    fn test_window_bytes_is_clamped() {
        let huge: String = "क".repeat(10_000);
        let max = (defaults::TTS_WINDOW_MAX_SECS * defaults::TTS_BYTES_PER_SEC as f32) as usize;
        assert!(window_bytes(&huge) <= max);
    }

    #[test]
    fn test_window_bytes_is_sample_aligned() {
        for text in ["क", "नमस्ते", "अभी समय क्या है"] {
            assert_eq!(window_bytes(text) % 2, 0);
        }
    }

    #[test]
    fn test_window_bytes_minimum_covers_base() {
        // Even a one-character reply reads at least the base window.
        let min = (defaults::TTS_WINDOW_BASE_SECS * defaults::TTS_BYTES_PER_SEC as f32) as usize;
        assert!(window_bytes("क") >= min);
    }

    #[test]
    fn test_speak_empty_text_never_spawns() {
        let mut tts = PiperSynthesizer::new(SynthesizerConfig::default(), MockAudioOutput::new());

        assert!(tts.speak("").is_ok());
        assert!(!tts.is_running(), "empty speak must not spawn the engine");
        assert_eq!(tts.output.play_count(), 0);
    }

    #[test]
    fn test_speak_with_missing_binary_is_process_down() {
        let config = SynthesizerConfig {
            binary: "definitely-not-piper-12345".to_string(),
            ..Default::default()
        };
        let mut tts = PiperSynthesizer::new(config, MockAudioOutput::new());

        let result = tts.speak("नमस्ते");
        assert!(matches!(
            result,
            Err(SahayakError::SynthesisProcessDown { .. })
        ));
        assert_eq!(tts.output.play_count(), 0);
    }

    #[test]
    fn test_file_fallback_empty_text_is_noop() {
        let mut tts =
            FilePiperSynthesizer::new(SynthesizerConfig::default(), MockAudioOutput::new());
        assert!(tts.speak("").is_ok());
        assert_eq!(tts.output.play_count(), 0);
    }

    #[test]
    fn test_file_fallback_missing_binary_fails() {
        let config = SynthesizerConfig {
            binary: "definitely-not-piper-12345".to_string(),
            ..Default::default()
        };
        let mut tts = FilePiperSynthesizer::new(config, MockAudioOutput::new());

        assert!(matches!(
            tts.speak("नमस्ते"),
            Err(SahayakError::SynthesisFailed { .. })
        ));
    }

    #[test]
    #[ignore] // Requires piper and a voice model on PATH
    fn test_persistent_piper_round_trip() {
        let mut tts = PiperSynthesizer::new(SynthesizerConfig::default(), MockAudioOutput::new());

        tts.speak("नमस्ते").unwrap();
        assert_eq!(tts.output.play_count(), 1);
        let (pcm, format) = &tts.output.plays()[0];
        assert_eq!(format.sample_rate, 22050);
        assert_eq!(pcm.len(), window_bytes("नमस्ते"));

        // Second utterance reuses the same process.
        assert!(tts.is_running());
        tts.speak("तैयार").unwrap();
        assert_eq!(tts.output.play_count(), 2);
    }
}

//! Raw PCM playback through an external ALSA player.
//!
//! The synthesizer hands finished audio to an [`AudioOutput`] sink; the
//! production implementation pipes the bytes into `aplay`. No transcoding
//! happens here; the sink plays exactly the format it is told.

use crate::error::{Result, SahayakError};
use std::io::Write;
use std::process::{Command, Stdio};

/// Sample format/rate/channel triple describing a raw PCM buffer.
///
/// Samples are always signed 16-bit little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmFormat {
    /// Mono S16LE at the given rate.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
        }
    }
}

/// Trait for audio playback sinks.
///
/// This trait allows swapping implementations (real player vs mock).
pub trait AudioOutput: Send {
    /// Play a raw S16LE PCM buffer, blocking until playback completes.
    ///
    /// An empty buffer is a no-op.
    ///
    /// # Errors
    /// Returns `PlaybackToolNotFound` if the player binary is missing,
    /// `PlaybackFailed` for any other playback error.
    fn play(&mut self, pcm: &[u8], format: PcmFormat) -> Result<()>;
}

/// Playback via the `aplay` ALSA utility.
///
/// Spawns `aplay -r <rate> -f S16_LE -t raw -c <channels> -` per call and
/// writes the PCM bytes to its stdin.
#[derive(Debug, Clone, Default)]
pub struct AplayOutput {
    /// ALSA device (e.g. "plughw:0,0"). None = default device.
    device: Option<String>,
}

impl AplayOutput {
    pub fn new(device: Option<String>) -> Self {
        Self { device }
    }
}

impl AudioOutput for AplayOutput {
    fn play(&mut self, pcm: &[u8], format: PcmFormat) -> Result<()> {
        if pcm.is_empty() {
            return Ok(());
        }

        let rate = format.sample_rate.to_string();
        let channels = format.channels.to_string();
        let mut cmd = Command::new("aplay");
        if let Some(ref device) = self.device {
            cmd.args(["-D", device]);
        }
        cmd.args(["-r", &rate, "-f", "S16_LE", "-t", "raw", "-c", &channels, "-"]);

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SahayakError::PlaybackToolNotFound {
                        tool: "aplay".to_string(),
                    }
                } else {
                    SahayakError::PlaybackFailed {
                        message: format!("Failed to spawn aplay: {}", e),
                    }
                }
            })?;

        // stdin is piped above, so take() always succeeds
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(pcm)
                .map_err(|e| SahayakError::PlaybackFailed {
                    message: format!("Failed to write PCM to aplay: {}", e),
                })?;
            // Drop closes the pipe so aplay sees EOF and drains.
        }

        let status = child.wait().map_err(|e| SahayakError::PlaybackFailed {
            message: format!("Failed to wait for aplay: {}", e),
        })?;

        if !status.success() {
            return Err(SahayakError::PlaybackFailed {
                message: format!("aplay exited with status {:?}", status),
            });
        }

        Ok(())
    }
}

/// Mock playback sink for testing.
///
/// Records every played buffer and format instead of producing sound.
#[derive(Debug, Default)]
pub struct MockAudioOutput {
    plays: Vec<(Vec<u8>, PcmFormat)>,
    should_fail: bool,
}

impl MockAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail on play
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// All buffers played so far.
    pub fn plays(&self) -> &[(Vec<u8>, PcmFormat)] {
        &self.plays
    }

    /// Number of play calls recorded.
    pub fn play_count(&self) -> usize {
        self.plays.len()
    }
}

impl AudioOutput for MockAudioOutput {
    fn play(&mut self, pcm: &[u8], format: PcmFormat) -> Result<()> {
        if self.should_fail {
            return Err(SahayakError::PlaybackFailed {
                message: "mock playback failure".to_string(),
            });
        }
        self.plays.push((pcm.to_vec(), format));
        Ok(())
    }
}

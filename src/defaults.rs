//! Default configuration constants for sahayak.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Default microphone sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and provides a good balance
/// between quality and computational efficiency for voice applications.
/// The recognizer must be initialized with the exact rate the capture
/// stream delivers.
pub const SAMPLE_RATE: u32 = 16000;

/// Default capture block length in samples.
///
/// Smaller blocks lower end-to-end latency in the streaming driver at the
/// cost of more channel traffic.
pub const BLOCK_SIZE: usize = 1024;

/// Default recording duration in seconds for the turn-based driver.
pub const RECORD_SECONDS: u32 = 2;

/// Depth of the bounded capture channel in the streaming driver.
///
/// When the consumer falls behind, the producer blocks on `send` rather
/// than dropping blocks; chunks within an utterance must never be lost.
pub const CAPTURE_QUEUE_DEPTH: usize = 64;

/// Default Vosk model directory.
pub const DEFAULT_ASR_MODEL: &str = "vosk-model-hi";

/// Default Piper voice model.
pub const DEFAULT_TTS_MODEL: &str = "hi_IN-pratham-medium.onnx";

/// Piper binary name.
pub const TTS_BINARY: &str = "piper";

/// Sample rate of Piper's raw output in Hz.
pub const TTS_SAMPLE_RATE: u32 = 22050;

/// Bytes per second of Piper raw output (16-bit mono at 22050 Hz).
pub const TTS_BYTES_PER_SEC: usize = (TTS_SAMPLE_RATE as usize) * 2;

/// Base seconds of synthesized audio read per utterance.
pub const TTS_WINDOW_BASE_SECS: f32 = 1.0;

/// Additional seconds of synthesized audio read per input character.
///
/// Hindi TTS output runs roughly 10-14 characters per second of speech;
/// 0.09 s/char overshoots slightly so short replies are not clipped.
pub const TTS_WINDOW_SECS_PER_CHAR: f32 = 0.09;

/// Upper bound on the synthesized-audio window in seconds.
pub const TTS_WINDOW_MAX_SECS: f32 = 8.0;

/// Default GPS serial device.
pub const GPS_PORT: &str = "/dev/serial0";

/// Default GPS serial baud rate.
pub const GPS_BAUD: u32 = 9600;

/// Lines read from the GPS feed before giving up on a fix.
///
/// At 9600 baud a receiver emits a sentence burst every second; 60 lines
/// covers several bursts without stalling the response for long.
pub const GPS_TIMEOUT_READS: usize = 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tts_bytes_per_sec_matches_s16le_mono() {
        assert_eq!(TTS_BYTES_PER_SEC, 44100);
    }

    #[test]
    fn capture_constants_are_sane() {
        assert!(SAMPLE_RATE >= 8000);
        assert!(BLOCK_SIZE > 0);
        assert!(RECORD_SECONDS > 0);
        assert!(CAPTURE_QUEUE_DEPTH > 0);
    }
}

//! Assistant entry point.
//!
//! Wires the full cycle together: capture → recognize → classify →
//! respond → speak, with GPS lookups behind the planner. Engine handles
//! live in an explicit [`VoiceLoop`] rather than process globals.

use crate::asr::recognizer::RecognizerConfig;
use crate::asr::vosk::VoskRecognizer;
use crate::audio::capture::{CpalAudioSource, suppress_audio_warnings};
use crate::audio::playback::AplayOutput;
use crate::audio::source::AudioSource;
use crate::config::Config;
use crate::error::{Result, SahayakError};
use crate::intent::classifier::IntentClassifier;
use crate::intent::planner::{Locator, NoLocator, ResponsePlanner};
use crate::output;
use crate::tts::piper::PiperSynthesizer;
use crate::tts::synthesizer::{SpeechSynthesizer, SynthesizerConfig};
use crate::voice_loop::{VoiceLoop, VoiceLoopConfig};
use std::sync::atomic::Ordering;

/// Run the assistant until the exit intent or Ctrl+C.
///
/// # Arguments
/// * `config` - Base configuration (CLI overrides already applied)
/// * `quiet` - Suppress status output
/// * `streaming` - Use the streaming driver instead of turn-based
/// * `push_to_talk` - Gate each turn on ENTER (turn-based only)
///
/// # Errors
/// Startup failures (microphone, recognizer model) are fatal and returned;
/// everything after startup degrades instead of erroring.
pub async fn run_assistant(
    config: Config,
    quiet: bool,
    streaming: bool,
    push_to_talk: bool,
) -> Result<()> {
    // Suppress noisy JACK/ALSA warnings before audio init
    suppress_audio_warnings();

    // Load the recognizer model first; it is the slow part, and a missing
    // model should fail before any device is touched.
    output::status(quiet, &format!("Loading model '{}'...", config.asr.model.display()));
    let recognizer = VoskRecognizer::new(RecognizerConfig {
        model_path: config.asr.model.clone(),
        sample_rate: config.audio.sample_rate,
    })?;

    let locator = build_locator(&config);
    let planner = ResponsePlanner::with_locator(locator);

    let mut synthesizer = PiperSynthesizer::new(
        SynthesizerConfig {
            binary: config.tts.binary.clone(),
            model: config.tts.model.clone(),
            sample_rate: config.tts.sample_rate,
        },
        AplayOutput::new(config.tts.playback_device.clone()),
    );

    // Warm up the TTS engine so the first real reply isn't penalized by
    // model load. A dead engine here is not fatal; replies degrade to
    // console output.
    if let Err(e) = synthesizer.speak("तैयार") {
        output::warn(&format!("speech output unavailable: {}", e));
    }

    let source: Box<dyn AudioSource> = Box::new(CpalAudioSource::new(
        config.audio.device.as_deref(),
        config.audio.sample_rate,
    )?);

    let mut voice_loop = VoiceLoop::new(
        Box::new(recognizer),
        IntentClassifier::new(),
        planner,
        Box::new(synthesizer),
        VoiceLoopConfig {
            sample_rate: config.audio.sample_rate,
            record_seconds: config.audio.record_seconds,
            push_to_talk,
            quiet,
        },
    );

    output::status(quiet, "Ready. Listening...");

    // Honor Ctrl+C at every suspension point via the shared flag.
    let shutdown = voice_loop.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.store(true, Ordering::SeqCst);
        }
    });

    let result = tokio::task::spawn_blocking(move || {
        if streaming {
            voice_loop.run_streaming(source)
        } else {
            let mut source = source;
            voice_loop.run_turn_based(source.as_mut())
        }
    })
    .await
    .map_err(|e| SahayakError::Other(format!("Voice loop task failed: {}", e)))?;

    output::status(quiet, "Shutting down...");
    result
}

/// Build the position lookup chain, degrading to "no fix" setups.
fn build_locator(config: &Config) -> Box<dyn Locator> {
    #[cfg(feature = "serial")]
    {
        use crate::gps::places::PlaceResolver;
        use crate::gps::reader::{GpsLocator, SerialLineSource};

        match SerialLineSource::open(&config.gps.port, config.gps.baud) {
            Ok(source) => {
                return Box::new(GpsLocator::new(
                    source,
                    PlaceResolver::new(),
                    config.gps.timeout_reads,
                ));
            }
            Err(e) => {
                output::warn(&format!(
                    "GPS unavailable ({}); location replies will report no fix",
                    e
                ));
            }
        }
    }

    #[cfg(not(feature = "serial"))]
    let _ = config;

    Box::new(NoLocator)
}

//! The interaction loop: capture → recognize → classify → respond → speak.
//!
//! Each cycle is strictly sequential: no two cycles' audio or response
//! processing ever overlap, which is also what lets the synthesizer and
//! GPS port run lock-free. The loop owns every stage as an explicit field
//! rather than sharing process-global engine handles; lifetime and reset
//! semantics stay visible and testable.

use crate::asr::recognizer::SpeechRecognizer;
use crate::audio::source::AudioSource;
use crate::defaults;
use crate::error::Result;
use crate::intent::classifier::IntentClassifier;
use crate::intent::planner::ResponsePlanner;
use crate::output;
use crate::tts::synthesizer::SpeechSynthesizer;
use crossbeam_channel::{RecvTimeoutError, bounded};
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Consecutive capture failures tolerated before the loop gives up.
const MAX_CONSECUTIVE_CAPTURE_ERRORS: u32 = 3;

/// Loop state, advanced strictly in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Listening,
    Recognizing,
    Classifying,
    Responding,
    Stopped,
}

/// Configuration for the interaction loop.
#[derive(Debug, Clone)]
pub struct VoiceLoopConfig {
    /// Capture sample rate in Hz (must match the recognizer's rate).
    pub sample_rate: u32,
    /// Recording duration per turn in the turn-based driver.
    pub record_seconds: u32,
    /// Wait for ENTER before each turn (turn-based driver only).
    pub push_to_talk: bool,
    /// Suppress console output.
    pub quiet: bool,
}

impl Default for VoiceLoopConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
            record_seconds: defaults::RECORD_SECONDS,
            push_to_talk: false,
            quiet: false,
        }
    }
}

/// Orchestrates one recognizer, classifier, planner and synthesizer into
/// the interaction cycle. Terminal state is reached only through the exit
/// intent's reply having been spoken, or the external shutdown flag.
pub struct VoiceLoop {
    recognizer: Box<dyn SpeechRecognizer>,
    classifier: IntentClassifier,
    planner: ResponsePlanner,
    synthesizer: Box<dyn SpeechSynthesizer>,
    config: VoiceLoopConfig,
    shutdown: Arc<AtomicBool>,
    state: LoopState,
}

impl VoiceLoop {
    pub fn new(
        recognizer: Box<dyn SpeechRecognizer>,
        classifier: IntentClassifier,
        planner: ResponsePlanner,
        synthesizer: Box<dyn SpeechSynthesizer>,
        config: VoiceLoopConfig,
    ) -> Self {
        Self {
            recognizer,
            classifier,
            planner,
            synthesizer,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
            state: LoopState::Idle,
        }
    }

    /// Current loop state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Flag honored at every suspension point; set it to unwind cleanly.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    fn should_stop(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Run the turn-based driver: block for a fixed-duration recording,
    /// then run the rest of the cycle synchronously.
    ///
    /// Exits when the exit intent's farewell has been spoken, the shutdown
    /// flag is raised, or a finite source is exhausted.
    pub fn run_turn_based(&mut self, source: &mut dyn AudioSource) -> Result<()> {
        let mut consecutive_errors: u32 = 0;

        loop {
            if self.should_stop() {
                self.state = LoopState::Stopped;
                break;
            }

            if self.config.push_to_talk {
                output::status(self.config.quiet, "Press ENTER to speak (Ctrl+C to exit)");
                let mut line = String::new();
                let _ = std::io::stdin().lock().read_line(&mut line);
                if self.should_stop() {
                    self.state = LoopState::Stopped;
                    break;
                }
            }

            self.state = LoopState::Listening;
            output::status(self.config.quiet, "🎤 बोलिए...");

            let audio = match self.record_fixed(source) {
                Ok(audio) => {
                    consecutive_errors = 0;
                    audio
                }
                Err(e) => {
                    // Abort this utterance and keep the loop alive, unless
                    // the device is persistently gone.
                    consecutive_errors += 1;
                    output::warn(&format!("audio capture failed: {}", e));
                    if consecutive_errors >= MAX_CONSECUTIVE_CAPTURE_ERRORS {
                        self.state = LoopState::Stopped;
                        return Err(e);
                    }
                    continue;
                }
            };

            if self.should_stop() {
                // Interrupted mid-recording; unwind without responding.
                self.state = LoopState::Stopped;
                break;
            }

            if audio.is_empty() {
                if source.is_finite() {
                    // Input exhausted; nothing more will arrive.
                    self.state = LoopState::Stopped;
                    break;
                }
                continue;
            }

            self.state = LoopState::Recognizing;
            self.recognizer.reset();
            let text = match self.recognizer.transcribe(&audio) {
                Ok(text) => text,
                Err(e) => {
                    output::warn(&format!("recognition failed: {}", e));
                    String::new()
                }
            };

            if text.is_empty() {
                output::status(self.config.quiet, "No speech detected.");
                self.state = LoopState::Idle;
                continue;
            }

            if self.respond(&text) {
                self.state = LoopState::Stopped;
                break;
            }
            self.state = LoopState::Idle;
        }

        Ok(())
    }

    /// Run the streaming driver: a producer thread pushes capture blocks
    /// into a bounded channel while this thread drives the recognizer's
    /// accumulate-and-finalize protocol.
    ///
    /// The producer blocks on a full channel (backpressure); blocks within
    /// an utterance are never dropped or reordered.
    pub fn run_streaming(&mut self, mut source: Box<dyn AudioSource>) -> Result<()> {
        source.start()?;
        let source_is_finite = source.is_finite();

        let (block_tx, block_rx) = bounded::<Vec<i16>>(defaults::CAPTURE_QUEUE_DEPTH);
        let producer_running = self.shutdown.clone();

        let producer = thread::spawn(move || {
            let poll_interval = Duration::from_millis(10);
            let mut consecutive_errors: u32 = 0;

            while !producer_running.load(Ordering::SeqCst) {
                let samples = match source.read_samples() {
                    Ok(s) => {
                        consecutive_errors = 0;
                        s
                    }
                    Err(e) => {
                        consecutive_errors += 1;
                        if consecutive_errors >= MAX_CONSECUTIVE_CAPTURE_ERRORS {
                            output::warn(&format!("audio capture failed repeatedly: {}", e));
                            break;
                        }
                        thread::sleep(poll_interval);
                        continue;
                    }
                };

                if samples.is_empty() {
                    if source_is_finite {
                        break;
                    }
                    thread::sleep(poll_interval);
                    continue;
                }

                // Blocking send: backpressure instead of silent drop.
                if block_tx.send(samples).is_err() {
                    break;
                }
            }

            if let Err(e) = source.stop() {
                output::warn(&format!("failed to stop audio capture: {}", e));
            }
        });

        self.state = LoopState::Listening;
        output::status(self.config.quiet, "🎤 बोलिए...");

        loop {
            if self.should_stop() {
                self.state = LoopState::Stopped;
                break;
            }

            let samples = match block_rx.recv_timeout(Duration::from_millis(100)) {
                Ok(samples) => samples,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    self.state = LoopState::Stopped;
                    break;
                }
            };

            self.state = LoopState::Recognizing;
            let result = match self.recognizer.feed(&samples) {
                Ok(result) => result,
                Err(e) => {
                    output::warn(&format!("recognition failed: {}", e));
                    self.recognizer.reset();
                    self.state = LoopState::Listening;
                    continue;
                }
            };

            if !result.finalized {
                continue;
            }

            if result.text.is_empty() {
                output::status(self.config.quiet, "No speech detected.");
                self.state = LoopState::Listening;
                continue;
            }

            if self.respond(&result.text) {
                self.state = LoopState::Stopped;
                // Unblock and retire the producer before returning.
                self.shutdown.store(true, Ordering::SeqCst);
                break;
            }
            self.state = LoopState::Listening;
        }

        // Drain the channel so a blocked producer can observe shutdown.
        while block_rx.try_recv().is_ok() {}
        if producer.join().is_err() {
            output::warn("capture thread panicked");
        }

        Ok(())
    }

    /// Record a fixed-duration utterance from the source.
    ///
    /// Returns early with the partial buffer when the shutdown flag is
    /// raised or a finite source runs dry.
    fn record_fixed(&mut self, source: &mut dyn AudioSource) -> Result<Vec<i16>> {
        let target = (self.config.sample_rate * self.config.record_seconds) as usize;
        let mut audio = Vec::with_capacity(target);

        source.start()?;

        while audio.len() < target {
            if self.should_stop() {
                break;
            }

            let samples = source.read_samples()?;
            if samples.is_empty() {
                if source.is_finite() {
                    break;
                }
                thread::sleep(Duration::from_millis(10));
                continue;
            }
            audio.extend_from_slice(&samples);
        }

        source.stop()?;
        Ok(audio)
    }

    /// Classify, plan, print and speak one reply.
    ///
    /// Returns true when the loop must stop (exit intent). The farewell is
    /// spoken before this returns, so termination never clips it.
    fn respond(&mut self, text: &str) -> bool {
        self.state = LoopState::Classifying;
        let intent = self.classifier.classify(text);
        output::heard(self.config.quiet, text, intent);

        self.state = LoopState::Responding;
        let reply = self.planner.plan(intent);
        output::reply(self.config.quiet, &reply.text);

        if let Err(e) = self.synthesizer.speak(&reply.text) {
            // The reply was already printed above, so degrade instead of crashing.
            output::warn(&format!("speech output unavailable: {}", e));
        }

        reply.exit
    }
}

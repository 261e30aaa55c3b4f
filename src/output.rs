//! Console rendering for the interaction loop.
//!
//! The process surface is voice-first; the console mirrors each cycle as
//! recognized text → intent → reply so a session can be followed without
//! speakers. All rendering respects the quiet flag.

use crate::intent::classifier::Intent;

#[cfg(feature = "cli")]
use owo_colors::OwoColorize;

/// Print a status line (startup, shutdown, prompts).
pub fn status(quiet: bool, message: &str) {
    if quiet {
        return;
    }
    #[cfg(feature = "cli")]
    eprintln!("{}", message.dimmed());
    #[cfg(not(feature = "cli"))]
    eprintln!("{}", message);
}

/// Print recognized text and the intent it classified to.
pub fn heard(quiet: bool, text: &str, intent: Intent) {
    if quiet {
        return;
    }
    #[cfg(feature = "cli")]
    println!("📝 {}  {}", text, format!("[{}]", intent).dimmed());
    #[cfg(not(feature = "cli"))]
    println!("📝 {}  [{}]", text, intent);
}

/// Print the planned reply.
pub fn reply(quiet: bool, text: &str) {
    if quiet {
        return;
    }
    println!("🤖 {}", text);
}

/// Print a runtime warning with the crate prefix.
pub fn warn(message: &str) {
    eprintln!("sahayak: {}", message);
}

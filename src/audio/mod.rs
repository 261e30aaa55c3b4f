//! Audio capture and playback.

#[cfg(feature = "cpal-audio")]
pub mod capture;
pub mod playback;
pub mod source;

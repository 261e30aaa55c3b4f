//! Command-line interface for sahayak
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Offline Hindi voice assistant with GPS place awareness
#[derive(Parser, Debug)]
#[command(
    name = "sahayak",
    version,
    about = "Offline Hindi voice assistant with GPS place awareness"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Audio input device (e.g., hw:0)
    #[arg(long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Vosk model directory (default: vosk-model-hi)
    #[arg(long, value_name = "DIR")]
    pub model: Option<PathBuf>,

    /// Piper voice model (default: hi_IN-pratham-medium.onnx)
    #[arg(long, value_name = "MODEL")]
    pub tts_model: Option<String>,

    /// GPS serial device (default: /dev/serial0)
    #[arg(long, value_name = "PORT")]
    pub gps_port: Option<String>,

    /// Recording duration per turn in seconds
    #[arg(long, short = 's', value_name = "SECONDS")]
    pub record_seconds: Option<u32>,

    /// Stream audio continuously instead of recording fixed turns
    #[arg(long)]
    pub streaming: bool,

    /// Wait for ENTER before each turn
    #[arg(long)]
    pub push_to_talk: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available audio input devices
    Devices,
}

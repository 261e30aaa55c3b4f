use anyhow::Result;
use clap::Parser;
use sahayak::app::run_assistant;
use sahayak::cli::{Cli, Commands};
use sahayak::config::Config;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            let config = load_config(cli.config.as_deref());
            let config = apply_overrides(config, &cli);
            run_assistant(config, cli.quiet, cli.streaming, cli.push_to_talk).await?;
        }
        Some(Commands::Devices) => {
            list_audio_devices()?;
        }
    }

    Ok(())
}

/// Load configuration from the given path or the default location.
fn load_config(path: Option<&Path>) -> Config {
    let config = match path {
        Some(path) => Config::load_or_default(path),
        None => Config::load_or_default(&Config::default_path()),
    };
    config.with_env_overrides()
}

/// Apply CLI flag overrides on top of the loaded configuration.
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(ref device) = cli.device {
        config.audio.device = Some(device.clone());
    }
    if let Some(ref model) = cli.model {
        config.asr.model = model.clone();
    }
    if let Some(ref model) = cli.tts_model {
        config.tts.model = model.clone();
    }
    if let Some(ref port) = cli.gps_port {
        config.gps.port = port.clone();
    }
    if let Some(seconds) = cli.record_seconds {
        config.audio.record_seconds = seconds;
    }
    config
}

/// Print the filtered input device list.
fn list_audio_devices() -> Result<()> {
    let devices = sahayak::audio::capture::list_devices()?;
    if devices.is_empty() {
        println!("No audio input devices found.");
    } else {
        println!("Available audio input devices:");
        for device in devices {
            println!("  {}", device);
        }
    }
    Ok(())
}

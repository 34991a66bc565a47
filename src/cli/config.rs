//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{is_valid_component_id, Config};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Matrix keypad component id
    #[arg(long, value_name = "ID")]
    keypad_id: Option<String>,

    /// Addressable LED strip id
    #[arg(long, value_name = "ID")]
    ledstrip_id: Option<String>,

    /// Script id run to blip a button LED
    #[arg(long, value_name = "ID")]
    blip_script: Option<String>,

    /// Global id holding the LED brightness
    #[arg(long, value_name = "ID")]
    brightness_id: Option<String>,

    /// Default output file for `generate`
    #[arg(long, value_name = "FILE")]
    default_output: Option<PathBuf>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    wiring: &'a crate::synth::Wiring,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_output: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let ids = [
            ("--keypad-id", &self.keypad_id),
            ("--ledstrip-id", &self.ledstrip_id),
            ("--blip-script", &self.blip_script),
            ("--brightness-id", &self.brightness_id),
        ];

        if ids.iter().all(|(_, value)| value.is_none()) && self.default_output.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --keypad-id, --ledstrip-id, --blip-script, --brightness-id, or --default-output",
            ));
        }

        for (flag, value) in ids {
            if let Some(value) = value {
                if !is_valid_component_id(value) {
                    return Err(CliError::validation(format!(
                        "Invalid {flag} '{value}': use letters, digits and underscores only"
                    )));
                }
            }
        }

        // Refuse to overwrite a config file that doesn't load cleanly
        let mut config = Config::load().map_err(|e| {
            CliError::validation(format!(
                "Failed to load configuration, leaving it untouched: {e:#}"
            ))
        })?;

        if let Some(id) = &self.keypad_id {
            config.wiring.keypad_id.clone_from(id);
        }
        if let Some(id) = &self.ledstrip_id {
            config.wiring.ledstrip_id.clone_from(id);
        }
        if let Some(id) = &self.blip_script {
            config.wiring.blip_script_id.clone_from(id);
        }
        if let Some(id) = &self.brightness_id {
            config.wiring.brightness_id.clone_from(id);
        }
        if let Some(path) = &self.default_output {
            config.output.default_output = Some(path.clone());
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn config_file_display() -> String {
    Config::config_file_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "(unknown)".to_string())
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        config_file: config_file_display(),
        wiring: &config.wiring,
        default_output: config
            .output
            .default_output
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("keypadgen Configuration");
    println!("=======================");
    println!();
    println!("File: {}", config_file_display());
    println!();

    println!("Wiring:");
    println!("  Keypad:        {}", config.wiring.keypad_id);
    println!("  LED strip:     {}", config.wiring.ledstrip_id);
    println!("  Blip script:   {}", config.wiring.blip_script_id);
    println!("  Brightness:    {}", config.wiring.brightness_id);
    println!();

    println!("Output:");
    if let Some(path) = &config.output.default_output {
        println!("  Default output: {}", path.display());
    } else {
        println!("  Default output: (stdout)");
    }
    println!();
}

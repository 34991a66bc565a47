//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::constants::{APP_CONFIG_DIR_NAME, CONFIG_DIR_ENV};
use crate::synth::Wiring;

/// Output settings for generated YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// File written by `generate` when no `--out` is given (stdout if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_output: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/keypadgen/config.toml`
/// - macOS: `~/Library/Application Support/keypadgen/config.toml`
/// - Windows: `%APPDATA%\keypadgen\config.toml`
///
/// `KEYPADGEN_CONFIG_DIR` overrides the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Device component ids referenced by generated fragments
    #[serde(default)]
    pub wiring: Wiring,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path, honoring `KEYPADGEN_CONFIG_DIR`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Every wiring id must be a valid ESPHome id (letters, digits and
    /// underscores, not starting with a digit).
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("keypad_id", &self.wiring.keypad_id),
            ("ledstrip_id", &self.wiring.ledstrip_id),
            ("blip_script_id", &self.wiring.blip_script_id),
            ("brightness_id", &self.wiring.brightness_id),
        ];

        for (field, value) in fields {
            if !is_valid_component_id(value) {
                anyhow::bail!(
                    "Invalid wiring.{field} '{value}': ids may only contain letters, digits and underscores and must not start with a digit"
                );
            }
        }

        Ok(())
    }
}

/// Returns true if `id` is usable as an ESPHome component id.
#[must_use]
pub fn is_valid_component_id(id: &str) -> bool {
    static COMPONENT_ID: OnceLock<Regex> = OnceLock::new();
    COMPONENT_ID
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
        .is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_component_id_rules() {
        for _ in 0..2 {
            assert!(is_valid_component_id("keypad"));
            assert!(is_valid_component_id("_strip_2"));
            assert!(!is_valid_component_id("2strip"));
            assert!(!is_valid_component_id("my strip"));
            assert!(!is_valid_component_id(""));
        }
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.wiring, Wiring::default());
        assert_eq!(config.wiring.keypad_id, "keypad");
        assert_eq!(config.wiring.ledstrip_id, "ledstrip");
        assert_eq!(config.wiring.blip_script_id, "blip_light");
        assert_eq!(config.wiring.brightness_id, "brightness");
        assert_eq!(config.output.default_output, None);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());

        config.wiring.ledstrip_id = "led strip".to_string();
        assert!(config.validate().is_err());

        config.wiring.ledstrip_id = "1strip".to_string();
        assert!(config.validate().is_err());

        config.wiring.ledstrip_id = String::new();
        assert!(config.validate().is_err());

        config.wiring.ledstrip_id = "strip_1".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[wiring]\nledstrip_id = \"front_leds\"\n").unwrap();
        assert_eq!(config.wiring.ledstrip_id, "front_leds");
        assert_eq!(config.wiring.keypad_id, "keypad");
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.wiring.brightness_id = "led_level".to_string();
        config.output.default_output = Some(PathBuf::from("keypad.yaml"));

        // Manually save to temp location for testing
        let content = toml::to_string_pretty(&config).unwrap();
        fs::write(&config_file, content).unwrap();

        let content = fs::read_to_string(&config_file).unwrap();
        let loaded: Config = toml::from_str(&content).unwrap();

        assert_eq!(loaded, config);
    }
}

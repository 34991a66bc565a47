//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use keypadgen::models::{ButtonEntry, ButtonSettings, Label};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the keypadgen binary
pub fn keypadgen_bin() -> &'static str {
    env!("CARGO_BIN_EXE_keypadgen")
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(keypadgen_bin());
    cmd.env("KEYPADGEN_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Builds an entry the way the keypad editor saves it.
pub fn entry(settings: ButtonSettings, label: Option<&str>) -> ButtonEntry {
    ButtonEntry {
        key_num: Some(settings.num),
        component: settings,
        label: label.map(|text| Label {
            icon: "mdi:gesture-tap".to_string(),
            text: text.to_string(),
            font_size: 14.0,
        }),
    }
}

/// A small mixed batch: plain, toggle + state mirror, hidden brightness mirror.
pub fn test_buttons_basic() -> Vec<ButtonEntry> {
    vec![
        entry(ButtonSettings::new(1), Some("Scene_Off")),
        entry(
            ButtonSettings {
                toggle: true,
                follow_state: true,
                ..ButtonSettings::new(2).with_entity("light.kitchen")
            },
            Some("Kitchen\nLight"),
        ),
        entry(
            ButtonSettings {
                expose: false,
                blip_on_press: false,
                follow_brightness: true,
                ..ButtonSettings::new(13).with_entity("light.desk")
            },
            None,
        ),
    ]
}

/// A batch with a duplicate button number.
pub fn test_buttons_duplicate() -> Vec<ButtonEntry> {
    vec![
        entry(ButtonSettings::new(5), Some("First")),
        entry(ButtonSettings::new(5), Some("Second")),
    ]
}

/// A batch that is valid but produces warnings.
pub fn test_buttons_with_warnings() -> Vec<ButtonEntry> {
    vec![entry(
        ButtonSettings {
            toggle: true,
            follow_color: true,
            ..ButtonSettings::new(7)
        },
        Some("Unbound"),
    )]
}

/// Writes entries as JSON to a temp file.
pub fn create_temp_buttons_file(entries: &[ButtonEntry]) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("buttons.json");
    let json = serde_json::to_string_pretty(entries).expect("Failed to serialize buttons");
    fs::write(&path, json).expect("Failed to write buttons file");
    (path, temp_dir)
}

/// Writes raw content to a temp file with the given name.
pub fn create_temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write file");
    (path, temp_dir)
}

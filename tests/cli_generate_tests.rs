//! End-to-end tests for `keypadgen generate` command.

use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_generate_to_stdout() {
    let (buttons_path, _buttons_temp) = create_temp_buttons_file(&test_buttons_basic());
    let config_dir = TempDir::new().unwrap();

    let output = isolated_command(
        &["generate", "--buttons", buttons_path.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Generation should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Generated by keypadgen"));
    assert!(stdout.contains("binary_sensor:"));
    assert!(stdout.contains("id: keypad_button_01"));
    assert!(stdout.contains("name: Button 01 Scene Off"));
    assert!(stdout.contains("name: Button 02 Kitchen Light"));
    assert!(stdout.contains("id: keypad_button_02_light"));
    assert!(stdout.contains("id: keypad_button_2_hass"));
    assert!(stdout.contains("id: keypad_button_13_hass_brightness"));
    assert!(!stdout.contains("keypad_button_13_light"));
}

#[test]
fn test_generate_output_parses_as_yaml() {
    let (buttons_path, _buttons_temp) = create_temp_buttons_file(&test_buttons_basic());
    let config_dir = TempDir::new().unwrap();

    let output = isolated_command(
        &["generate", "--buttons", buttons_path.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let doc: serde_yml::Value = serde_yml::from_str(&stdout).expect("Output should be YAML");

    let sensors = doc["binary_sensor"].as_sequence().expect("binary_sensor list");
    assert_eq!(sensors.len(), 3);
    assert_eq!(sensors[0]["platform"].as_str(), Some("matrix_keypad"));
    assert_eq!(sensors[0]["key"].as_str(), Some("A"));
    assert_eq!(sensors[2]["key"].as_str(), Some("M"));
    assert_eq!(sensors[2]["internal"].as_bool(), Some(true));

    let lights = doc["light"].as_sequence().expect("light list");
    assert_eq!(lights.len(), 2);
    assert_eq!(lights[1]["segments"][0]["from"].as_u64(), Some(1));

    assert_eq!(doc["text_sensor"].as_sequence().map(Vec::len), Some(1));
    assert_eq!(
        doc["sensor"][0]["attribute"].as_str(),
        Some("brightness")
    );
}

#[test]
fn test_generate_to_file_deterministic() {
    let (buttons_path, buttons_temp) = create_temp_buttons_file(&test_buttons_basic());
    let config_dir = TempDir::new().unwrap();
    let out_path = buttons_temp.path().join("keypad.yaml");

    let run = || {
        let output = isolated_command(
            &[
                "generate",
                "--buttons",
                buttons_path.to_str().unwrap(),
                "--out",
                out_path.to_str().unwrap(),
                "--deterministic",
            ],
            config_dir.path(),
        )
        .output()
        .expect("Failed to execute command");
        assert_eq!(
            output.status.code(),
            Some(0),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        fs::read_to_string(&out_path).expect("Output file should exist")
    };

    let first = run();
    let second = run();
    assert!(first.contains("# Generated: <timestamp>"));
    assert_eq!(first, second, "Deterministic output should be stable");
}

#[test]
fn test_generate_uses_configured_wiring() {
    let (buttons_path, _buttons_temp) = create_temp_buttons_file(&test_buttons_basic());
    let config_dir = TempDir::new().unwrap();
    fs::write(
        config_dir.path().join("config.toml"),
        "[wiring]\nledstrip_id = \"front_leds\"\nblip_script_id = \"flash_key\"\n",
    )
    .unwrap();

    let output = isolated_command(
        &["generate", "--buttons", buttons_path.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("id: front_leds"));
    assert!(stdout.contains("id: flash_key"));
    assert!(!stdout.contains("id: ledstrip"));
}

#[test]
fn test_generate_rejects_duplicates() {
    let (buttons_path, _buttons_temp) = create_temp_buttons_file(&test_buttons_duplicate());
    let config_dir = TempDir::new().unwrap();

    let output = isolated_command(
        &["generate", "--buttons", buttons_path.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Duplicate Button"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_generate_missing_file() {
    let config_dir = TempDir::new().unwrap();
    let missing = config_dir.path().join("nope.yaml");

    let output = isolated_command(
        &["generate", "--buttons", missing.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_generate_from_yaml_input() {
    let (buttons_path, _temp) = create_temp_file(
        "buttons.yml",
        "buttons:\n  - component:\n      num: 24\n      expose: false\n      blip_on_press: false\n",
    );
    let config_dir = TempDir::new().unwrap();

    let output = isolated_command(
        &["generate", "--buttons", buttons_path.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("id: keypad_button_24"));
    assert!(stdout.contains("on_press: []"));
    assert!(!stdout.contains("light:"));
}

#[test]
fn test_fixture_buttons_load_back_unchanged() {
    let entries = test_buttons_basic();
    let (path, _temp_dir) = create_temp_buttons_file(&entries);
    let loaded = keypadgen::parser::load_buttons(&path).unwrap();
    assert_eq!(loaded, entries);
}

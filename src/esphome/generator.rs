//! ESPHome document generation for a batch of buttons.
//!
//! Each button is synthesized on its own; the resulting fragments are then
//! grouped under their component domains in first-appearance order, keeping
//! each button's emission order within a domain.

// Allow format! appended to String - more readable for building the header
#![allow(clippy::format_push_string)]

use anyhow::{Context, Result};
use chrono::Local;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::validator::ButtonValidator;
use crate::constants::APP_NAME;
use crate::models::{ButtonEntry, Fragment};
use crate::synth::{self, EsphomeComponents, Wiring};

/// Fragments listed under one ESPHome domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Domain key, e.g. `binary_sensor`
    pub domain: &'static str,
    /// Fragments in emission order
    pub fragments: Vec<Fragment>,
}

/// Generated document: domain sections in first-appearance order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Domain sections
    pub sections: Vec<Section>,
}

impl Document {
    /// Appends a fragment under its domain.
    pub fn push(&mut self, fragment: Fragment) {
        let domain = fragment.domain();
        match self.sections.iter_mut().find(|s| s.domain == domain) {
            Some(section) => section.fragments.push(fragment),
            None => self.sections.push(Section {
                domain,
                fragments: vec![fragment],
            }),
        }
    }

    /// Returns the section for a domain.
    #[must_use]
    pub fn section(&self, domain: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.domain == domain)
    }

    /// Total number of fragments.
    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.sections.iter().map(|s| s.fragments.len()).sum()
    }

    /// Iterates all fragments, section by section.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.sections.iter().flat_map(|s| s.fragments.iter())
    }
}

/// A fragment as listed in YAML, with its platform key first.
#[derive(Serialize)]
struct PlatformEntry<'a> {
    platform: &'static str,
    #[serde(flatten)]
    fragment: &'a Fragment,
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            let entries: Vec<PlatformEntry<'_>> = section
                .fragments
                .iter()
                .map(|fragment| PlatformEntry {
                    platform: fragment.platform(),
                    fragment,
                })
                .collect();
            map.serialize_entry(section.domain, &entries)?;
        }
        map.end()
    }
}

/// ESPHome generator for a batch of button entries.
pub struct EsphomeGenerator<'a> {
    entries: &'a [ButtonEntry],
    wiring: &'a Wiring,
}

impl<'a> EsphomeGenerator<'a> {
    /// Creates a generator over a batch.
    #[must_use]
    pub const fn new(entries: &'a [ButtonEntry], wiring: &'a Wiring) -> Self {
        Self { entries, wiring }
    }

    /// Synthesizes every button in the batch.
    ///
    /// Refuses batches that fail validation; synthesis itself assumes valid
    /// button numbers.
    pub fn generate(&self) -> Result<Document> {
        let report = ButtonValidator::new(self.entries).validate();
        if !report.is_valid() {
            anyhow::bail!(
                "Button list failed validation:\n{}",
                report.format_message()
            );
        }
        for warning in &report.warnings {
            tracing::warn!("{warning}");
        }

        let mut document = Document::default();
        for entry in self.entries {
            let fragments = self.synthesize_entry(entry);
            tracing::debug!(
                button = entry.component.num,
                fragments = fragments.len(),
                "synthesized button"
            );
            for fragment in fragments {
                document.push(fragment);
            }
        }

        tracing::info!(
            buttons = self.entries.len(),
            fragments = document.fragment_count(),
            "generated ESPHome document"
        );

        Ok(document)
    }

    /// Synthesizes the fragments of a single entry.
    #[must_use]
    pub fn synthesize_entry(&self, entry: &ButtonEntry) -> Vec<Fragment> {
        synth::synthesize_with(&entry.to_config(), self.wiring, &EsphomeComponents)
    }

    /// Finds the entry configuring button `num`.
    #[must_use]
    pub fn entry_for(&self, num: u8) -> Option<&'a ButtonEntry> {
        self.entries.iter().find(|entry| entry.component.num == num)
    }

    /// Renders a document as an ESPHome YAML include.
    pub fn render_yaml(&self, document: &Document) -> Result<String> {
        let body = serde_yml::to_string(document).context("Failed to serialize ESPHome YAML")?;

        let mut output = String::new();
        output.push_str(&format!(
            "# Generated by {} v{}\n",
            APP_NAME,
            env!("CARGO_PKG_VERSION")
        ));
        output.push_str(&format!(
            "# Generated: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        output.push_str(&format!("# Buttons: {}\n\n", self.entries.len()));
        output.push_str(&body);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ButtonSettings, Label};

    fn entries() -> Vec<ButtonEntry> {
        vec![
            ButtonEntry {
                key_num: Some(1),
                component: ButtonSettings {
                    toggle: true,
                    follow_state: true,
                    ..ButtonSettings::new(1).with_entity("light.kitchen")
                },
                label: Some(Label::text("Kitchen")),
            },
            ButtonEntry {
                key_num: Some(2),
                component: ButtonSettings {
                    expose: false,
                    follow_brightness: true,
                    ..ButtonSettings::new(2).with_entity("light.desk")
                },
                label: None,
            },
        ]
    }

    #[test]
    fn test_generate_groups_by_domain() {
        let entries = entries();
        let wiring = Wiring::default();
        let document = EsphomeGenerator::new(&entries, &wiring).generate().unwrap();

        let domains: Vec<&str> = document.sections.iter().map(|s| s.domain).collect();
        assert_eq!(domains, vec!["binary_sensor", "light", "text_sensor", "sensor"]);

        let sensors = document.section("binary_sensor").unwrap();
        let ids: Vec<&str> = sensors.fragments.iter().map(Fragment::id).collect();
        assert_eq!(ids, vec!["keypad_button_01", "keypad_button_02"]);

        assert_eq!(document.section("light").unwrap().fragments.len(), 1);
        assert_eq!(document.fragment_count(), 5);
    }

    #[test]
    fn test_generate_rejects_invalid_batch() {
        let mut entries = entries();
        entries[1].component.num = 1;
        let wiring = Wiring::default();
        let err = EsphomeGenerator::new(&entries, &wiring)
            .generate()
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate Button"));
    }

    #[test]
    fn test_render_yaml() {
        let entries = entries();
        let wiring = Wiring::default();
        let generator = EsphomeGenerator::new(&entries, &wiring);
        let yaml = generator
            .render_yaml(&generator.generate().unwrap())
            .unwrap();

        assert!(yaml.starts_with("# Generated by keypadgen"));
        assert!(yaml.contains("# Generated: "));
        assert!(yaml.contains("binary_sensor:"));
        assert!(yaml.contains("platform: matrix_keypad"));
        assert!(yaml.contains("id: keypad_button_01"));
        assert!(yaml.contains("name: Button 01 Kitchen"));
        assert!(yaml.contains("platform: partition"));
        assert!(yaml.contains("script.execute:"));
        assert!(yaml.contains("homeassistant.service:"));
        assert!(yaml.contains("id: keypad_button_1_hass"));
        assert!(yaml.contains("id: keypad_button_2_hass_brightness"));
        assert!(yaml.contains("!lambda"));
    }

    #[test]
    fn test_entry_for() {
        let entries = entries();
        let wiring = Wiring::default();
        let generator = EsphomeGenerator::new(&entries, &wiring);
        assert_eq!(generator.entry_for(2).map(|e| e.component.num), Some(2));
        assert!(generator.entry_for(3).is_none());
    }
}

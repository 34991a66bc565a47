//! Inspect command: show the fragments one button expands into.

use crate::cli::common::{load_error, CliError, CliResult};
use crate::config::Config;
use crate::esphome::{Document, EsphomeGenerator};
use crate::models::keypad::{self, BUTTON_COUNT};
use crate::models::Fragment;
use crate::parser;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show the fragments generated for a single button
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to button list (.yaml, .yml, .json or .json5)
    #[arg(short, long, value_name = "FILE")]
    pub buttons: PathBuf,

    /// Button number (1-24)
    #[arg(short, long, value_name = "N")]
    pub num: u8,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InspectFragment<'a> {
    domain: &'static str,
    platform: &'static str,
    #[serde(flatten)]
    fragment: &'a Fragment,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        if !keypad::is_valid_button(self.num) {
            return Err(CliError::validation(format!(
                "Button number {} is outside 1..={BUTTON_COUNT}",
                self.num
            )));
        }

        let entries = parser::load_buttons(&self.buttons).map_err(|e| load_error(&e))?;
        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        let generator = EsphomeGenerator::new(&entries, &config.wiring);
        let entry = generator.entry_for(self.num).ok_or_else(|| {
            CliError::validation(format!("Button {} is not defined in the list", self.num))
        })?;

        if let Some(entity) = entry.component.entity() {
            if !crate::esphome::validator::is_valid_entity_id(entity) {
                return Err(CliError::validation(format!(
                    "Button {}: '{entity}' is not a valid entity id",
                    self.num
                )));
            }
        }

        let fragments = generator.synthesize_entry(entry);

        if self.json {
            let output: Vec<InspectFragment<'_>> = fragments
                .iter()
                .map(|fragment| InspectFragment {
                    domain: fragment.domain(),
                    platform: fragment.platform(),
                    fragment,
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            println!("Button {:02} (key {})", self.num, keypad::key_for(self.num));
            for fragment in &fragments {
                println!("  {:<12} {}", fragment.domain(), fragment.id());
            }
            println!();

            let mut document = Document::default();
            for fragment in fragments {
                document.push(fragment);
            }
            let yaml = serde_yml::to_string(&document)
                .map_err(|e| CliError::io(format!("Failed to serialize YAML: {e}")))?;
            print!("{yaml}");
        }

        Ok(())
    }
}

//! Generate command for ESPHome YAML.

use crate::cli::common::{load_error, CliError, CliResult};
use crate::config::Config;
use crate::esphome::EsphomeGenerator;
use crate::parser;
use clap::Args;
use std::path::PathBuf;

/// Generate ESPHome fragments for a button list
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to button list (.yaml, .yml, .json or .json5)
    #[arg(short, long, value_name = "FILE")]
    pub buttons: PathBuf,

    /// Output file (defaults to the configured output, else stdout)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Use a stable timestamp for deterministic output (for testing)
    #[arg(long)]
    pub deterministic: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let entries = parser::load_buttons(&self.buttons).map_err(|e| load_error(&e))?;

        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        let generator = EsphomeGenerator::new(&entries, &config.wiring);
        let document = generator
            .generate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let yaml = generator
            .render_yaml(&document)
            .map_err(|e| CliError::io(format!("Failed to render YAML: {e:#}")))?;
        let yaml = if self.deterministic {
            normalize_for_deterministic(&yaml)
        } else {
            yaml
        };

        match self.out.as_ref().or(config.output.default_output.as_ref()) {
            Some(path) => {
                std::fs::write(path, yaml).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                eprintln!(
                    "✓ Generated {} fragments for {} buttons",
                    document.fragment_count(),
                    entries.len()
                );
                eprintln!("  Output: {}", path.display());
            }
            None => print!("{yaml}"),
        }

        Ok(())
    }
}

/// Normalize generated YAML for deterministic output (remove timestamps)
fn normalize_for_deterministic(content: &str) -> String {
    let mut normalized = content
        .lines()
        .map(|line| {
            if line.starts_with("# Generated:") {
                "# Generated: <timestamp>"
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    normalized.push('\n');
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_for_deterministic() {
        let input = "# Generated by keypadgen v0.1.0\n# Generated: 2026-01-01 10:00:00\nlight: []\n";
        let output = normalize_for_deterministic(input);
        assert_eq!(
            output,
            "# Generated by keypadgen v0.1.0\n# Generated: <timestamp>\nlight: []\n"
        );
    }
}

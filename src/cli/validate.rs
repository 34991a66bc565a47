//! Validation command for button lists.

use crate::cli::common::{load_error, CliError, CliResult};
use crate::esphome::validator::{ButtonValidator, ValidationErrorKind};
use crate::parser;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a button list for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to button list (.yaml, .yml, .json or .json5)
    #[arg(short, long, value_name = "FILE")]
    pub buttons: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// Per-category check outcome.
#[derive(Debug, Serialize)]
struct ValidationChecks {
    ranges: String,
    duplicates: String,
    entities: String,
}

impl ValidationChecks {
    fn all_passed() -> Self {
        Self {
            ranges: "passed".to_string(),
            duplicates: "passed".to_string(),
            entities: "passed".to_string(),
        }
    }
}

/// Location of a problem within the batch.
#[derive(Debug, Serialize)]
struct ValidationLocation {
    entry: usize,
    button: u8,
}

#[derive(Debug, Serialize)]
struct ValidationMessage {
    severity: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<ValidationLocation>,
}

#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    buttons: usize,
    errors: Vec<ValidationMessage>,
    checks: ValidationChecks,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let entries = parser::load_buttons(&self.buttons).map_err(|e| load_error(&e))?;

        let report = ButtonValidator::new(&entries).validate();

        let mut checks = ValidationChecks::all_passed();
        let mut messages = Vec::new();

        for error in &report.errors {
            match error.kind {
                ValidationErrorKind::ButtonOutOfRange => checks.ranges = "failed".to_string(),
                ValidationErrorKind::DuplicateButton => checks.duplicates = "failed".to_string(),
                ValidationErrorKind::InvalidEntity => checks.entities = "failed".to_string(),
            }

            let location = match (error.entry, error.button) {
                (Some(entry), Some(button)) => Some(ValidationLocation {
                    entry: entry + 1,
                    button,
                }),
                _ => None,
            };

            messages.push(ValidationMessage {
                severity: "error".to_string(),
                message: error.to_string(),
                location,
            });
        }

        for warning in &report.warnings {
            messages.push(ValidationMessage {
                severity: "warning".to_string(),
                message: warning.message.clone(),
                location: None,
            });
        }

        let response = ValidationResponse {
            valid: report.is_valid(),
            buttons: entries.len(),
            errors: messages,
            checks,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed ({} buttons)", response.buttons);
            } else {
                println!("✗ Validation failed");
            }

            println!("\nChecks:");
            println!("  Ranges:     {}", response.checks.ranges);
            println!("  Duplicates: {}", response.checks.duplicates);
            println!("  Entities:   {}", response.checks.entities);

            if !response.errors.is_empty() {
                println!("\nIssues:");
                for msg in &response.errors {
                    let prefix = if msg.severity == "error" {
                        "  ✗"
                    } else {
                        "  ⚠"
                    };
                    println!("{prefix} {}", msg.message);
                }
            }
        }

        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "{} validation error(s)",
                report.errors.len()
            )));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation(format!(
                "{} warning(s) in strict mode",
                report.warnings.len()
            )));
        }

        Ok(())
    }
}

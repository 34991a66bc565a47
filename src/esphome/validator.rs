//! Batch validation before fragment synthesis.
//!
//! Synthesis trusts its input: every id derives from `num`, so an
//! out-of-range or repeated number would either panic or silently produce
//! colliding fragments. The validator catches those cases up front.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::models::keypad::{self, BUTTON_COUNT};
use crate::models::ButtonEntry;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Problems that block generation
    pub errors: Vec<ValidationError>,
    /// Non-blocking findings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Zero-based index of the offending entry in the batch
    pub entry: Option<usize>,
    /// Button number of the offending entry
    pub button: Option<u8>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            entry: None,
            button: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the entry context.
    #[must_use]
    pub const fn with_entry(mut self, entry: usize, button: u8) -> Self {
        self.entry = Some(entry);
        self.button = Some(button);
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(entry), Some(button)) = (self.entry, self.button) {
            write!(
                f,
                "[Entry {} / Button {}] {}: {}",
                entry + 1,
                button,
                self.kind,
                self.message
            )?;
        } else {
            write!(f, "{}: {}", self.kind, self.message)?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Button number outside the keypad
    ButtonOutOfRange,
    /// Two entries share a button number
    DuplicateButton,
    /// `ha_entity` is not `<domain>.<object_id>`
    InvalidEntity,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ButtonOutOfRange => write!(f, "Button Out of Range"),
            Self::DuplicateButton => write!(f, "Duplicate Button"),
            Self::InvalidEntity => write!(f, "Invalid Entity"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Returns true if `entity` looks like a Home Assistant entity id.
#[must_use]
pub fn is_valid_entity_id(entity: &str) -> bool {
    static ENTITY_ID: OnceLock<Regex> = OnceLock::new();
    ENTITY_ID
        .get_or_init(|| Regex::new(r"^[a-z0-9_]+\.[a-z0-9_]+$").unwrap())
        .is_match(entity)
}

/// Validates a batch of button entries.
pub struct ButtonValidator<'a> {
    entries: &'a [ButtonEntry],
}

impl<'a> ButtonValidator<'a> {
    /// Creates a validator over a batch.
    #[must_use]
    pub const fn new(entries: &'a [ButtonEntry]) -> Self {
        Self { entries }
    }

    /// Validates the batch.
    ///
    /// Checks:
    /// - Every button number addresses a physical key
    /// - No two entries share a button number
    /// - Bound entities are well-formed
    ///
    /// Warns about inert settings: Home Assistant options without an entity,
    /// `follow_color`, and editor slots that disagree with `num`.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if self.entries.is_empty() {
            report.add_warning(ValidationWarning::new(
                "Button list is empty; nothing will be generated",
            ));
        }

        let mut first_seen: HashMap<u8, usize> = HashMap::new();

        for (idx, entry) in self.entries.iter().enumerate() {
            let settings = &entry.component;
            let num = settings.num;

            if !keypad::is_valid_button(num) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::ButtonOutOfRange,
                        format!("Button number {num} is outside 1..={BUTTON_COUNT}"),
                    )
                    .with_entry(idx, num)
                    .with_suggestion(format!("Use a number between 1 and {BUTTON_COUNT}")),
                );
            }

            if let Some(first) = first_seen.get(&num) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateButton,
                        format!("Button {num} is already defined by entry {}", first + 1),
                    )
                    .with_entry(idx, num)
                    .with_suggestion("Each button number may appear only once"),
                );
            } else {
                first_seen.insert(num, idx);
            }

            self.validate_binding(&mut report, idx, entry);

            if settings.follow_color {
                report.add_warning(ValidationWarning::new(format!(
                    "Button {num}: follow_color is not supported yet and is ignored"
                )));
            }

            if let Some(key_num) = entry.key_num {
                if key_num != num {
                    report.add_warning(ValidationWarning::new(format!(
                        "Entry {} is stored in key slot {key_num} but configures button {num}; ids follow the button number",
                        idx + 1
                    )));
                }
            }
        }

        report
    }

    /// Checks the Home Assistant binding of one entry.
    fn validate_binding(&self, report: &mut ValidationReport, idx: usize, entry: &ButtonEntry) {
        let settings = &entry.component;
        let num = settings.num;

        match settings.entity() {
            Some(entity) => {
                if !is_valid_entity_id(entity) {
                    report.add_error(
                        ValidationError::new(
                            ValidationErrorKind::InvalidEntity,
                            format!("'{entity}' is not a valid entity id"),
                        )
                        .with_entry(idx, num)
                        .with_suggestion("Entity ids look like 'light.kitchen'"),
                    );
                }
            }
            None => {
                let unbound: Vec<&str> = [
                    ("toggle", settings.toggle),
                    ("follow_state", settings.follow_state),
                    ("follow_brightness", settings.follow_brightness),
                ]
                .into_iter()
                .filter_map(|(name, enabled)| enabled.then_some(name))
                .collect();

                if !unbound.is_empty() {
                    report.add_warning(ValidationWarning::new(format!(
                        "Button {num}: {} set without ha_entity and will be ignored",
                        unbound.join(", ")
                    )));
                }
            }
        }
    }
}

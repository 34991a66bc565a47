//! Shared CLI error and exit-code types.

use std::fmt;

use crate::parser::EntryError;

/// Process exit codes used by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was understood but rejected (invalid buttons, bad arguments)
    ValidationError = 1,
    /// Files could not be read, written or parsed
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI command handlers.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code to terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.kind
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Maps a button loading failure to a CLI error.
///
/// Entries that parse but don't fit the button model are validation errors;
/// unreadable or malformed files are I/O errors.
pub fn load_error(err: &anyhow::Error) -> CliError {
    let message = format!("Failed to load buttons: {err:#}");
    if err.chain().any(|cause| cause.is::<EntryError>()) {
        CliError::validation(message)
    } else {
        CliError::io(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(CliError::validation("bad").exit_code().code(), 1);
        assert_eq!(CliError::io("missing").exit_code().code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_load_error_classification() {
        let bad_entry = anyhow::Error::new(EntryError {
            entry: 3,
            field: Some("component.toggle".to_string()),
            message: "invalid type".to_string(),
        })
        .context("Failed to load buttons from b.json");
        let err = load_error(&bad_entry);
        assert_eq!(err.exit_code(), ExitCode::ValidationError);
        assert!(err.message.contains("Entry 3, field `component.toggle`"));

        let unreadable = anyhow::anyhow!("Failed to read button file: b.json");
        assert_eq!(load_error(&unreadable).exit_code(), ExitCode::IoError);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(CliError::io("Failed to read").to_string(), "Failed to read");
    }
}

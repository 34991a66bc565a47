//! CLI command handlers for keypadgen.
//!
//! Each subcommand loads a button list, runs it through validation and
//! synthesis, and reports in human-readable or JSON form.

pub mod common;
pub mod config;
pub mod generate;
pub mod inspect;
pub mod map;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use generate::GenerateArgs;
pub use inspect::InspectArgs;
pub use map::MapArgs;
pub use validate::ValidateArgs;

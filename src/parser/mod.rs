//! Parsing for button batch files.
//!
//! This module reads the keypad editor's saved button lists from YAML, JSON
//! or JSON5.

pub mod buttons;

// Re-export commonly used functions
pub use buttons::{load_buttons, parse_buttons, BatchFormat, EntryError};

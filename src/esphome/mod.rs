//! ESPHome output for button batches.
//!
//! This module validates batches and turns their synthesized fragments into
//! an ESPHome YAML include.

pub mod generator;
pub mod validator;

// Re-export esphome types
pub use generator::{Document, EsphomeGenerator, Section};
pub use validator::{ButtonValidator, ValidationReport};

//! keypadgen library
//!
//! Expands declarative keypad button definitions into ESPHome configuration
//! fragments: matrix keypad sensors, per-button partition lights and Home
//! Assistant state mirrors. The [`synth`] module holds the pure expansion;
//! the other modules load batches, validate them and render YAML.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod esphome;
pub mod export;
pub mod models;
pub mod parser;
pub mod synth;

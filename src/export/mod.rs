//! Human-readable exports for button batches.
//!
//! Currently the keypad map, which places each configured button on the
//! physical grid.

pub mod keypad_map;

pub use keypad_map::render_keypad_map;

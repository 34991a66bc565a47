//! Data models for keypad buttons and the fragments they expand into.
//!
//! Models are independent of file formats and the CLI.

pub mod button;
pub mod fragment;
pub mod keypad;

// Re-export all model types
pub use button::{ButtonConfig, ButtonEntry, ButtonSettings, Label};
pub use fragment::{
    Action, AddressableSet, Fragment, HomeassistantSensor, HomeassistantTextSensor,
    KeypadBinarySensor, Lambda, PartitionLight, Segment,
};
pub use keypad::{BUTTON_COUNT, BUTTON_NUMBERS, KEY_ALPHABET};

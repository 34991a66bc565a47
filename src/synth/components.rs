//! Fragment constructors and the ids fragments are wired to.

use crate::models::{
    Fragment, HomeassistantSensor, HomeassistantTextSensor, KeypadBinarySensor, PartitionLight,
};
use serde::{Deserialize, Serialize};

/// Ids of the device components every button fragment references.
///
/// These are defined elsewhere in the device config; the defaults match the
/// stock keypad firmware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wiring {
    /// `matrix_keypad` component id
    pub keypad_id: String,
    /// Addressable LED strip id
    pub ledstrip_id: String,
    /// Script that blips one LED, taking `led_index`
    pub blip_script_id: String,
    /// Global holding the configured LED brightness
    pub brightness_id: String,
}

impl Default for Wiring {
    fn default() -> Self {
        Self {
            keypad_id: "keypad".to_string(),
            ledstrip_id: "ledstrip".to_string(),
            blip_script_id: "blip_light".to_string(),
            brightness_id: "brightness".to_string(),
        }
    }
}

/// Constructors for the four fragment kinds a button can expand into.
///
/// Synthesis only decides which fragments exist and how they are wired;
/// the component set decides what a constructed fragment is.
pub trait ComponentSet {
    /// Constructed fragment type
    type Fragment;

    /// Builds a matrix keypad binary sensor.
    fn keypad_binary_sensor(&self, opts: KeypadBinarySensor) -> Self::Fragment;

    /// Builds a partition light.
    fn partition_light(&self, opts: PartitionLight) -> Self::Fragment;

    /// Builds a Home Assistant text sensor.
    fn homeassistant_text_sensor(&self, opts: HomeassistantTextSensor) -> Self::Fragment;

    /// Builds a Home Assistant numeric sensor.
    fn homeassistant_sensor(&self, opts: HomeassistantSensor) -> Self::Fragment;
}

/// Component set producing [`Fragment`] values for the ESPHome generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct EsphomeComponents;

impl ComponentSet for EsphomeComponents {
    type Fragment = Fragment;

    fn keypad_binary_sensor(&self, opts: KeypadBinarySensor) -> Fragment {
        Fragment::Sensor(opts)
    }

    fn partition_light(&self, opts: PartitionLight) -> Fragment {
        Fragment::Light(opts)
    }

    fn homeassistant_text_sensor(&self, opts: HomeassistantTextSensor) -> Fragment {
        Fragment::TextSensor(opts)
    }

    fn homeassistant_sensor(&self, opts: HomeassistantSensor) -> Fragment {
        Fragment::NumericSensor(opts)
    }
}

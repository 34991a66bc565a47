//! ESPHome configuration fragments produced by button synthesis.
//!
//! Each fragment maps onto one list entry under an ESPHome component domain
//! (`binary_sensor`, `light`, `text_sensor`, `sensor`). The structs double as
//! the option records handed to a [`crate::synth::ComponentSet`].

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_yml::value::{Tag, TaggedValue, Value};
use std::sync::Arc;

/// A C++ lambda body evaluated on the device.
///
/// Lambdas are shared through `Arc` so one expression can feed several
/// channels; `Arc::ptr_eq` distinguishes a shared lambda from equal copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lambda {
    source: String,
}

impl Lambda {
    /// Wraps a lambda body.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Wraps a lambda body for sharing.
    pub fn shared(source: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(source))
    }

    /// Returns the lambda body.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Serialize for Lambda {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TaggedValue {
            tag: Tag::new("lambda"),
            value: Value::String(self.source.clone()),
        }
        .serialize(serializer)
    }
}

/// `light.addressable_set` parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressableSet {
    /// Addressable light id
    pub id: String,
    /// First LED (inclusive)
    pub range_from: u8,
    /// Last LED (inclusive)
    pub range_to: u8,
    /// Red channel expression
    pub red: Arc<Lambda>,
    /// Green channel expression
    pub green: Arc<Lambda>,
    /// Blue channel expression
    pub blue: Arc<Lambda>,
    /// White channel expression
    pub white: Arc<Lambda>,
}

impl AddressableSet {
    /// The four channel expressions in red, green, blue, white order.
    #[must_use]
    pub fn channels(&self) -> [&Arc<Lambda>; 4] {
        [&self.red, &self.green, &self.blue, &self.white]
    }
}

/// An automation action attached to a trigger list.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `script.execute` with the LED to blip
    ScriptExecute {
        /// Script id
        id: String,
        /// LED index passed to the script
        led_index: u8,
    },
    /// `homeassistant.service` calling a service on one entity
    HomeassistantService {
        /// Service name, e.g. `homeassistant.toggle`
        service: String,
        /// Target entity
        entity_id: String,
    },
    /// `light.addressable_set`
    AddressableSet(AddressableSet),
}

impl Action {
    /// ESPHome action key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ScriptExecute { .. } => "script.execute",
            Self::HomeassistantService { .. } => "homeassistant.service",
            Self::AddressableSet(_) => "light.addressable_set",
        }
    }
}

#[derive(Serialize)]
struct ScriptExecuteBody<'a> {
    id: &'a str,
    led_index: u8,
}

#[derive(Serialize)]
struct ServiceBody<'a> {
    service: &'a str,
    data: ServiceData<'a>,
}

#[derive(Serialize)]
struct ServiceData<'a> {
    entity_id: &'a str,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // ESPHome actions are single-key maps: `- script.execute: {...}`
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::ScriptExecute { id, led_index } => map.serialize_entry(
                self.key(),
                &ScriptExecuteBody {
                    id,
                    led_index: *led_index,
                },
            )?,
            Self::HomeassistantService { service, entity_id } => map.serialize_entry(
                self.key(),
                &ServiceBody {
                    service,
                    data: ServiceData { entity_id },
                },
            )?,
            Self::AddressableSet(set) => map.serialize_entry(self.key(), set)?,
        }
        map.end()
    }
}

/// Matrix keypad binary sensor for one button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeypadBinarySensor {
    /// Unique id
    pub id: String,
    /// Friendly name
    pub name: String,
    /// Hidden from Home Assistant
    pub internal: bool,
    /// Matrix keypad component id
    pub keypad_id: String,
    /// Key character reported by the keypad
    pub key: char,
    /// Entity starts disabled in Home Assistant
    pub disabled_by_default: bool,
    /// Actions run on press
    pub on_press: Vec<Action>,
}

/// One range of an addressable strip used by a partition light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Addressable light id
    pub id: String,
    /// First LED (inclusive)
    pub from: u8,
    /// Last LED (inclusive)
    pub to: u8,
}

/// Partition light exposing part of the LED strip as its own light.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionLight {
    /// Unique id
    pub id: String,
    /// Friendly name
    pub name: String,
    /// Entity starts disabled in Home Assistant
    pub disabled_by_default: bool,
    /// Strip ranges covered by this light
    pub segments: Vec<Segment>,
}

/// Home Assistant text sensor mirroring an entity's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeassistantTextSensor {
    /// Unique id
    pub id: String,
    /// Mirrored entity
    pub entity_id: String,
    /// Actions run on every new value
    pub on_value: Vec<Action>,
}

/// Home Assistant numeric sensor mirroring an entity attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeassistantSensor {
    /// Unique id
    pub id: String,
    /// Mirrored entity
    pub entity_id: String,
    /// Mirrored attribute
    pub attribute: String,
    /// Actions run on every new value
    pub on_value: Vec<Action>,
}

/// One emitted unit of device configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fragment {
    /// Press detection for the button
    Sensor(KeypadBinarySensor),
    /// The button's LED as a light
    Light(PartitionLight),
    /// Entity state mirror
    TextSensor(HomeassistantTextSensor),
    /// Entity attribute mirror
    NumericSensor(HomeassistantSensor),
}

impl Fragment {
    /// Fragment id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Sensor(sensor) => &sensor.id,
            Self::Light(light) => &light.id,
            Self::TextSensor(sensor) => &sensor.id,
            Self::NumericSensor(sensor) => &sensor.id,
        }
    }

    /// Friendly name, if the fragment carries one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Sensor(sensor) => Some(&sensor.name),
            Self::Light(light) => Some(&light.name),
            Self::TextSensor(_) | Self::NumericSensor(_) => None,
        }
    }

    /// ESPHome component domain the fragment is listed under.
    #[must_use]
    pub const fn domain(&self) -> &'static str {
        match self {
            Self::Sensor(_) => "binary_sensor",
            Self::Light(_) => "light",
            Self::TextSensor(_) => "text_sensor",
            Self::NumericSensor(_) => "sensor",
        }
    }

    /// ESPHome platform within the domain.
    #[must_use]
    pub const fn platform(&self) -> &'static str {
        match self {
            Self::Sensor(_) => "matrix_keypad",
            Self::Light(_) => "partition",
            Self::TextSensor(_) | Self::NumericSensor(_) => "homeassistant",
        }
    }
}

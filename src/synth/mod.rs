//! Button fragment synthesis.
//!
//! Expands one [`ButtonConfig`] into the ordered ESPHome fragments for that
//! button. Synthesis is pure: no I/O, no shared state, so buttons can be
//! expanded independently and in any order.
//!
//! Emission order is fixed:
//!
//! 1. keypad binary sensor (always, always first)
//! 2. partition light (when exposed)
//! 3. Home Assistant state mirror (entity + `follow_state`)
//! 4. Home Assistant brightness mirror (entity + `follow_brightness`)
//!
//! The sensor's `on_press` list holds the blip action followed by the toggle
//! action. Both are collected before the sensor is constructed.

pub mod components;

pub use components::{ComponentSet, EsphomeComponents, Wiring};

use crate::models::keypad;
use crate::models::{
    Action, AddressableSet, ButtonConfig, Fragment, HomeassistantSensor, HomeassistantTextSensor,
    KeypadBinarySensor, Label, Lambda, PartitionLight, Segment,
};
use std::sync::Arc;

/// Home Assistant service sent by toggle buttons.
pub const TOGGLE_SERVICE: &str = "homeassistant.toggle";

/// Entity attribute mirrored by `follow_brightness`.
pub const BRIGHTNESS_ATTRIBUTE: &str = "brightness";

/// Expands a button into ESPHome fragments using the default wiring.
///
/// # Panics
///
/// Panics when `settings.num` is outside `1..=24`.
#[must_use]
pub fn synthesize(config: &ButtonConfig) -> Vec<Fragment> {
    synthesize_with(config, &Wiring::default(), &EsphomeComponents)
}

/// Expands a button into fragments built by `components`.
///
/// # Panics
///
/// Panics when `settings.num` is outside `1..=24`; ids derived from `num`
/// must never be wrapped onto another button.
pub fn synthesize_with<C: ComponentSet>(
    config: &ButtonConfig,
    wiring: &Wiring,
    components: &C,
) -> Vec<C::Fragment> {
    let settings = &config.settings;
    let key = keypad::key_for(settings.num);
    let led_index = settings.num - 1;
    let padded = settings.padded_num();
    let name = display_name(&padded, config.label.as_ref());
    let entity = settings.entity();

    let mut on_press = Vec::new();
    if settings.blip_on_press {
        on_press.push(Action::ScriptExecute {
            id: wiring.blip_script_id.clone(),
            led_index,
        });
    }
    if let (Some(entity), true) = (entity, settings.toggle) {
        on_press.push(Action::HomeassistantService {
            service: TOGGLE_SERVICE.to_string(),
            entity_id: entity.to_string(),
        });
    }

    let mut fragments = Vec::with_capacity(4);
    fragments.push(components.keypad_binary_sensor(KeypadBinarySensor {
        id: format!("keypad_button_{padded}"),
        name: name.clone(),
        internal: !settings.expose,
        keypad_id: wiring.keypad_id.clone(),
        key,
        disabled_by_default: true,
        on_press,
    }));

    if settings.expose {
        fragments.push(components.partition_light(PartitionLight {
            id: format!("keypad_button_{padded}_light"),
            name,
            disabled_by_default: true,
            segments: vec![Segment {
                id: wiring.ledstrip_id.clone(),
                from: led_index,
                to: led_index,
            }],
        }));
    }

    let Some(entity) = entity else {
        return fragments;
    };

    // Mirror ids use the unpadded number
    if settings.follow_state {
        fragments.push(
            components.homeassistant_text_sensor(HomeassistantTextSensor {
                id: format!("keypad_button_{}_hass", settings.num),
                entity_id: entity.to_string(),
                on_value: vec![Action::AddressableSet(follow_state_set(wiring, led_index))],
            }),
        );
    }

    if settings.follow_brightness {
        fragments.push(components.homeassistant_sensor(HomeassistantSensor {
            id: format!("keypad_button_{}_hass_brightness", settings.num),
            entity_id: entity.to_string(),
            attribute: BRIGHTNESS_ATTRIBUTE.to_string(),
            on_value: vec![Action::AddressableSet(follow_brightness_set(
                wiring, led_index,
            ))],
        }));
    }

    fragments
}

/// `Button NN` plus the normalized label text, if any.
fn display_name(padded: &str, label: Option<&Label>) -> String {
    match label {
        Some(label) => format!("Button {padded} {}", label.normalized_text()),
        None => format!("Button {padded}"),
    }
}

/// Full brightness while the mirrored state is `on`, dark otherwise.
fn follow_state_set(wiring: &Wiring, led_index: u8) -> AddressableSet {
    let channel = || {
        Lambda::shared(format!(
            "return (x == \"on\")?id({}):0;",
            wiring.brightness_id
        ))
    };
    AddressableSet {
        id: wiring.ledstrip_id.clone(),
        range_from: led_index,
        range_to: led_index,
        red: channel(),
        green: channel(),
        blue: channel(),
        white: channel(),
    }
}

/// Scales the configured brightness by the mirrored 0..=255 brightness.
fn follow_brightness_set(wiring: &Wiring, led_index: u8) -> AddressableSet {
    let scaled = Lambda::shared(format!(
        "return (x/255) * id({});",
        wiring.brightness_id
    ));
    AddressableSet {
        id: wiring.ledstrip_id.clone(),
        range_from: led_index,
        range_to: led_index,
        red: Arc::clone(&scaled),
        green: Arc::clone(&scaled),
        blue: Arc::clone(&scaled),
        white: scaled,
    }
}

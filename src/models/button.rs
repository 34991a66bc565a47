//! Button definitions as authored in a batch file.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Per-button configuration.
///
/// Only `num` is required when deserializing; see [`ButtonSettings::new`]
/// for the defaults applied to omitted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawButtonSettings")]
pub struct ButtonSettings {
    /// Logical button number (1..=24), the identity of every derived id
    pub num: u8,
    /// Whether the sensor is visible to Home Assistant (and gets a light)
    pub expose: bool,
    /// Whether a press blips the button's LED
    pub blip_on_press: bool,
    /// Home Assistant entity to bind to, e.g. `light.kitchen`
    pub ha_entity: Option<String>,
    /// Press toggles `ha_entity`
    pub toggle: bool,
    /// Mirror the entity's on/off state onto the button LED
    pub follow_state: bool,
    /// Mirror the entity's brightness attribute onto the button LED
    pub follow_brightness: bool,
    /// Accepted but currently drives no fragment
    pub follow_color: bool,
}

/// Wire shape with every field optional, resolved into [`ButtonSettings`].
#[derive(Debug, Deserialize)]
struct RawButtonSettings {
    num: u8,
    expose: Option<bool>,
    blip_on_press: Option<bool>,
    ha_entity: Option<String>,
    toggle: Option<bool>,
    follow_state: Option<bool>,
    follow_brightness: Option<bool>,
    follow_color: Option<bool>,
}

impl From<RawButtonSettings> for ButtonSettings {
    fn from(raw: RawButtonSettings) -> Self {
        let toggle = raw.toggle.unwrap_or(false);
        Self {
            num: raw.num,
            expose: raw.expose.unwrap_or(true),
            blip_on_press: raw.blip_on_press.unwrap_or(true),
            ha_entity: raw.ha_entity,
            toggle,
            // An omitted follow_state tracks toggle
            follow_state: raw.follow_state.unwrap_or(toggle),
            follow_brightness: raw.follow_brightness.unwrap_or(false),
            follow_color: raw.follow_color.unwrap_or(false),
        }
    }
}

impl ButtonSettings {
    /// Creates settings for `num` with the authoring defaults.
    ///
    /// The button is exposed and blips on press; no Home Assistant binding.
    #[must_use]
    pub const fn new(num: u8) -> Self {
        Self {
            num,
            expose: true,
            blip_on_press: true,
            ha_entity: None,
            toggle: false,
            follow_state: false,
            follow_brightness: false,
            follow_color: false,
        }
    }

    /// Binds the button to a Home Assistant entity.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.ha_entity = Some(entity.into());
        self
    }

    /// Returns the bound entity, treating an empty string as unbound.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        self.ha_entity.as_deref().filter(|entity| !entity.is_empty())
    }

    /// Zero-padded two-digit button number used in sensor and light ids.
    #[must_use]
    pub fn padded_num(&self) -> String {
        format!("{:02}", self.num)
    }
}

/// Display metadata for a button's printed legend.
///
/// Only `text` feeds generated names; `icon` and `font_size` belong to the
/// legend renderer and pass through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    /// Icon name shown on the legend
    pub icon: String,
    /// Legend text; may contain newlines or underscores as line breaks
    pub text: String,
    /// Legend font size
    #[serde(rename = "fontSize")]
    pub font_size: f64,
}

impl Label {
    /// Creates a label carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Legend text with every run of newlines/underscores collapsed to one space.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        static BREAKS: OnceLock<Regex> = OnceLock::new();
        BREAKS
            .get_or_init(|| Regex::new(r"[\n_]+").unwrap())
            .replace_all(&self.text, " ")
            .into_owned()
    }
}

/// Input to fragment synthesis: one button plus its optional legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonConfig {
    /// Button behaviour
    pub settings: ButtonSettings,
    /// Printed legend
    pub label: Option<Label>,
}

impl ButtonConfig {
    /// Creates a config without a label.
    #[must_use]
    pub const fn new(settings: ButtonSettings) -> Self {
        Self {
            settings,
            label: None,
        }
    }

    /// Attaches a label.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

/// One record of a batch file, as saved by the keypad editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonEntry {
    /// Editor key slot; informational, `component.num` is authoritative
    #[serde(rename = "keyNum", default, skip_serializing_if = "Option::is_none")]
    pub key_num: Option<u8>,
    /// Button behaviour
    pub component: ButtonSettings,
    /// Printed legend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
}

impl ButtonEntry {
    /// Builds the synthesis input for this entry.
    #[must_use]
    pub fn to_config(&self) -> ButtonConfig {
        ButtonConfig {
            settings: self.component.clone(),
            label: self.label.clone(),
        }
    }
}

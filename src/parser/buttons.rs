//! Button batch file loader.
//!
//! A batch is a list of editor entries (`keyNum`, `component`, `label`),
//! either at the document root or under a `buttons` key. The format is
//! picked from the file extension: `.yaml`/`.yml`, `.json` or `.json5`.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::models::keypad::BUTTON_COUNT;
use crate::models::ButtonEntry;

/// Supported batch file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchFormat {
    /// YAML document
    Yaml,
    /// Strict JSON
    Json,
    /// JSON5 (comments, trailing commas, unquoted keys)
    Json5,
}

impl BatchFormat {
    /// Picks a format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "json5" => Ok(Self::Json5),
            _ => anyhow::bail!(
                "Unsupported button file extension for {}. Expected .yaml, .yml, .json or .json5",
                path.display()
            ),
        }
    }
}

/// A batch entry that could not be decoded.
///
/// Carries the 1-based entry position and, when it can be pinned down, the
/// dotted path of the offending field (`component.expose`, `label.text`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryError {
    /// 1-based position of the entry in the batch
    pub entry: usize,
    /// Offending field, if known
    pub field: Option<String>,
    /// What was wrong with it
    pub message: String,
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "Entry {}, field `{field}`: {}", self.entry, self.message),
            None => write!(f, "Entry {}: {}", self.entry, self.message),
        }
    }
}

impl std::error::Error for EntryError {}

type FieldCheck = fn(&Value) -> Result<(), String>;

fn expect<T: DeserializeOwned>(value: &Value) -> Result<(), String> {
    T::deserialize(value).map(drop).map_err(|e| e.to_string())
}

fn expect_button_number(value: &Value) -> Result<(), String> {
    match value.as_u64() {
        Some(num) if u8::try_from(num).is_err() => Err(format!(
            "Button number {num} is outside 1..={BUTTON_COUNT}"
        )),
        _ => expect::<u8>(value),
    }
}

const ENTRY_FIELDS: &[(&str, FieldCheck)] = &[("keyNum", expect::<Option<u8>>)];

const COMPONENT_FIELDS: &[(&str, FieldCheck)] = &[
    ("num", expect_button_number),
    ("expose", expect::<Option<bool>>),
    ("blip_on_press", expect::<Option<bool>>),
    ("ha_entity", expect::<Option<String>>),
    ("toggle", expect::<Option<bool>>),
    ("follow_state", expect::<Option<bool>>),
    ("follow_brightness", expect::<Option<bool>>),
    ("follow_color", expect::<Option<bool>>),
];

const LABEL_FIELDS: &[(&str, FieldCheck)] = &[
    ("icon", expect::<String>),
    ("text", expect::<String>),
    ("fontSize", expect::<f64>),
];

/// Finds the first listed field of `object` that fails its check.
fn check_fields(
    object: &Map<String, Value>,
    prefix: &str,
    fields: &[(&str, FieldCheck)],
) -> Option<(String, String)> {
    fields.iter().find_map(|(name, check)| {
        let value = object.get(*name)?;
        check(value)
            .err()
            .map(|message| (format!("{prefix}{name}"), message))
    })
}

/// Pins a decode failure to a field path and a field-level message.
fn locate_failure(entry: &Value) -> Option<(String, String)> {
    let object = entry.as_object()?;
    if let Some(failure) = check_fields(object, "", ENTRY_FIELDS) {
        return Some(failure);
    }

    match object.get("component") {
        None => {
            return Some(("component".to_string(), "missing field".to_string()));
        }
        Some(Value::Object(component)) => {
            if !component.contains_key("num") {
                return Some(("component.num".to_string(), "missing field".to_string()));
            }
            if let Some(failure) = check_fields(component, "component.", COMPONENT_FIELDS) {
                return Some(failure);
            }
        }
        Some(other) => {
            return Some((
                "component".to_string(),
                format!("expected an object, found {other}"),
            ));
        }
    }

    match object.get("label") {
        None | Some(Value::Null) => None,
        Some(Value::Object(label)) => check_fields(label, "label.", LABEL_FIELDS),
        Some(other) => Some((
            "label".to_string(),
            format!("expected an object, found {other}"),
        )),
    }
}

fn decode_entry(index: usize, value: &Value) -> Result<ButtonEntry, EntryError> {
    ButtonEntry::deserialize(value).map_err(|err| {
        let (field, message) = match locate_failure(value) {
            Some((field, message)) => (Some(field), message),
            None => (None, err.to_string()),
        };
        EntryError {
            entry: index + 1,
            field,
            message,
        }
    })
}

/// Decodes a parsed document: either a list of entries or `{buttons: [...]}`.
fn decode_document(document: Value) -> Result<Vec<ButtonEntry>> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("buttons") {
            Some(Value::Array(items)) => items,
            Some(_) => anyhow::bail!("`buttons` must be a list of button entries"),
            None => anyhow::bail!("Expected a list of button entries or a `buttons` key"),
        },
        _ => anyhow::bail!("Expected a list of button entries or a `buttons` key"),
    };

    let entries = items
        .iter()
        .enumerate()
        .map(|(index, value)| decode_entry(index, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entries)
}

/// Parses batch content in the given format.
///
/// Syntax errors fail with the format's own message. Entries that parse but
/// don't fit the button model fail with an [`EntryError`] in the chain.
pub fn parse_buttons(content: &str, format: BatchFormat) -> Result<Vec<ButtonEntry>> {
    let document: Value = match format {
        BatchFormat::Yaml => {
            serde_yml::from_str(content).context("Failed to parse YAML button list")?
        }
        BatchFormat::Json => {
            serde_json::from_str(content).context("Failed to parse JSON button list")?
        }
        BatchFormat::Json5 => {
            json5::from_str(content).context("Failed to parse JSON5 button list")?
        }
    };

    decode_document(document)
}

/// Loads a batch of button entries from a file.
pub fn load_buttons(path: &Path) -> Result<Vec<ButtonEntry>> {
    let format = BatchFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read button file: {}", path.display()))?;

    let entries = parse_buttons(&content, format)
        .with_context(|| format!("Failed to load buttons from {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        count = entries.len(),
        "loaded button entries"
    );

    Ok(entries)
}

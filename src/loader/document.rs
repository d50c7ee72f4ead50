//! Structural checks shared by every configuration document

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, ShellError};

/// The document must be a non-empty JSON object.
pub fn require_object<'a>(url: &str, document: &'a Value) -> Result<&'a Map<String, Value>> {
    match document.as_object() {
        Some(object) if !object.is_empty() => Ok(object),
        _ => Err(ShellError::ConfigMissing {
            url: url.to_string(),
        }),
    }
}

/// Fails on the first field (in the order given) that is absent or null.
pub fn require_fields(url: &str, object: &Map<String, Value>, fields: &[&str]) -> Result<()> {
    match fields
        .iter()
        .find(|field| object.get(**field).is_none_or(Value::is_null))
    {
        Some(field) => Err(ShellError::FieldMissing {
            url: url.to_string(),
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn parse_document<T: DeserializeOwned>(url: &str, document: Value) -> Result<T> {
    serde_json::from_value(document).map_err(|e| ShellError::MalformedDocument {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Accepts `true`/`false` or the strings `"True"`/`"False"` (any case).
pub fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => parse_flag(&text)
            .ok_or_else(|| de::Error::custom(format!("expected True or False, found '{}'", text))),
    }
}

pub fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

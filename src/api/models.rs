//! API Models
//!
//! Wire representation of application records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application credential record as exchanged with the broker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub desc: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub secret: String,
    /// Epoch seconds, or anything the server uses for "never expires"
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub expired: Value,
    #[serde(default = "default_status")]
    pub status: bool,
}

impl Default for AppRecord {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            name: String::new(),
            desc: String::new(),
            secret: String::new(),
            expired: Value::Null,
            status: true,
        }
    }
}

impl AppRecord {
    /// Decode a list response body
    pub fn list_from_value(value: Value) -> serde_json::Result<Vec<Self>> {
        match value {
            Value::Null => Ok(Vec::new()),
            other => serde_json::from_value(other),
        }
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn default_status() -> bool {
    true
}

// null / missing text fields come back from some broker versions
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

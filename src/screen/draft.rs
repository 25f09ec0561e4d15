//! Dialog Draft
//!
//! Working copy of the record shown in the dialog.

use serde_json::Value;
use zeroize::Zeroize;

use super::expiry::{expiry_for_picker, normalize_expired, ExpiryInput};
use crate::api::AppRecord;

/// Dialog mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    New,
    Edit,
    View,
}

impl DialogMode {
    /// Catalog key of the dialog title
    pub fn title_key(&self) -> &'static str {
        match self {
            Self::New => "app.newApp",
            Self::Edit => "app.editApp",
            Self::View => "app.viewApp",
        }
    }
}

/// Inline validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub app_id: Option<String>,
    pub name: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.app_id.is_none() && self.name.is_none()
    }
}

/// Form working copy, kept apart from the committed record list
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub app_id: String,
    pub name: String,
    pub desc: String,
    pub secret: String,
    pub expired: ExpiryInput,
    pub status: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            name: String::new(),
            desc: String::new(),
            secret: String::new(),
            expired: ExpiryInput::Empty,
            status: true,
        }
    }
}

impl Draft {
    /// Empty record with a suggested random id
    pub fn blank() -> Self {
        Self {
            app_id: suggest_app_id(),
            ..Self::default()
        }
    }

    pub fn from_record(record: &AppRecord) -> Self {
        Self {
            app_id: record.app_id.clone(),
            name: record.name.clone(),
            desc: record.desc.clone(),
            secret: record.secret.clone(),
            expired: expiry_for_picker(&record.expired),
            status: record.status,
        }
    }

    /// Request body with `expired` normalized to seconds
    pub fn to_record(&self) -> AppRecord {
        AppRecord {
            app_id: self.app_id.clone(),
            name: self.name.clone(),
            desc: self.desc.clone(),
            secret: self.secret.clone(),
            expired: normalize_expired(&self.expired).map(Value::from).unwrap_or(Value::Null),
            status: self.status,
        }
    }

    /// Only `app_id` and `name` are checked
    pub fn validate(&self, message: &str) -> FieldErrors {
        let required = |value: &str| value.is_empty().then(|| message.to_string());
        FieldErrors {
            app_id: required(&self.app_id),
            name: required(&self.name),
        }
    }

    pub fn wipe(&mut self) {
        self.secret.zeroize();
    }
}

/// 16 lowercase hex characters
pub fn suggest_app_id() -> String {
    hex::encode(rand::random::<[u8; 8]>())
}

/// Copy of a table row as sent by the status switch
pub fn normalized_row(row: &AppRecord) -> AppRecord {
    let mut body = row.clone();
    body.expired = normalize_expired(&ExpiryInput::Raw(row.expired.clone()))
        .map(Value::from)
        .unwrap_or(Value::Null);
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_suggested_id_shape() {
        let id = suggest_app_id();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(suggest_app_id(), suggest_app_id());
    }

    #[test]
    fn test_blank_draft() {
        let draft = Draft::blank();
        assert_eq!(draft.app_id.len(), 16);
        assert!(draft.name.is_empty());
        assert!(draft.status);
        assert_eq!(draft.expired, ExpiryInput::Empty);
    }

    #[test]
    fn test_validate_required_fields() {
        let mut draft = Draft::default();
        let errors = draft.validate("Required");
        assert_eq!(errors.app_id.as_deref(), Some("Required"));
        assert_eq!(errors.name.as_deref(), Some("Required"));

        draft.app_id = "a1".to_string();
        draft.name = "   ".to_string();
        assert!(draft.validate("Required").is_empty());

        draft.name = "svc".to_string();
        assert!(draft.validate("Required").is_empty());
    }

    #[test]
    fn test_record_round_trip_keeps_seconds() {
        let record = AppRecord {
            app_id: "a1".to_string(),
            name: "svc".to_string(),
            expired: json!(1700000000),
            ..Default::default()
        };
        let draft = Draft::from_record(&record);
        assert!(matches!(draft.expired, ExpiryInput::Picked(_)));
        assert_eq!(draft.to_record().expired, json!(1700000000));
    }

    #[test]
    fn test_normalized_row() {
        let row = AppRecord { app_id: "a1".to_string(), expired: json!(""), ..Default::default() };
        assert_eq!(normalized_row(&row).expired, Value::Null);

        let row = AppRecord { app_id: "a1".to_string(), expired: json!(1700000000), ..Default::default() };
        assert_eq!(normalized_row(&row).expired, json!(1700000000));
    }

    #[test]
    fn test_wipe_clears_secret() {
        let mut draft = Draft { secret: "s3cr3t".to_string(), ..Default::default() };
        draft.wipe();
        assert!(draft.secret.is_empty());
    }
}

//! Expiry Handling
//!
//! Conversions between the wire `expired` value (epoch seconds), the date
//! picker value and the table's display text.
//!
//! Seconds and milliseconds are told apart purely by digit count: 10 digits
//! are seconds, 13 digits are milliseconds. Instants before 2001-09-09 or
//! after 2286-11-20 do not have those digit counts and are treated as unset.
//! Kept for compatibility with records already stored by the broker.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde_json::Value;

use super::Translator;

pub const PICKER_FORMAT: &str = "%Y-%m-%d";

/// Value held by the dialog's expiry field
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExpiryInput {
    #[default]
    Empty,
    /// Date picker selection, millisecond precision
    Picked(DateTime<Local>),
    /// Value copied unchanged from a table row
    Raw(Value),
}

impl ExpiryInput {
    /// Text shown in the picker field
    pub fn picker_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Picked(dt) => dt.format(PICKER_FORMAT).to_string(),
            Self::Raw(value) => ten_digit_seconds(value)
                .and_then(seconds_to_local)
                .map(|dt| dt.format(PICKER_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse typed picker text; anything that is not a calendar date is unset
    pub fn from_picker_text(text: &str) -> Self {
        NaiveDate::parse_from_str(text.trim(), PICKER_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .map(Self::Picked)
            .unwrap_or(Self::Empty)
    }

    fn epoch_number(&self) -> Option<i64> {
        match self {
            Self::Empty => None,
            Self::Picked(dt) => Some(dt.timestamp_millis()),
            Self::Raw(value) => value_as_integer(value),
        }
    }
}

/// Normalize an expiry to the epoch seconds sent over the wire.
///
/// 13 digits are divided by 1000, 10 digits pass through, anything else is unset.
pub fn normalize_expired(input: &ExpiryInput) -> Option<i64> {
    let n = input.epoch_number()?;
    match n.to_string().len() {
        13 => Some(n / 1000),
        10 => Some(n),
        _ => None,
    }
}

/// Convert a wire value into the picker value for the dialog
pub fn expiry_for_picker(value: &Value) -> ExpiryInput {
    ten_digit_seconds(value)
        .and_then(|secs| Local.timestamp_millis_opt(secs.checked_mul(1000)?).single())
        .map(ExpiryInput::Picked)
        .unwrap_or(ExpiryInput::Empty)
}

/// Render an expiry for the table: `yyyy-mm-dd`, or the "never expires" text
pub fn format_expiry_for_display(value: &Value, translator: &dyn Translator) -> String {
    ten_digit_seconds(value)
        .and_then(seconds_to_local)
        .map(|dt| dt.format(PICKER_FORMAT).to_string())
        .unwrap_or_else(|| translator.translate("app.expiredText"))
}

fn seconds_to_local(secs: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local))
}

// stringified form must be exactly 10 characters and numeric
fn ten_digit_seconds(value: &Value) -> Option<i64> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    if text.len() != 10 {
        return None;
    }
    text.parse::<i64>().ok()
}

fn value_as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, Language};
    use serde_json::json;

    fn en() -> Catalog {
        Catalog::new(Language::En)
    }

    #[test]
    fn test_display_ten_digit_seconds() {
        let text = format_expiry_for_display(&json!(1700000000), &en());
        let expected = seconds_to_local(1700000000).unwrap().format("%Y-%m-%d").to_string();
        assert_eq!(text, expected);
        assert!(text.starts_with("2023-11-1"));
    }

    #[test]
    fn test_display_numeric_string() {
        let text = format_expiry_for_display(&json!("1700000000"), &en());
        assert_eq!(text.len(), 10);
        assert!(text.starts_with("2023-11-1"));
    }

    #[test]
    fn test_display_placeholder_for_other_shapes() {
        let placeholder = "Never Expire";
        for value in [
            json!(null),
            json!(""),
            json!("undefined"),
            json!("abcdefghij"),
            json!(1700000000000i64),
            json!(170000000),
            json!(true),
            json!([1700000000]),
            json!({"at": 1700000000}),
            json!(17000000.5),
        ] {
            assert_eq!(format_expiry_for_display(&value, &en()), placeholder, "value {}", value);
        }
    }

    #[test]
    fn test_normalize_milliseconds() {
        let picked = Local.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(normalize_expired(&ExpiryInput::Picked(picked)), Some(1_700_000_000));
        assert_eq!(normalize_expired(&ExpiryInput::Raw(json!(1_700_000_000_000i64))), Some(1_700_000_000));
    }

    #[test]
    fn test_normalize_seconds_pass_through() {
        assert_eq!(normalize_expired(&ExpiryInput::Raw(json!(1700000000))), Some(1700000000));
        assert_eq!(normalize_expired(&ExpiryInput::Raw(json!("1700000000"))), Some(1700000000));
    }

    #[test]
    fn test_normalize_other_shapes_unset() {
        assert_eq!(normalize_expired(&ExpiryInput::Empty), None);
        assert_eq!(normalize_expired(&ExpiryInput::Raw(json!(""))), None);
        assert_eq!(normalize_expired(&ExpiryInput::Raw(json!(null))), None);
        assert_eq!(normalize_expired(&ExpiryInput::Raw(json!(123456))), None);
        assert_eq!(normalize_expired(&ExpiryInput::Raw(json!(12345678901i64))), None);
        assert_eq!(normalize_expired(&ExpiryInput::Raw(json!("soon"))), None);
    }

    #[test]
    fn test_picker_conversion() {
        match expiry_for_picker(&json!(1700000000)) {
            ExpiryInput::Picked(dt) => assert_eq!(dt.timestamp(), 1700000000),
            other => panic!("expected picked date, got {:?}", other),
        }
        assert_eq!(expiry_for_picker(&json!("")), ExpiryInput::Empty);
        assert_eq!(expiry_for_picker(&json!(1700000000000i64)), ExpiryInput::Empty);
    }

    #[test]
    fn test_picker_text_round_trip() {
        let input = ExpiryInput::from_picker_text("2030-01-15");
        assert_eq!(input.picker_text(), "2030-01-15");
        let secs = normalize_expired(&input).unwrap();
        assert_eq!(secs.to_string().len(), 10);

        assert_eq!(ExpiryInput::from_picker_text("2030-02-30"), ExpiryInput::Empty);
        assert_eq!(ExpiryInput::from_picker_text(""), ExpiryInput::Empty);
        assert_eq!(ExpiryInput::Empty.picker_text(), "");
    }
}

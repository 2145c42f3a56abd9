//! Dynamic field values for contact records.
//!
//! # Responsibility
//! - Define the closed scalar variant stored under every dynamic field name.
//! - Provide the canonical text rendering used by search and display paths.
//!
//! # Invariants
//! - Values are scalars only; nested arrays/objects are rejected at decode
//!   time.
//! - `to_text` is deterministic: equal values always render the same text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open mapping from field name to scalar value, as stored on a contact.
///
/// The enclosing group's `column_schema` is advisory metadata about which
/// keys to expect; nothing enforces that a contact's map agrees with it.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Scalar value of one dynamic contact field.
///
/// Serialized untagged, so the JSON form is a native scalar
/// (`null`, `true`, `3.5`, `"text"`), matching the wire shape the
/// storage layer persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Canonical text rendering for search comparisons and display.
    ///
    /// - `Null` renders as the empty string.
    /// - Booleans render as `true`/`false`.
    /// - Whole-valued finite numbers keep one decimal (`3.0`), other
    ///   numbers use the shortest round-trip form.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => number_to_text(*value),
            Self::Text(value) => value.clone(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Canonical number rendering shared by field display and cell import.
///
/// Whole finite values keep one decimal digit so a spreadsheet cell holding
/// `3.0` round-trips as the text `"3.0"` rather than `"3"`.
pub(crate) fn number_to_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{number_to_text, FieldMap, FieldValue};

    #[test]
    fn to_text_canonical_forms() {
        assert_eq!(FieldValue::Null.to_text(), "");
        assert_eq!(FieldValue::Bool(true).to_text(), "true");
        assert_eq!(FieldValue::Bool(false).to_text(), "false");
        assert_eq!(FieldValue::Number(3.0).to_text(), "3.0");
        assert_eq!(FieldValue::Number(3.5).to_text(), "3.5");
        assert_eq!(FieldValue::Text("Alice".to_string()).to_text(), "Alice");
    }

    #[test]
    fn number_to_text_keeps_one_decimal_for_whole_values() {
        assert_eq!(number_to_text(0.0), "0.0");
        assert_eq!(number_to_text(-7.0), "-7.0");
        assert_eq!(number_to_text(2.25), "2.25");
    }

    #[test]
    fn json_wire_form_is_native_scalars() {
        let mut data = FieldMap::new();
        data.insert("name".to_string(), FieldValue::Text("Ada".to_string()));
        data.insert("age".to_string(), FieldValue::Number(36.0));
        data.insert("active".to_string(), FieldValue::Bool(true));
        data.insert("note".to_string(), FieldValue::Null);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["age"], 36.0);
        assert_eq!(json["active"], true);
        assert!(json["note"].is_null());

        let decoded: FieldMap = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn nested_values_are_rejected() {
        let result: Result<FieldValue, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());

        let result: Result<FieldValue, _> = serde_json::from_str(r#"{"k": 1}"#);
        assert!(result.is_err());
    }
}

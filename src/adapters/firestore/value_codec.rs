//! Conversion of documents to the Firestore REST value encoding.
//!
//! ```text
//! FieldValue::Integer(5)       -> {"integerValue": "5"}
//! FieldValue::Map({a: true})   -> {"mapValue": {"fields": {"a": {"booleanValue": true}}}}
//! ```
//!
//! `ServerTimestamp` sentinels have no value encoding; they are omitted here
//! and sent as field transforms instead.

use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

use crate::domain::document::{FieldValue, Fields};

/// Encodes a single value. Returns `None` for server timestamps.
pub fn encode_value(value: &FieldValue) -> Option<Value> {
    let encoded = match value {
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Bool(b) => json!({ "booleanValue": b }),
        // int64 travels as a decimal string
        FieldValue::Integer(i) => json!({ "integerValue": i.to_string() }),
        FieldValue::Double(d) => json!({ "doubleValue": d }),
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Timestamp(ts) => {
            json!({ "timestampValue": ts.to_rfc3339_opts(SecondsFormat::Micros, true) })
        }
        FieldValue::Array(items) => {
            let values: Vec<Value> = items.iter().filter_map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        FieldValue::Map(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
        FieldValue::ServerTimestamp => return None,
    };
    Some(encoded)
}

/// Encodes a field map, dropping server timestamps.
pub fn encode_fields(fields: &Fields) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|(name, value)| encode_value(value).map(|v| (name.clone(), v)))
        .collect()
}

/// Formats a field path for `updateMask` and transforms.
///
/// Segments that are not simple identifiers are quoted with backticks.
pub fn field_path(segments: &[String]) -> String {
    segments
        .iter()
        .map(|segment| quote_segment(segment))
        .collect::<Vec<_>>()
        .join(".")
}

fn quote_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    let simple = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if simple {
        segment.to_string()
    } else {
        let escaped = segment.replace('\\', "\\\\").replace('`', "\\`");
        format!("`{}`", escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn scalars_encode_with_type_tags() {
        assert_eq!(encode_value(&FieldValue::Null), Some(json!({"nullValue": null})));
        assert_eq!(
            encode_value(&FieldValue::Bool(true)),
            Some(json!({"booleanValue": true}))
        );
        assert_eq!(
            encode_value(&FieldValue::Integer(50000)),
            Some(json!({"integerValue": "50000"}))
        );
        assert_eq!(
            encode_value(&FieldValue::Double(1.5)),
            Some(json!({"doubleValue": 1.5}))
        );
        assert_eq!(
            encode_value(&FieldValue::from("Success")),
            Some(json!({"stringValue": "Success"}))
        );
    }

    #[test]
    fn timestamp_encodes_as_rfc3339_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(
            encode_value(&FieldValue::Timestamp(ts)),
            Some(json!({"timestampValue": "2024-06-01T12:30:00.000000Z"}))
        );
    }

    #[test]
    fn nested_maps_and_arrays() {
        let value = FieldValue::from(json!({"id": "order_1", "offers": ["a"]}));

        assert_eq!(
            encode_value(&value),
            Some(json!({
                "mapValue": {"fields": {
                    "id": {"stringValue": "order_1"},
                    "offers": {"arrayValue": {"values": [{"stringValue": "a"}]}}
                }}
            }))
        );
    }

    #[test]
    fn server_timestamps_are_omitted() {
        let mut fields = Fields::new();
        fields.insert("verified".to_string(), FieldValue::Bool(true));
        fields.insert("verifiedAt".to_string(), FieldValue::ServerTimestamp);

        let encoded = encode_fields(&fields);

        assert_eq!(encoded.len(), 1);
        assert!(encoded.contains_key("verified"));
    }

    #[test]
    fn field_paths_quote_non_identifiers() {
        let path = |parts: &[&str]| parts.iter().map(|p| p.to_string()).collect::<Vec<_>>();

        assert_eq!(field_path(&path(&["razorpay", "order_id"])), "razorpay.order_id");
        assert_eq!(field_path(&path(&["member", "first-name"])), "member.`first-name`");
        assert_eq!(field_path(&path(&["2fa"])), "`2fa`");
        assert_eq!(field_path(&path(&["a`b"])), "`a\\`b`");
    }
}

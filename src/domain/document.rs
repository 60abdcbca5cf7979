//! Typed document model for the key-value document store.
//!
//! Documents are flat maps of top-level field names to [`FieldValue`]s.
//! Nested maps are allowed and merge writes address them by leaf path
//! (`razorpay.order_id`), so a merge never clobbers sibling fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Field name to value map.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single value stored in a document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Map(Fields),
    /// Resolved by the store to the time the write is applied.
    ServerTimestamp,
}

impl FieldValue {
    /// Builds a map value from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        FieldValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_server_timestamp(&self) -> bool {
        matches!(self, FieldValue::ServerTimestamp)
    }

    /// Returns the string contents, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested fields, if this is a map value.
    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            FieldValue::Map(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                // u64 beyond i64::MAX and fractional numbers
                None => FieldValue::Double(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => {
                FieldValue::Array(items.into_iter().map(FieldValue::from).collect())
            }
            Value::Object(map) => FieldValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FieldValue::map(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Top-level fields of a document write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Fields,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, consuming and returning the document.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Leaf field paths addressed by a merge write of this document.
    ///
    /// Non-empty maps are descended into; every other value (including an
    /// empty map) is a leaf. Server timestamps are excluded because stores
    /// apply them as transforms rather than field updates.
    pub fn merge_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        collect_leaf_paths(&self.fields, &mut Vec::new(), &mut paths, false);
        paths
    }

    /// Paths of every `ServerTimestamp` sentinel in the document.
    pub fn server_timestamp_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        collect_leaf_paths(&self.fields, &mut Vec::new(), &mut paths, true);
        paths
    }
}

impl From<Fields> for Document {
    fn from(fields: Fields) -> Self {
        Self { fields }
    }
}

fn collect_leaf_paths(
    fields: &Fields,
    prefix: &mut Vec<String>,
    out: &mut Vec<Vec<String>>,
    server_timestamps: bool,
) {
    for (name, value) in fields {
        prefix.push(name.clone());
        match value {
            FieldValue::Map(nested) if !nested.is_empty() => {
                collect_leaf_paths(nested, prefix, out, server_timestamps);
            }
            FieldValue::ServerTimestamp if server_timestamps => out.push(prefix.clone()),
            FieldValue::ServerTimestamp => {}
            _ if !server_timestamps => out.push(prefix.clone()),
            _ => {}
        }
        prefix.pop();
    }
}

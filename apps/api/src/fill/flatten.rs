use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::models::profile::{CustomFieldType, Profile};

/// A scalar profile value ready to be written into a control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Text(String),
    Bool(bool),
}

impl FlatValue {
    /// String form used for value writes and comparisons.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FlatValue::Text(s) => Cow::Borrowed(s),
            FlatValue::Bool(true) => Cow::Borrowed("true"),
            FlatValue::Bool(false) => Cow::Borrowed("false"),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            FlatValue::Text(s) => !s.is_empty(),
            FlatValue::Bool(b) => *b,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, FlatValue::Text(s) if s.is_empty())
    }
}

/// Ordered key → value map produced by flattening a profile.
///
/// Iteration follows first insertion. Re-inserting an existing key replaces
/// its value in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatProfileMap {
    entries: Vec<(String, FlatValue)>,
}

impl FlatProfileMap {
    /// Inserts `value` under `key`. Blank text is never stored.
    pub fn insert(&mut self, key: impl Into<String>, value: FlatValue) {
        if value.is_blank() {
            return;
        }
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merges basic info, preferences and custom fields into one flat map.
///
/// Basic entries come first, then preferences, then custom fields, each
/// overriding earlier values for the same key. Null, blank and non-scalar
/// values are dropped. Custom checkbox fields are always stored as booleans.
pub fn flatten_profile(profile: &Profile) -> FlatProfileMap {
    let mut map = FlatProfileMap::default();

    for (key, value) in profile.basic.iter().chain(profile.preferences.iter()) {
        if let Some(value) = scalar(value) {
            map.insert(key.as_str(), value);
        }
    }

    for field in &profile.custom {
        if field.key.is_empty() {
            warn!(field_id = %field.id, label = %field.label, "Skipping custom field with empty key");
            continue;
        }
        let value = match field.field_type {
            CustomFieldType::Checkbox => Some(FlatValue::Bool(truthy(&field.value))),
            _ => scalar(&field.value),
        };
        if let Some(value) = value {
            map.insert(field.key.as_str(), value);
        }
    }

    map
}

fn scalar(value: &Value) -> Option<FlatValue> {
    match value {
        Value::String(s) if !s.is_empty() => Some(FlatValue::Text(s.clone())),
        Value::Number(n) => Some(FlatValue::Text(n.to_string())),
        Value::Bool(b) => Some(FlatValue::Bool(*b)),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

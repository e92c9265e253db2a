use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// The user's stored profile, as written by the extension popup.
///
/// Every section is optional on the wire. A section with the wrong shape
/// (e.g. `"experience": {}`) is treated as empty, and a malformed entry inside
/// `custom` or `experience` is dropped on its own without losing its siblings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient")]
    pub basic: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferences: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub custom: Vec<CustomField>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub experience: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldType {
    Textarea,
    Number,
    Date,
    Checkbox,
    Select,
    #[default]
    #[serde(other)]
    Text,
}

/// A user-defined field. `key` is the token matched against form controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CustomField {
    pub id: String,
    pub label: String,
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub value: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed profile entry");
                None
            }
        })
        .collect())
}

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Built-in aliases per canonical profile key. Aliases are matched as
/// substrings of the normalized control identifier, in the order listed.
pub(crate) const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("name", &["name", "full_name", "fullname"]),
    ("email", &["email", "e-mail", "useremail"]),
    ("phone", &["phone", "mobile", "tel", "telephone", "contact"]),
    ("address", &["address", "addr", "location"]),
    ("summary", &["summary", "about", "bio"]),
    ("company", &["company", "employer", "organization", "org"]),
    ("role", &["role", "title", "jobtitle", "position"]),
    ("startDate", &["start", "startdate", "from"]),
    ("endDate", &["end", "enddate", "to"]),
    ("prefRole", &["preferredrole", "targetrole", "position"]),
    ("prefLocation", &["preferredlocation", "location", "city"]),
    ("prefEmployment", &["employmenttype", "jobtype", "worktype"]),
    ("noticePeriod", &["noticeperiod", "notice", "availability"]),
];

/// Immutable mapping from canonical key to its alias set.
///
/// Keys are looked up exactly (case-sensitive). A key without an entry has
/// itself as its only alias.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn new<K, A>(entries: impl IntoIterator<Item = (K, Vec<A>)>) -> Self
    where
        K: Into<String>,
        A: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, aliases)| (k.into(), aliases.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Parses `{ "key": ["alias", ...], ... }`. Non-string aliases are ignored.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Map<String, Value> =
            serde_json::from_str(json).context("synonym table must be a JSON object")?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, aliases) in raw {
            let aliases = aliases
                .as_array()
                .with_context(|| format!("aliases for '{key}' must be an array"))?
                .iter()
                .filter_map(|a| a.as_str().map(str::to_string))
                .collect::<Vec<_>>();
            entries.push((key, aliases));
        }
        Ok(Self::new(entries))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read synonym table {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Aliases accepted as evidence for `key`, falling back to `[key]`.
    pub fn aliases<'a>(&'a self, key: &'a str) -> Vec<&'a str> {
        match self.entries.get(key) {
            Some(aliases) => aliases.iter().map(String::as_str).collect(),
            None => vec![key],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn default_synonyms() -> SynonymTable {
    SynonymTable::new(
        DEFAULT_SYNONYMS
            .iter()
            .map(|(key, aliases)| (*key, aliases.to_vec())),
    )
}

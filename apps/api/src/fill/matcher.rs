//! Key matching: resolves which profile key a form control is asking for.
//!
//! Two ordered passes over the available keys, first hit wins:
//! 1. the normalized identifier contains one of the key's aliases
//! 2. the normalized identifier contains the normalized key itself
//!
//! Substring containment lets `user_email_address` resolve to `email`. The alias
//! pass runs to completion before the raw-key pass starts, so a curated alias
//! on an early key beats a literal key name appearing later.

use crate::fill::normalize::normalize;
use crate::fill::synonyms::SynonymTable;

pub struct KeyMatcher {
    synonyms: SynonymTable,
}

impl KeyMatcher {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self { synonyms }
    }

    /// Returns the first key in `available_keys` that `identifier` refers to.
    ///
    /// Aliases are compared verbatim against the normalized identifier. An
    /// empty alias or a key that normalizes to nothing never matches.
    pub fn match_key<'k>(&self, identifier: &str, available_keys: &[&'k str]) -> Option<&'k str> {
        let norm = normalize(identifier);
        if norm.is_empty() {
            return None;
        }

        let by_alias = available_keys.iter().copied().find(|key| {
            self.synonyms
                .aliases(key)
                .into_iter()
                .any(|alias| !alias.is_empty() && norm.contains(alias))
        });
        if by_alias.is_some() {
            return by_alias;
        }

        available_keys.iter().copied().find(|key| {
            let norm_key = normalize(*key);
            !norm_key.is_empty() && norm.contains(&norm_key)
        })
    }
}

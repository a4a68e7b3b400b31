//! Canonical description lookup.
//!
//! The side file is a flat JSON object mapping a raw description (lowercased,
//! trimmed) to the label transactions should be grouped under:
//!
//! ```json
//! { "starbucks store 1234": "coffee", "sq *blue bottle": "coffee" }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Result, TrendError};

/// Immutable raw-description to canonical-label table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionMap {
    entries: HashMap<String, String>,
}

/// Trim surrounding whitespace and lowercase.
pub fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl DescriptionMap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the mapping from a JSON object file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| TrendError::file(path, e))?;
        let raw: BTreeMap<String, String> =
            serde_json::from_str(&text).map_err(|source| TrendError::Mapping {
                path: path.to_path_buf(),
                source,
            })?;

        let map: Self = raw.into_iter().collect();
        debug!("loaded {} description mappings from {}", map.len(), path.display());
        Ok(map)
    }

    /// Canonical label for an already folded description.
    pub fn get(&self, folded: &str) -> Option<&str> {
        self.entries.get(folded).map(String::as_str)
    }

    /// Canonical form of `raw`: the mapped label when `use_mapping` is set and
    /// an entry exists, otherwise the trimmed lowercase text.
    pub fn normalize(&self, raw: &str, use_mapping: bool) -> String {
        let folded = fold(raw);
        if !use_mapping {
            return folded;
        }
        match self.get(&folded) {
            Some(label) => label.to_string(),
            None => folded,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DescriptionMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    /// Keys are folded on the way in. On a collision an already folded key
    /// overrides, otherwise the first key seen is kept.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for (key, label) in iter {
            let key = key.as_ref();
            let folded = fold(key);
            if folded == key {
                entries.insert(folded, label.into());
            } else {
                entries.entry(folded).or_insert_with(|| label.into());
            }
        }
        Self { entries }
    }
}

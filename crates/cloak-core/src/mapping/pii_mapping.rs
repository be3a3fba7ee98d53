use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Mapping from placeholder token to the original value it replaced.
///
/// Keys are unique and an entry is never overwritten once written
/// (first-writer-wins). A reverse index supports lookup-before-allocate so a
/// value that is already mapped keeps its placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct PiiMapping {
    entries: BTreeMap<String, String>,
    by_value: HashMap<String, String>,
}

impl PiiMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Original value behind `placeholder`.
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries.get(placeholder).map(String::as_str)
    }

    pub fn contains(&self, placeholder: &str) -> bool {
        self.entries.contains_key(placeholder)
    }

    /// Placeholder already assigned to `value`, if any.
    pub fn placeholder_for(&self, value: &str) -> Option<&str> {
        self.by_value.get(value).map(String::as_str)
    }

    /// Insert unless `placeholder` is already mapped. Returns whether the
    /// entry was added.
    pub fn insert_if_absent(&mut self, placeholder: impl Into<String>, value: impl Into<String>) -> bool {
        let placeholder = placeholder.into();
        if self.entries.contains_key(&placeholder) {
            return false;
        }
        let value = value.into();
        self.by_value
            .entry(value.clone())
            .or_insert_with(|| placeholder.clone());
        self.entries.insert(placeholder, value);
        true
    }

    /// Entries whose placeholder is in `placeholders`. Unknown names are skipped.
    pub fn subset<'a>(&self, placeholders: impl IntoIterator<Item = &'a str>) -> PiiMapping {
        placeholders
            .into_iter()
            .filter_map(|p| self.entries.get(p).map(|v| (p.to_string(), v.clone())))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PiiMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut mapping = PiiMapping::new();
        for (placeholder, value) in iter {
            mapping.insert_if_absent(placeholder, value);
        }
        mapping
    }
}

impl From<BTreeMap<String, String>> for PiiMapping {
    fn from(entries: BTreeMap<String, String>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<PiiMapping> for BTreeMap<String, String> {
    fn from(mapping: PiiMapping) -> Self {
        mapping.entries
    }
}

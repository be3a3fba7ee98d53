use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PiiKind, Placeholder};

/// Per-kind counters. Each value is the last index issued for that kind;
/// counters only ever grow, so an index is never issued twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderCounters {
    counters: BTreeMap<String, u64>,
}

impl PlaceholderCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next placeholder for `kind`, starting at 1 for an unseen kind.
    pub fn allocate(&mut self, kind: &PiiKind) -> Placeholder {
        let counter = self.counters.entry(kind.tag().to_string()).or_insert(0);
        *counter += 1;
        Placeholder::new(kind.clone(), *counter)
    }

    /// Last index issued for `kind` (0 if none).
    pub fn current(&self, kind: &PiiKind) -> u64 {
        self.counters.get(kind.tag()).copied().unwrap_or(0)
    }

    /// Record a placeholder issued elsewhere (e.g. by the classifier) so the
    /// allocator never hands out its index again.
    pub fn observe(&mut self, placeholder: &Placeholder) {
        let counter = self
            .counters
            .entry(placeholder.kind().tag().to_string())
            .or_insert(0);
        *counter = (*counter).max(placeholder.index());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

use serde::{Deserialize, Serialize};

use super::PiiMapping;
use crate::placeholder::{PiiKind, Placeholder, PlaceholderCounters};

/// Cumulative masking state of one session: every placeholder issued so far
/// and the per-kind counters. Grows monotonically; nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingState {
    pub mapping: PiiMapping,
    pub counters: PlaceholderCounters,
}

impl MaskingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder for `value`: the existing one if the value is already
    /// mapped, otherwise a freshly allocated `kind` placeholder that is
    /// recorded immediately. Returns the token and whether it is new.
    pub fn resolve(&mut self, kind: &PiiKind, value: &str) -> (String, bool) {
        if let Some(existing) = self.mapping.placeholder_for(value) {
            return (existing.to_string(), false);
        }
        let token = self.allocate(kind).token();
        self.mapping.insert_if_absent(token.clone(), value);
        (token, true)
    }

    /// Allocate a placeholder that is not yet a mapping key.
    pub fn allocate(&mut self, kind: &PiiKind) -> Placeholder {
        loop {
            let placeholder = self.counters.allocate(kind);
            if !self.mapping.contains(&placeholder.token()) {
                return placeholder;
            }
        }
    }

    /// Record an externally issued placeholder (first-writer-wins) and bump
    /// its kind's counter past it. Returns whether the entry was added.
    pub fn record(&mut self, placeholder: &Placeholder, value: &str) -> bool {
        self.counters.observe(placeholder);
        self.mapping.insert_if_absent(placeholder.token(), value)
    }
}

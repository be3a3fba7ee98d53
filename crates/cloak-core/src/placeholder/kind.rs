use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a masked span.
///
/// The four built-in kinds come from deterministic detection and the
/// classifier prompt; `Other` carries any tag the classifier invents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PiiKind {
    Name,
    Email,
    Phone,
    Id,
    Other(String),
}

impl PiiKind {
    /// Parse a tag. Returns `None` unless it matches `[A-Z][A-Z0-9_]*`
    /// without a trailing underscore.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if !is_valid_tag(tag) {
            return None;
        }
        Some(match tag {
            "NAME" => Self::Name,
            "EMAIL" => Self::Email,
            "PHONE" => Self::Phone,
            "ID" => Self::Id,
            other => Self::Other(other.to_string()),
        })
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Name => "NAME",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Id => "ID",
            Self::Other(tag) => tag,
        }
    }
}

fn is_valid_tag(tag: &str) -> bool {
    let bytes = tag.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_uppercase()
                && *last != b'_'
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || *b == b'_')
        }
        _ => false,
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<PiiKind> for String {
    fn from(kind: PiiKind) -> Self {
        kind.tag().to_string()
    }
}

impl TryFrom<String> for PiiKind {
    type Error = String;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        PiiKind::from_tag(&tag).ok_or_else(|| format!("invalid PII kind tag: {tag}"))
    }
}

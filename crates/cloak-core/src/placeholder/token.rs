use std::fmt;

use super::PiiKind;

/// Longest token `find_placeholders` will consider.
const MAX_TOKEN_LEN: usize = 64;

/// A parsed `<KIND_N>` token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    kind: PiiKind,
    index: u64,
}

impl Placeholder {
    /// `index` is 1-based; callers never construct index 0.
    pub fn new(kind: PiiKind, index: u64) -> Self {
        debug_assert!(index > 0, "placeholder indices are 1-based");
        Self { kind, index }
    }

    /// Parse an exact token such as `<EMAIL_3>`.
    pub fn parse(token: &str) -> Option<Self> {
        let inner = token.strip_prefix('<')?.strip_suffix('>')?;
        let (tag, digits) = inner.rsplit_once('_')?;
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let index = digits.parse::<u64>().ok()?;
        Some(Self {
            kind: PiiKind::from_tag(tag)?,
            index,
        })
    }

    pub fn kind(&self) -> &PiiKind {
        &self.kind
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}_{}>", self.kind.tag(), self.index)
    }
}

/// A placeholder occurrence inside a text (byte offsets, end exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpan {
    pub start: usize,
    pub end: usize,
    pub placeholder: Placeholder,
}

/// Find every well-formed placeholder in `text`, in order of appearance.
pub fn find_placeholders(text: &str) -> Vec<PlaceholderSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        let window_end = bytes.len().min(i + MAX_TOKEN_LEN);
        let close = bytes[i + 1..window_end]
            .iter()
            .position(|&b| b == b'>' || b == b'<')
            .map(|p| i + 1 + p);

        match close {
            Some(j) if bytes[j] == b'>' => {
                // '<' and '>' are ASCII, so both offsets are char boundaries.
                if let Some(placeholder) = Placeholder::parse(&text[i..=j]) {
                    spans.push(PlaceholderSpan {
                        start: i,
                        end: j + 1,
                        placeholder,
                    });
                    i = j + 1;
                    continue;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    spans
}

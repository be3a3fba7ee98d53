pub mod pii;

use cloak_core::placeholder::PlaceholderSpan;
use cloak_core::PiiKind;

use self::pii::PiiPattern;

/// A pattern match before placeholder resolution (byte offsets, end exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub kind: PiiKind,
    pub pattern_name: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Collect non-overlapping matches of one pattern, in ascending order.
/// Matches touching an existing placeholder token are skipped so digits in
/// `<ID_1234>` are never re-masked.
pub fn collect_matches(
    text: &str,
    pat: &PiiPattern,
    protected: &[PlaceholderSpan],
) -> Vec<RawMatch> {
    let Some(re) = pat.regex.as_ref() else {
        return Vec::new();
    };
    let bytes = text.as_bytes();

    re.find_iter(text)
        .filter_map(|m| {
            let trimmed = m.as_str().trim_end_matches(pat.trim_trailing);
            if trimmed.is_empty() {
                return None;
            }
            let (start, end) = (m.start(), m.start() + trimmed.len());
            if pat.digit_bounded
                && (digit_at(bytes, start.checked_sub(1)) || digit_at(bytes, Some(end)))
            {
                return None;
            }
            let overlaps = protected
                .iter()
                .any(|span| start < span.end && span.start < end);
            (!overlaps).then(|| RawMatch {
                kind: pat.kind.clone(),
                pattern_name: pat.name,
                start,
                end,
            })
        })
        .collect()
}

fn digit_at(bytes: &[u8], index: Option<usize>) -> bool {
    index
        .and_then(|i| bytes.get(i))
        .is_some_and(u8::is_ascii_digit)
}

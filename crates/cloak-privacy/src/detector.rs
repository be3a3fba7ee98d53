use cloak_core::config::PrivacyConfig;
use cloak_core::placeholder::find_placeholders;
use cloak_core::{MaskingState, PiiKind};
use tracing::{debug, warn};

use crate::patterns::pii::{self, PiiPattern};
use crate::patterns::{self, RawMatch};

/// One distinct value replaced by the deterministic pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedEntry {
    pub placeholder: String,
    pub value: String,
    pub kind: PiiKind,
    /// The value was already mapped before this pass.
    pub reused: bool,
    /// Occurrences replaced in this text.
    pub occurrences: usize,
}

/// Output of the deterministic pass.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    pub masked_text: String,
    /// Distinct values in order of first encounter.
    pub entries: Vec<DetectedEntry>,
}

/// Regex-based detector for high-confidence PII (emails, phones, IDs).
///
/// Patterns run in a fixed priority order against the progressively masked
/// text, so later, broader patterns never see spans an earlier one replaced.
pub struct PatternDetector {
    patterns: Vec<PiiPattern>,
}

impl PatternDetector {
    /// Detector with every built-in pattern enabled.
    pub fn new() -> Self {
        Self {
            patterns: pii::all_patterns(),
        }
    }

    /// Detector honoring the per-kind switches in `config`.
    pub fn from_config(config: &PrivacyConfig) -> Self {
        let patterns = pii::all_patterns()
            .into_iter()
            .filter(|p| match p.kind {
                PiiKind::Email => config.detect_emails,
                PiiKind::Phone => config.detect_phones,
                PiiKind::Id => config.detect_ids,
                _ => true,
            })
            .collect();
        Self { patterns }
    }

    /// Names of the active patterns, in detection order.
    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.name).collect()
    }

    /// Mask every match in `text`, reusing placeholders already in `state`
    /// and allocating new ones otherwise. Mutates `state`; never fails.
    ///
    /// A pattern whose regex failed to compile is skipped with a warning.
    pub fn detect(&self, text: &str, state: &mut MaskingState) -> Detection {
        run_patterns(&self.patterns, text, state)
    }
}

/// Mask capitalised "Firstname Lastname" pairs. Used as a last resort when
/// the classifier reported no entities at all.
pub fn mask_name_pairs(text: &str, state: &mut MaskingState) -> Detection {
    run_patterns(&[pii::name_fallback_pattern()], text, state)
}

fn run_patterns(pats: &[PiiPattern], text: &str, state: &mut MaskingState) -> Detection {
    let mut working = text.to_string();
    let mut entries: Vec<DetectedEntry> = Vec::new();

    for pat in pats {
        if pat.regex.is_none() {
            warn!(pattern = pat.name, kind = %pat.kind, "detection pattern unavailable, skipped");
            continue;
        }
        let protected = find_placeholders(&working);
        let matches = patterns::collect_matches(&working, pat, &protected);
        if matches.is_empty() {
            continue;
        }

        let mut replacements = Vec::with_capacity(matches.len());
        for m in &matches {
            let value = &working[m.start..m.end];
            let (placeholder, is_new) = state.resolve(&m.kind, value);
            match entries.iter_mut().find(|e| e.placeholder == placeholder) {
                Some(entry) => entry.occurrences += 1,
                None => entries.push(DetectedEntry {
                    placeholder: placeholder.clone(),
                    value: value.to_string(),
                    kind: m.kind.clone(),
                    reused: !is_new,
                    occurrences: 1,
                }),
            }
            replacements.push(placeholder);
        }

        debug!(pattern = pat.name, matches = matches.len(), "pattern matched");
        working = apply_replacements(&working, &matches, &replacements);
    }

    Detection {
        masked_text: working,
        entries,
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace each match span with its placeholder in one forward pass.
/// Matches must be ascending and non-overlapping.
fn apply_replacements(text: &str, matches: &[RawMatch], placeholders: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (m, placeholder) in matches.iter().zip(placeholders) {
        out.push_str(&text[cursor..m.start]);
        out.push_str(placeholder);
        cursor = m.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_email_phone_and_id_in_priority_order() {
        let mut state = MaskingState::new();
        let d = PatternDetector::new().detect(
            "Contact John Smith at john.smith@example.com or 555-123-4567, ref ID 987654.",
            &mut state,
        );
        assert_eq!(
            d.masked_text,
            "Contact John Smith at <EMAIL_1> or <PHONE_1>, ref ID <ID_1>."
        );
        assert_eq!(state.mapping.get("<EMAIL_1>"), Some("john.smith@example.com"));
        assert_eq!(state.mapping.get("<PHONE_1>"), Some("555-123-4567"));
        assert_eq!(state.mapping.get("<ID_1>"), Some("987654"));
    }

    #[test]
    fn repeated_value_collapses_to_one_placeholder() {
        let mut state = MaskingState::new();
        let d = PatternDetector::new().detect("1234 and 1234 and 5678", &mut state);
        assert_eq!(d.masked_text, "<ID_1> and <ID_1> and <ID_2>");
        assert_eq!(d.entries.len(), 2);
        assert_eq!(d.entries[0].occurrences, 2);
    }

    #[test]
    fn digits_inside_existing_placeholders_are_ignored() {
        let mut state = MaskingState::new();
        for _ in 0..1234 {
            state.counters.allocate(&PiiKind::Id);
        }
        let d = PatternDetector::new().detect("see <ID_1234> and 99999", &mut state);
        assert_eq!(d.masked_text, "see <ID_1234> and <ID_1235>");
    }

    #[test]
    fn trailing_period_is_not_part_of_email() {
        let mut state = MaskingState::new();
        let d = PatternDetector::new().detect("write to a.b@example.org.", &mut state);
        assert_eq!(d.masked_text, "write to <EMAIL_1>.");
        assert_eq!(state.mapping.get("<EMAIL_1>"), Some("a.b@example.org"));
    }

    #[test]
    fn disabled_kinds_are_skipped() {
        let config = PrivacyConfig {
            detect_ids: false,
            ..PrivacyConfig::default()
        };
        let detector = PatternDetector::from_config(&config);
        assert_eq!(detector.pattern_names(), vec!["email", "phone"]);
        let mut state = MaskingState::new();
        let d = detector.detect("order 123456", &mut state);
        assert_eq!(d.masked_text, "order 123456");
        assert!(d.entries.is_empty());
    }

    #[test]
    fn no_matches_is_silent() {
        let mut state = MaskingState::new();
        let d = PatternDetector::new().detect("hello world", &mut state);
        assert_eq!(d.masked_text, "hello world");
        assert!(d.entries.is_empty());
        assert!(state.mapping.is_empty());
    }

    #[test]
    fn phone_touching_letters_is_masked_whole() {
        for (input, expected) in [
            ("tel555-123-4567", "tel<PHONE_1>"),
            ("call 555-123-4567ext", "call <PHONE_1>ext"),
            ("x555.123.4567 now", "x<PHONE_1> now"),
        ] {
            let mut state = MaskingState::new();
            let d = PatternDetector::new().detect(input, &mut state);
            assert_eq!(d.masked_text, expected, "input: {input}");
            assert_eq!(state.mapping.len(), 1);
            assert!(!d.masked_text.contains("555"));
        }
    }

    #[test]
    fn phone_inside_longer_digit_run_is_an_id() {
        let mut state = MaskingState::new();
        let d = PatternDetector::new().detect("acct 15551234567", &mut state);
        assert_eq!(d.masked_text, "acct <ID_1>");
        assert_eq!(state.mapping.get("<ID_1>"), Some("15551234567"));
    }

    #[test]
    fn name_pairs_reuse_existing_placeholders() {
        let mut state = MaskingState::new();
        state.resolve(&PiiKind::Name, "Jane Doe");
        let d = mask_name_pairs("Jane Doe met John Smith", &mut state);
        assert_eq!(d.masked_text, "<NAME_1> met <NAME_2>");
        assert!(d.entries[0].reused);
        assert_eq!(state.mapping.get("<NAME_2>"), Some("John Smith"));
    }
}

use regex::Regex;
use std::sync::LazyLock;

use cloak_core::PiiKind;

/// A compiled deterministic detection pattern.
pub struct PiiPattern {
    pub name: &'static str,
    pub kind: PiiKind,
    pub regex: &'static LazyLock<Option<Regex>>,
    /// Characters stripped from the end of a match (sentence punctuation).
    pub trim_trailing: &'static [char],
    /// Reject matches with an ASCII digit directly before or after them.
    pub digit_bounded: bool,
}

macro_rules! pii_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Email ──────────────────────────────────────────────────────────────────
pii_pattern!(RE_EMAIL, r"[\w.+-]+@[\w-]+(?:\.[\w.-]+)+");

// ── Phone: DDD[sep]DDD[sep]DDDD, sep ∈ {-, ., space, none} ─────────────────
// Letters may touch the number ("tel555-123-4567"); digits may not.
pii_pattern!(RE_PHONE, r"\d{3}[-. ]?\d{3}[-. ]?\d{4}");

// ── Numeric identifier: any run of 4+ digits ───────────────────────────────
pii_pattern!(RE_ID, r"\d{4,}");

// ── Name fallback: "Firstname Lastname" ────────────────────────────────────
pii_pattern!(RE_NAME_PAIR, r"\b[A-Z][a-z]+ [A-Z][a-z]+\b");

/// All deterministic patterns in detection order. The specific patterns run
/// first so the generic digit scan never clobbers an email or phone number.
pub fn all_patterns() -> Vec<PiiPattern> {
    vec![
        PiiPattern {
            name: "email",
            kind: PiiKind::Email,
            regex: &RE_EMAIL,
            trim_trailing: &['.', '-'],
            digit_bounded: false,
        },
        PiiPattern {
            name: "phone",
            kind: PiiKind::Phone,
            regex: &RE_PHONE,
            trim_trailing: &[],
            digit_bounded: true,
        },
        PiiPattern {
            name: "id",
            kind: PiiKind::Id,
            regex: &RE_ID,
            trim_trailing: &[],
            digit_bounded: false,
        },
    ]
}

/// Capitalised two-word names, used only when the classifier reports
/// nothing and the fallback is switched on.
pub fn name_fallback_pattern() -> PiiPattern {
    PiiPattern {
        name: "name_pair",
        kind: PiiKind::Name,
        regex: &RE_NAME_PAIR,
        trim_trailing: &[],
        digit_bounded: false,
    }
}

//! Placeholder substitution back to original values.

use aho_corasick::{AhoCorasick, MatchKind};
use cloak_core::PiiMapping;
use tracing::warn;

/// Replace every placeholder of `mapping` found in `text` with its original
/// value. Placeholders absent from `text` are no-ops, and placeholders not in
/// `mapping` are left as they are.
pub fn unmask(text: &str, mapping: &PiiMapping) -> String {
    if mapping.is_empty() {
        return text.to_string();
    }
    substitute(text, mapping.iter())
}

/// Single-pass literal substitution of `(needle, replacement)` pairs.
///
/// One leftmost-longest automaton is built over all needles, so a
/// replacement is never rescanned and overlapping needles resolve to the
/// longest match.
pub fn substitute<'a>(text: &str, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let (needles, replacements): (Vec<&str>, Vec<&str>) =
        pairs.into_iter().filter(|(n, _)| !n.is_empty()).unzip();
    if needles.is_empty() {
        return text.to_string();
    }

    match AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&needles)
    {
        Ok(ac) => ac.replace_all(text, &replacements),
        Err(e) => {
            warn!(error = %e, "substitution automaton unavailable, replacing sequentially");
            let mut out = text.to_string();
            for (needle, replacement) in needles.iter().zip(&replacements) {
                out = out.replace(needle, replacement);
            }
            out
        }
    }
}

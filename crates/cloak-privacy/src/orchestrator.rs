//! MaskingOrchestrator: deterministic detection, classifier pass, merge into
//! the session mapping, and the turn-scoped mapping.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use cloak_core::errors::{ClassifierError, CloakResult};
use cloak_core::models::ClassifierResponse;
use cloak_core::placeholder::find_placeholders;
use cloak_core::traits::IPiiClassifier;
use cloak_core::{MaskingState, PiiMapping, Placeholder};
use tracing::{debug, info, warn};

use crate::detector::{self, DetectedEntry, PatternDetector};
use crate::unmask::substitute;

/// Result of masking one user message.
#[derive(Debug, Clone)]
pub struct MaskOutcome {
    /// Text safe to send to external services.
    pub masked_text: String,
    /// Entries needed to restore anything derived from `masked_text`.
    pub turn_mapping: PiiMapping,
    /// Values replaced by the deterministic pass.
    pub deterministic: Vec<DetectedEntry>,
    /// Entries the classifier reported (after re-keying).
    pub classifier_entries: usize,
}

/// Composes the pattern detector and the classifier over a session's
/// cumulative `MaskingState`.
///
/// Deterministic matches are committed to the state as soon as they are
/// found. Classifier results are merged into a staged copy and committed
/// only when the whole pass validates, so a failed classification leaves
/// the state exactly as the deterministic pass left it.
pub struct MaskingOrchestrator {
    detector: PatternDetector,
    classifier: Arc<dyn IPiiClassifier>,
    name_fallback: bool,
}

impl MaskingOrchestrator {
    pub fn new(detector: PatternDetector, classifier: Arc<dyn IPiiClassifier>) -> Self {
        Self {
            detector,
            classifier,
            name_fallback: false,
        }
    }

    /// When the classifier reports no entities, mask capitalised
    /// "Firstname Lastname" pairs in its text as `<NAME_N>`.
    pub fn with_name_fallback(mut self, enabled: bool) -> Self {
        self.name_fallback = enabled;
        self
    }

    /// Mask `text` against `state`, returning the masked text and the
    /// turn-scoped mapping.
    pub fn mask(&self, text: &str, state: &mut MaskingState) -> CloakResult<MaskOutcome> {
        let _span = cloak_core::mask_span!(text.len()).entered();

        // 1. Deterministic pass (commits to `state` directly).
        let detection = self.detector.detect(text, state);

        // 2. Catch-all pass on the partially masked text.
        let response = self.classifier.classify(&detection.masked_text)?;

        // 3. Merge on a staged copy; commit only if validation passes.
        let mut staged = state.clone();
        let input_tokens: HashSet<String> = find_placeholders(&detection.masked_text)
            .into_iter()
            .map(|s| s.placeholder.token())
            .collect();
        let (mut masked_text, reported) = merge_response(&mut staged, response, &input_tokens)?;
        if self.name_fallback && reported.is_empty() {
            let names = detector::mask_name_pairs(&masked_text, &mut staged);
            if !names.entries.is_empty() {
                debug!(names = names.entries.len(), "classifier found nothing; name fallback applied");
                masked_text = names.masked_text;
            }
        }
        check_no_leak(&masked_text, &detection.entries)?;
        *state = staged;

        // 4. Turn mapping: what the classifier reported plus every known
        //    placeholder present in the final text.
        let mut relevant: BTreeSet<String> = reported.iter().cloned().collect();
        for span in find_placeholders(&masked_text) {
            let token = span.placeholder.token();
            if state.mapping.contains(&token) {
                relevant.insert(token);
            } else {
                warn!(placeholder = %token, "masked text contains an unmapped placeholder");
            }
        }
        let turn_mapping = state.mapping.subset(relevant.iter().map(String::as_str));

        info!(
            deterministic = detection.entries.len(),
            classifier = reported.len(),
            turn_entries = turn_mapping.len(),
            session_entries = state.mapping.len(),
            "masking complete"
        );

        Ok(MaskOutcome {
            masked_text,
            turn_mapping,
            deterministic: detection.entries,
            classifier_entries: reported.len(),
        })
    }
}

/// Merge classifier entries into `state` (first-writer-wins) and return the
/// classifier text rewritten to the placeholders actually committed.
///
/// Per entry:
/// - a known token that was already in the classifier's input keeps its
///   session value; a differing classifier value is ignored;
/// - a value already mapped reuses its session placeholder;
/// - a token already taken by a different value from an earlier turn is
///   re-keyed to a fresh placeholder of the same kind;
/// - anything else is recorded as reported.
fn merge_response(
    state: &mut MaskingState,
    response: ClassifierResponse,
    input_tokens: &HashSet<String>,
) -> Result<(String, Vec<String>), ClassifierError> {
    let mut renames: HashMap<String, String> = HashMap::new();
    let mut reported = Vec::with_capacity(response.mapping.len());

    for (token, value) in response.mapping.iter() {
        let placeholder = Placeholder::parse(token).ok_or_else(|| ClassifierError::InvalidPlaceholder {
            token: token.to_string(),
        })?;

        let target = if input_tokens.contains(token) && state.mapping.contains(token) {
            if state.mapping.get(token) != Some(value) {
                warn!(placeholder = %token, "classifier remapped an existing placeholder; keeping original");
            }
            token.to_string()
        } else if let Some(existing) = state.mapping.placeholder_for(value) {
            existing.to_string()
        } else if state.mapping.contains(token) {
            let fresh = state.allocate(placeholder.kind()).token();
            state.mapping.insert_if_absent(fresh.clone(), value);
            fresh
        } else {
            state.record(&placeholder, value);
            token.to_string()
        };

        if target != token {
            debug!(from = %token, to = %target, "re-keyed classifier placeholder");
            renames.insert(token.to_string(), target.clone());
        }
        reported.push(target);
    }

    let masked_text = if renames.is_empty() {
        response.masked_text
    } else {
        substitute(
            &response.masked_text,
            renames.iter().map(|(from, to)| (from.as_str(), to.as_str())),
        )
    };

    Ok((masked_text, reported))
}

/// Fail closed if the classifier re-introduced a value the deterministic
/// pass had masked. Placeholder tokens are cut out first so an index such as
/// `<ID_1234>` is not mistaken for the value `1234`.
fn check_no_leak(masked_text: &str, entries: &[DetectedEntry]) -> Result<(), ClassifierError> {
    if entries.is_empty() {
        return Ok(());
    }
    let mut visible = String::with_capacity(masked_text.len());
    let mut cursor = 0;
    for span in find_placeholders(masked_text) {
        visible.push_str(&masked_text[cursor..span.start]);
        visible.push('\u{1}');
        cursor = span.end;
    }
    visible.push_str(&masked_text[cursor..]);

    match entries.iter().find(|e| visible.contains(&e.value)) {
        Some(entry) => Err(ClassifierError::LeakedValue {
            placeholder: entry.placeholder.clone(),
        }),
        None => Ok(()),
    }
}

use std::sync::Arc;

use cloak_core::errors::{ClassifierError, CloakError, ProviderError};
use cloak_core::traits::ITextGenerator;
use cloak_core::{MaskingState, PiiKind};
use cloak_privacy::{
    unmask, LlmClassifier, MaskingOrchestrator, PassthroughClassifier, PatternDetector,
};
use test_fixtures::{classifier_reply, FakeLlm, ScriptedGenerator, Step};

fn with_generator(generator: Arc<dyn ITextGenerator>) -> MaskingOrchestrator {
    MaskingOrchestrator::new(
        PatternDetector::new(),
        Arc::new(LlmClassifier::new(generator, 1024)),
    )
}

fn with_names(names: &[&str]) -> MaskingOrchestrator {
    with_generator(Arc::new(FakeLlm::new(names)))
}

// ── End-to-end masking of a single message ────────────────────────────────

#[test]
fn masks_deterministic_and_classifier_pii() {
    let orch = with_names(&["John Smith"]);
    let mut state = MaskingState::new();

    let out = orch
        .mask(
            "Contact John Smith at john.smith@example.com or 555-123-4567, ref ID 987654.",
            &mut state,
        )
        .unwrap();

    assert_eq!(
        out.masked_text,
        "Contact <NAME_1> at <EMAIL_1> or <PHONE_1>, ref ID <ID_1>."
    );
    assert_eq!(out.turn_mapping.len(), 4);
    assert_eq!(out.turn_mapping.get("<NAME_1>"), Some("John Smith"));
    assert_eq!(out.turn_mapping.get("<EMAIL_1>"), Some("john.smith@example.com"));
    assert_eq!(out.turn_mapping.get("<PHONE_1>"), Some("555-123-4567"));
    assert_eq!(out.turn_mapping.get("<ID_1>"), Some("987654"));
    assert_eq!(out.deterministic.len(), 3);
    assert_eq!(out.classifier_entries, 1);

    let answer = unmask("You can reach <NAME_1> at <EMAIL_1>.", &out.turn_mapping);
    assert_eq!(answer, "You can reach John Smith at john.smith@example.com.");
}

#[test]
fn text_without_pii_passes_through() {
    let orch = with_names(&[]);
    let mut state = MaskingState::new();
    let out = orch.mask("What is the tallest building in Paris?", &mut state).unwrap();

    assert_eq!(out.masked_text, "What is the tallest building in Paris?");
    assert!(out.turn_mapping.is_empty());
    assert!(state.mapping.is_empty());
}

#[test]
fn passthrough_classifier_keeps_deterministic_entries() {
    let orch = MaskingOrchestrator::new(PatternDetector::new(), Arc::new(PassthroughClassifier));
    let mut state = MaskingState::new();
    let out = orch.mask("call 555 123 4567", &mut state).unwrap();

    assert_eq!(out.masked_text, "call <PHONE_1>");
    assert_eq!(out.turn_mapping.get("<PHONE_1>"), Some("555 123 4567"));
    assert_eq!(out.classifier_entries, 0);
}

#[test]
fn typed_placeholder_without_mapping_stays_out_of_turn_mapping() {
    let orch = MaskingOrchestrator::new(PatternDetector::new(), Arc::new(PassthroughClassifier));
    let mut state = MaskingState::new();
    let out = orch.mask("my alias is <NAME_7>", &mut state).unwrap();

    assert_eq!(out.masked_text, "my alias is <NAME_7>");
    assert!(out.turn_mapping.is_empty());
}

// ── Session consistency across turns ─────────────────────────────────────

#[test]
fn repeated_value_reuses_placeholder_across_turns() {
    let orch = with_names(&[]);
    let mut state = MaskingState::new();

    let first = orch.mask("email a@b.com please", &mut state).unwrap();
    assert_eq!(first.masked_text, "email <EMAIL_1> please");

    let second = orch.mask("again a@b.com and also c@d.com", &mut state).unwrap();
    assert_eq!(second.masked_text, "again <EMAIL_1> and also <EMAIL_2>");
    assert_eq!(state.counters.current(&PiiKind::Email), 2);
    assert_eq!(second.turn_mapping.len(), 2);
    assert!(second.deterministic[0].reused);
    assert!(!second.deterministic[1].reused);
}

#[test]
fn turn_mapping_only_covers_the_current_message() {
    let orch = with_names(&[]);
    let mut state = MaskingState::new();

    orch.mask("email a@b.com", &mut state).unwrap();
    let second = orch.mask("order 424242", &mut state).unwrap();

    assert_eq!(state.mapping.len(), 2);
    assert_eq!(second.turn_mapping.len(), 1);
    assert!(second.turn_mapping.contains("<ID_1>"));
    assert!(!second.turn_mapping.contains("<EMAIL_1>"));
}

#[test]
fn colliding_classifier_tokens_are_rekeyed() {
    let llm = Arc::new(FakeLlm::new(&["Alice", "Bob"]));
    let orch = with_generator(llm.clone());
    let mut state = MaskingState::new();

    let first = orch.mask("Alice called", &mut state).unwrap();
    assert_eq!(first.masked_text, "<NAME_1> called");

    // The stateless classifier numbers Bob as <NAME_1> again.
    let second = orch.mask("Bob called", &mut state).unwrap();
    assert_eq!(second.masked_text, "<NAME_2> called");
    assert_eq!(state.mapping.get("<NAME_1>"), Some("Alice"));
    assert_eq!(state.mapping.get("<NAME_2>"), Some("Bob"));
    assert_eq!(second.turn_mapping.get("<NAME_2>"), Some("Bob"));
    assert_eq!(llm.mask_calls(), 2);
}

#[test]
fn swapped_classifier_numbering_is_renamed_in_one_pass() {
    let orch = with_names(&["Bob", "Alice"]);
    let mut state = MaskingState::new();

    orch.mask("Alice here", &mut state).unwrap();
    // Classifier returns Bob=<NAME_1>, Alice=<NAME_2>; session has Alice=<NAME_1>.
    let out = orch.mask("Bob and Alice", &mut state).unwrap();

    assert_eq!(out.masked_text, "<NAME_2> and <NAME_1>");
    assert_eq!(state.mapping.get("<NAME_1>"), Some("Alice"));
    assert_eq!(state.mapping.get("<NAME_2>"), Some("Bob"));
    assert_eq!(unmask(&out.masked_text, &out.turn_mapping), "Bob and Alice");
}

#[test]
fn classifier_cannot_remap_an_existing_placeholder() {
    let gen = Arc::new(ScriptedGenerator::new([Step::Reply(classifier_reply(
        "mail <EMAIL_1>",
        &[("<EMAIL_1>", "other@example.net")],
    ))]));
    let orch = with_generator(gen);
    let mut state = MaskingState::new();

    let out = orch.mask("mail a@b.com", &mut state).unwrap();
    assert_eq!(out.turn_mapping.get("<EMAIL_1>"), Some("a@b.com"));
    assert_eq!(state.mapping.len(), 1);
}

#[test]
fn classifier_indices_advance_the_session_counter() {
    let gen = Arc::new(ScriptedGenerator::new([Step::Reply(classifier_reply(
        "hi <NAME_3>",
        &[("<NAME_3>", "Carol")],
    ))]));
    let orch = with_generator(gen);
    let mut state = MaskingState::new();

    orch.mask("hi Carol", &mut state).unwrap();
    assert_eq!(state.counters.current(&PiiKind::Name), 3);
    assert_eq!(state.allocate(&PiiKind::Name).token(), "<NAME_4>");
}

// ── Fail-closed behaviour ────────────────────────────────────────────────

#[test]
fn malformed_classifier_output_fails_closed() {
    let gen = Arc::new(ScriptedGenerator::new([Step::Reply(
        "I'm sorry, I can't do that.".to_string(),
    )]));
    let orch = with_generator(gen);
    let mut state = MaskingState::new();

    let err = orch.mask("mail a@b.com, signed John", &mut state).unwrap_err();
    assert!(matches!(
        err,
        CloakError::Classifier(ClassifierError::ParseFailure { .. })
    ));
    // Deterministic entries stay committed; nothing from the classifier does.
    assert_eq!(state.mapping.len(), 1);
    assert_eq!(state.mapping.get("<EMAIL_1>"), Some("a@b.com"));
}

#[test]
fn missing_field_fails_closed() {
    let gen = Arc::new(ScriptedGenerator::new([Step::Reply(
        r#"{"masked_text": "hi <NAME_1>"}"#.to_string(),
    )]));
    let orch = with_generator(gen);
    let mut state = MaskingState::new();

    let err = orch.mask("hi Dana", &mut state).unwrap_err();
    assert!(matches!(
        err,
        CloakError::Classifier(ClassifierError::FieldMissing { .. })
    ));
    assert!(state.mapping.is_empty());
}

#[test]
fn reintroduced_value_is_reported_as_leak() {
    let gen = Arc::new(ScriptedGenerator::new([Step::Reply(classifier_reply(
        "mail a@b.com",
        &[],
    ))]));
    let orch = with_generator(gen);
    let mut state = MaskingState::new();

    let err = orch.mask("mail a@b.com", &mut state).unwrap_err();
    match err {
        CloakError::Classifier(ClassifierError::LeakedValue { placeholder }) => {
            assert_eq!(placeholder, "<EMAIL_1>")
        }
        other => panic!("expected leak, got {other:?}"),
    }
}

#[test]
fn leak_after_merge_leaves_only_deterministic_state() {
    let gen = Arc::new(ScriptedGenerator::new([Step::Reply(classifier_reply(
        "<NAME_1> mail a@b.com",
        &[("<NAME_1>", "Dana")],
    ))]));
    let orch = with_generator(gen);
    let mut state = MaskingState::new();

    let mut expected = MaskingState::new();
    PatternDetector::new().detect("Dana mail a@b.com", &mut expected);

    let err = orch.mask("Dana mail a@b.com", &mut state).unwrap_err();
    assert!(matches!(
        err,
        CloakError::Classifier(ClassifierError::LeakedValue { .. })
    ));
    assert_eq!(state, expected);
    assert_eq!(state.mapping.len(), 1);
    assert_eq!(state.mapping.get("<NAME_1>"), None);
    assert_eq!(state.counters.current(&PiiKind::Name), 0);
}

#[test]
fn placeholder_indices_are_not_mistaken_for_leaks() {
    let orch = with_names(&[]);
    let mut state = MaskingState::new();
    for _ in 0..1233 {
        state.counters.allocate(&PiiKind::Id);
    }
    // The value 1234 would be allocated <ID_1234>; its digits must not trip the check.
    let out = orch.mask("ticket 1234", &mut state).unwrap();
    assert_eq!(out.masked_text, "ticket <ID_1234>");
}

#[test]
fn provider_errors_propagate_unchanged() {
    let gen = Arc::new(ScriptedGenerator::new([Step::RateLimited]));
    let orch = with_generator(gen);
    let mut state = MaskingState::new();

    let err = orch.mask("hello Erin", &mut state).unwrap_err();
    assert!(matches!(
        err,
        CloakError::Provider(ProviderError::RateLimited { .. })
    ));
    assert!(err.is_retryable());
}

#[test]
fn blank_text_skips_the_classifier() {
    let gen = Arc::new(ScriptedGenerator::new([]));
    let orch = with_generator(gen.clone());
    let mut state = MaskingState::new();

    let out = orch.mask("   ", &mut state).unwrap();
    assert_eq!(out.masked_text, "   ");
    assert_eq!(gen.call_count(), 0);
}

// ── Name fallback ─────────────────────────────────────────────────────────

#[test]
fn name_fallback_masks_pairs_when_classifier_finds_nothing() {
    let orch = with_names(&[]).with_name_fallback(true);
    let mut state = MaskingState::new();
    let out = orch.mask("ask Jane Doe at jd@example.org", &mut state).unwrap();

    assert_eq!(out.masked_text, "ask <NAME_1> at <EMAIL_1>");
    assert_eq!(out.turn_mapping.get("<NAME_1>"), Some("Jane Doe"));
    assert_eq!(out.turn_mapping.len(), 2);
    assert_eq!(state.counters.current(&PiiKind::Name), 1);
}

#[test]
fn name_fallback_is_off_by_default() {
    let orch = with_names(&[]);
    let mut state = MaskingState::new();
    let out = orch.mask("ask Jane Doe", &mut state).unwrap();
    assert_eq!(out.masked_text, "ask Jane Doe");
    assert!(state.mapping.is_empty());
}

#[test]
fn name_fallback_stays_idle_when_classifier_reports_entities() {
    let orch = with_names(&["Jane Doe"]).with_name_fallback(true);
    let mut state = MaskingState::new();
    let out = orch.mask("Jane Doe met John Smith", &mut state).unwrap();
    assert_eq!(out.masked_text, "<NAME_1> met John Smith");
    assert_eq!(state.mapping.len(), 1);
}

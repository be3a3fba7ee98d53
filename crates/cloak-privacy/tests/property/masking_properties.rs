use std::sync::Arc;

use cloak_core::MaskingState;
use cloak_privacy::{unmask, MaskingOrchestrator, PassthroughClassifier, PatternDetector};
use proptest::prelude::*;

fn orchestrator() -> MaskingOrchestrator {
    MaskingOrchestrator::new(PatternDetector::new(), Arc::new(PassthroughClassifier))
}

// ── Masked text never carries the raw value ──────────────────────────────

proptest! {
    #[test]
    fn masked_text_never_contains_raw_email(
        user in "[a-z]{3,8}",
        domain in "[a-z]{3,8}",
    ) {
        let email = format!("{user}@{domain}.com");
        let mut state = MaskingState::new();
        let out = orchestrator().mask(&format!("reach me at {email} today"), &mut state).unwrap();
        prop_assert!(!out.masked_text.contains(&email), "leaked: {}", out.masked_text);
    }

    #[test]
    fn masked_text_never_contains_raw_id(id in "[1-9][0-9]{3,8}") {
        let mut state = MaskingState::new();
        let out = orchestrator().mask(&format!("order {id} shipped"), &mut state).unwrap();
        prop_assert_eq!(out.masked_text, "order <ID_1> shipped");
    }
}

// ── Unmasking restores the original ──────────────────────────────────────

proptest! {
    #[test]
    fn unmask_inverts_mask(
        user in "[a-z]{3,8}",
        id in "[1-9][0-9]{4,8}",
        words in "[a-z ]{0,20}",
    ) {
        let text = format!("{words} {user}@example.org ref {id} {words}");
        let mut state = MaskingState::new();
        let out = orchestrator().mask(&text, &mut state).unwrap();
        prop_assert_eq!(unmask(&out.masked_text, &out.turn_mapping), text);
    }
}

// ── Session consistency ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn same_value_gets_same_placeholder_across_turns(
        ids in prop::collection::vec("[1-9][0-9]{4,6}", 1..6),
    ) {
        let orch = orchestrator();
        let mut state = MaskingState::new();
        let first: Vec<String> = ids
            .iter()
            .map(|id| orch.mask(&format!("id {id}"), &mut state).unwrap().masked_text)
            .collect();
        let second: Vec<String> = ids
            .iter()
            .map(|id| orch.mask(&format!("id {id}"), &mut state).unwrap().masked_text)
            .collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distinct_values_never_share_a_placeholder(
        ids in prop::collection::hash_set("[1-9][0-9]{4,6}", 1..8),
    ) {
        let orch = orchestrator();
        let mut state = MaskingState::new();
        for id in &ids {
            orch.mask(&format!("id {id}"), &mut state).unwrap();
        }
        prop_assert_eq!(state.mapping.len(), ids.len());
        for id in &ids {
            prop_assert!(state.mapping.placeholder_for(id).is_some());
        }
    }
}

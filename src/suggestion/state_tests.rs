//! Tests for the suggestion state machine

use super::*;
use crate::test_utils::test_helpers::MockDocument;
use proptest::prelude::*;

fn visible(text: &str, anchor: Position) -> SuggestionState {
    let mut state = SuggestionState::new();
    state.show(text, anchor, true).unwrap();
    state
}

// =========================================================================
// show
// =========================================================================

#[test]
fn test_initial_state_is_none() {
    let state = SuggestionState::new();
    assert_eq!(state.phase(), Phase::None);
    assert_eq!(state.text(), "");
    assert_eq!(state.anchor(), None);
}

#[test]
fn test_show_at_block_end() {
    let state = visible(" world", 5);
    assert_eq!(state.phase(), Phase::Visible);
    assert_eq!(state.text(), " world");
    assert_eq!(state.anchor(), Some(5));
}

#[test]
fn test_show_refused_mid_block() {
    let mut state = SuggestionState::new();
    let result = state.show(" world", 2, false);

    assert_eq!(result, Err(InvalidTransition::CaretNotAtBlockEnd));
    assert_eq!(state, SuggestionState::new());
}

#[test]
fn test_show_refused_for_empty_text() {
    let mut state = SuggestionState::new();
    assert_eq!(state.show("", 0, true), Err(InvalidTransition::EmptyText));
    assert!(!state.is_visible());
}

#[test]
fn test_show_overwrites_visible_suggestion() {
    let mut state = visible(" first", 3);
    state.show(" second", 7, true).unwrap();

    assert_eq!(state.text(), " second");
    assert_eq!(state.anchor(), Some(7));
}

#[test]
fn test_refused_show_keeps_previous_suggestion() {
    let mut state = visible(" first", 3);
    assert!(state.show(" second", 1, false).is_err());
    assert_eq!(state.text(), " first");
}

// =========================================================================
// dismiss / reanchor
// =========================================================================

#[test]
fn test_dismiss_visible() {
    let mut state = visible(" world", 5);
    assert!(state.dismiss());
    assert_eq!(state, SuggestionState::new());
}

#[test]
fn test_dismiss_on_none_is_noop() {
    let mut state = SuggestionState::new();
    assert!(!state.dismiss());
    assert_eq!(state.phase(), Phase::None);
}

#[test]
fn test_reanchor_only_when_visible() {
    let mut state = SuggestionState::new();
    state.reanchor(9);
    assert_eq!(state.anchor(), None);

    let mut state = visible(" world", 5);
    state.reanchor(9);
    assert_eq!(state.anchor(), Some(9));
}

// =========================================================================
// accept
// =========================================================================

#[test]
fn test_accept_inserts_at_anchor_and_clears() {
    let mut doc = MockDocument::new("Dear");
    let mut state = visible(" Sir or Madam,", 4);

    assert!(state.accept(&mut doc));

    assert_eq!(state.phase(), Phase::None);
    assert_eq!(doc.insertions, vec![(" Sir or Madam,".to_string(), 4)]);
    assert_eq!(doc.text(), "Dear Sir or Madam,");
}

#[test]
fn test_accept_on_none_is_noop() {
    let mut doc = MockDocument::new("Dear");
    let mut state = SuggestionState::new();

    assert!(!state.accept(&mut doc));
    assert!(doc.insertions.is_empty());
}

#[test]
fn test_accept_with_stale_anchor_uses_caret() {
    let mut doc = MockDocument::new("Hello there");
    let mut state = visible(" friend", 5);

    assert!(state.accept(&mut doc));
    assert_eq!(doc.insertions, vec![(" friend".to_string(), 11)]);
}

#[test]
fn test_take_for_accept_clears_before_returning() {
    let mut state = visible(" world", 5);
    let taken = state.take_for_accept();

    assert_eq!(taken, Some((" world".to_string(), 5)));
    assert!(!state.is_visible());
    assert_eq!(state.take_for_accept(), None);
}

// =========================================================================
// preview
// =========================================================================

#[test]
fn test_preview_short_text_unchanged() {
    let state = visible(" short", 0);
    assert_eq!(state.preview(40), " short");
}

#[test]
fn test_preview_truncates_long_text() {
    let state = visible(" the quick brown fox jumps over the lazy dog again", 0);
    assert_eq!(state.preview(10), " the quick...");
}

// =========================================================================
// Property-Based Tests
// =========================================================================

// accept() from VISIBLE always ends in NONE with exactly one insertion of the
// held text at the anchor
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_accept_inserts_once_and_clears(
        prefix in "[a-zA-Z ]{0,30}",
        suggestion in " [a-z]{3,20}",
    ) {
        let mut doc = MockDocument::new(&prefix);
        let anchor = prefix.chars().count();
        let mut state = visible(&suggestion, anchor);

        prop_assert!(state.accept(&mut doc));
        prop_assert_eq!(state.phase(), Phase::None);
        prop_assert_eq!(doc.insertions.len(), 1);
        prop_assert_eq!(&doc.insertions[0], &(suggestion.clone(), anchor));

        // A second accept must not insert again
        prop_assert!(!state.accept(&mut doc));
        prop_assert_eq!(doc.insertions.len(), 1);
    }
}

// Phase and payload always agree
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_phase_matches_payload(ops in prop::collection::vec(0u8..4, 0..20)) {
        let mut state = SuggestionState::new();
        for (i, op) in ops.into_iter().enumerate() {
            match op {
                0 => { let _ = state.show(" text", i, true); }
                1 => { let _ = state.show(" text", i, false); }
                2 => { state.dismiss(); }
                _ => { state.reanchor(i); }
            }
            let visible = state.phase() == Phase::Visible;
            prop_assert_eq!(visible, !state.text().is_empty());
            prop_assert_eq!(visible, state.anchor().is_some());
        }
    }
}

//! Keyboard intent routing
//!
//! Decides what a key press means for the inline suggestion before the
//! editor sees it. Only active while a suggestion is visible.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::SuggestionState;

/// What the engine should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRoute {
    /// Consume the key and accept the suggestion
    Accept,
    /// Consume the key and dismiss the suggestion
    Dismiss,
    /// Dismiss, then let the editor run its default action for the key
    DismissAndPassThrough,
    /// Not ours
    PassThrough,
}

/// Whether the editor should still process the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Unhandled,
}

impl KeyRoute {
    pub fn outcome(self) -> KeyOutcome {
        match self {
            KeyRoute::Accept | KeyRoute::Dismiss => KeyOutcome::Handled,
            KeyRoute::DismissAndPassThrough | KeyRoute::PassThrough => KeyOutcome::Unhandled,
        }
    }
}

/// Route a key press against the current suggestion state
///
/// - Tab accepts, Esc dismisses (both consumed)
/// - Arrow keys, Backspace and Delete dismiss but still reach the editor
/// - Everything else, and every key while no suggestion is visible, passes
pub fn route(key: &KeyEvent, state: &SuggestionState) -> KeyRoute {
    if !state.is_visible() {
        return KeyRoute::PassThrough;
    }

    match key.code {
        KeyCode::Tab if key.modifiers == KeyModifiers::NONE => KeyRoute::Accept,
        KeyCode::Esc => KeyRoute::Dismiss,
        KeyCode::Left
        | KeyCode::Right
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Backspace
        | KeyCode::Delete => KeyRoute::DismissAndPassThrough,
        _ => KeyRoute::PassThrough,
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod keys_tests;

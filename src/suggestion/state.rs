//! Suggestion state machine
//!
//! One instance per editor. Every change to the suggestion goes through the
//! methods here; no other component writes the fields directly.

use thiserror::Error;

use crate::document::{DocumentHost, Position};

/// Lifecycle phase of the inline suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No suggestion held
    #[default]
    None,
    /// Suggestion present and anchored to a caret position
    Visible,
}

/// A `show` request whose preconditions were not met
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTransition {
    #[error("caret is not at the end of its text block")]
    CaretNotAtBlockEnd,

    #[error("suggestion text is empty")]
    EmptyText,
}

/// Current inline suggestion
///
/// `text` is non-empty and `anchor` is set exactly when `phase` is `Visible`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    phase: Phase,
    text: String,
    anchor: Option<Position>,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase == Phase::Visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// NONE/VISIBLE -> VISIBLE
    ///
    /// Refused unless the caret sits at the end of its text block. Showing
    /// over an existing suggestion replaces it in place.
    pub fn show(
        &mut self,
        text: impl Into<String>,
        position: Position,
        caret_at_block_end: bool,
    ) -> Result<(), InvalidTransition> {
        let text = text.into();
        if text.is_empty() {
            return Err(InvalidTransition::EmptyText);
        }
        if !caret_at_block_end {
            return Err(InvalidTransition::CaretNotAtBlockEnd);
        }

        self.phase = Phase::Visible;
        self.text = text;
        self.anchor = Some(position);
        Ok(())
    }

    /// VISIBLE -> NONE. Returns whether a suggestion was hidden.
    pub fn dismiss(&mut self) -> bool {
        let was_visible = self.is_visible();
        *self = Self::default();
        was_visible
    }

    /// Move the anchor along with the caret while the user keeps typing
    pub fn reanchor(&mut self, position: Position) {
        if self.is_visible() {
            self.anchor = Some(position);
        }
    }

    /// Clear the state and hand back the text and anchor to insert
    pub fn take_for_accept(&mut self) -> Option<(String, Position)> {
        if !self.is_visible() {
            return None;
        }

        let taken = std::mem::take(self);
        taken.anchor.map(|anchor| (taken.text, anchor))
    }

    /// VISIBLE -> NONE, inserting the suggestion into the document
    ///
    /// The state is cleared before the insertion, so a change notification
    /// raised by the host during `insert_text` already sees NONE. The anchor
    /// is revalidated against the live caret before use.
    pub fn accept(&mut self, host: &mut impl DocumentHost) -> bool {
        let Some((text, anchor)) = self.take_for_accept() else {
            return false;
        };

        let caret = host.caret();
        let position = if caret == anchor {
            anchor
        } else {
            log::debug!("Suggestion anchor {} is stale, inserting at caret {}", anchor, caret);
            caret
        };

        host.insert_text(&text, position);
        true
    }

    /// Suggestion text cut to `max_chars`, with `...` when truncated
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.chars().count() > max_chars {
            let cut: String = self.text.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;

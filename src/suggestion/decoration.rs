//! Inline suggestion decoration
//!
//! Purely derived from the suggestion state and the live caret. The
//! decoration is presentation only: it never enters the document buffer.

use super::state::SuggestionState;
use crate::document::{DocumentHost, Position};

/// Inert ghost text painted right after the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub position: Position,
    pub text: String,
}

/// Project the current suggestion onto the document
///
/// Only produced while a suggestion is visible and the caret sits at the end
/// of a text block.
pub fn decoration(state: &SuggestionState, host: &impl DocumentHost) -> Option<Decoration> {
    if !state.is_visible() || !host.is_caret_in_text_block() || !host.is_caret_at_block_end() {
        return None;
    }

    Some(Decoration {
        position: host.caret(),
        text: state.text().to_string(),
    })
}

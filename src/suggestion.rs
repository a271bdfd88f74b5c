//! Inline suggestion core
//!
//! Everything between a keystroke and the ghost text painted after the
//! caret. [`SuggestionEngine`] is the entry point; the submodules are the
//! pieces it drives.

pub mod debouncer;
pub mod decoration;
pub mod engine;
pub mod keys;
pub mod sanitizer;
pub mod state;
pub mod trigger_table;

pub use decoration::Decoration;
pub use engine::{PendingFetch, SuggestionEngine, SuggestionEvent};
pub use keys::KeyOutcome;
pub use sanitizer::{Rejection, SanitizedSuggestion, sanitize};
pub use state::{Phase, SuggestionState};
pub use trigger_table::TriggerTable;

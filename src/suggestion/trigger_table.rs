//! Static suggestion table
//!
//! Fixed trigger phrase -> completion pairs used when remote completion is
//! disabled, the prompt is too short, or the completion service fails.

use std::collections::BTreeMap;

/// Immutable mapping of trigger phrase to completion text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerTable {
    entries: BTreeMap<String, String>,
}

impl TriggerTable {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Find the completion for the current block text
    ///
    /// The trimmed text must end with the trigger *and* be exactly as long as
    /// it, so a suggestion only fires on the bare trigger and not again once
    /// the user has typed past it. Returns an empty string when nothing matches.
    pub fn lookup(&self, current_text: &str) -> &str {
        let trimmed = current_text.trim();

        self.entries
            .iter()
            .find(|(trigger, _)| {
                trimmed.ends_with(trigger.as_str()) && trimmed.len() == trigger.len()
            })
            .map(|(_, completion)| completion.as_str())
            .unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TriggerTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

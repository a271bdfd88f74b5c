//! Suggestion sanitizer
//!
//! Cleans raw completion text before it is shown inline. Completion services
//! tend to echo the prompt back, wrap lines, or repeat the last few words the
//! user typed; all of that is stripped or rejected here.
//!
//! Pure functions only: the same prompt and completion always produce the
//! same result.

use thiserror::Error;

/// Default minimum length (in characters) of an accepted suggestion
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Default number of words compared at the prompt/suggestion seam
pub const DEFAULT_REPETITION_WINDOW: usize = 3;

/// A suggestion that passed every sanitizer check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSuggestion {
    pub text: String,
}

/// Why a completion was discarded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("completion is empty after cleanup")]
    Empty,

    #[error("completion is shorter than {0} characters")]
    TooShort(usize),

    #[error("completion repeats the prompt")]
    SelfRepetition,

    #[error("completion repeats the word \"{0}\"")]
    AdjacentRepetition(String),
}

/// Tunables for [`sanitize_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizerOptions {
    /// Suggestions shorter than this are rejected
    pub min_length: usize,
    /// How many trailing prompt words / leading suggestion words are compared
    pub repetition_window: usize,
}

impl Default for SanitizerOptions {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            repetition_window: DEFAULT_REPETITION_WINDOW,
        }
    }
}

/// Sanitize a raw completion with default options
pub fn sanitize(prompt: &str, raw_completion: &str) -> Result<SanitizedSuggestion, Rejection> {
    sanitize_with(&SanitizerOptions::default(), prompt, raw_completion)
}

/// Sanitize a raw completion for the given prompt
///
/// Steps, in order:
/// 1. Strip the prompt if the completion echoes it verbatim
/// 2. Otherwise strip the longest word-aligned prompt suffix the completion
///    starts with
/// 3. Normalize line endings, tabs and Unicode line separators
/// 4. Trim, and drop any leading line feed (suggestions render inline)
/// 5. Reject short results
/// 6. Reject self-repetition and repeated words at the seam
/// 7. Prepend a joining space when neither side supplies one
pub fn sanitize_with(
    options: &SanitizerOptions,
    prompt: &str,
    raw_completion: &str,
) -> Result<SanitizedSuggestion, Rejection> {
    let original = prompt.trim();
    let stripped = strip_echo(original, raw_completion.trim());
    let normalized = normalize_whitespace(stripped);

    let mut text = normalized.trim();
    while let Some(rest) = text.strip_prefix('\n') {
        text = rest.trim_start();
    }

    if text.is_empty() {
        return Err(Rejection::Empty);
    }
    if text.chars().count() < options.min_length {
        return Err(Rejection::TooShort(options.min_length));
    }

    check_repetition(original, text, options.repetition_window)?;

    let text = if !prompt.ends_with(char::is_whitespace) && !text.starts_with(char::is_whitespace)
    {
        format!(" {}", text)
    } else {
        text.to_string()
    };

    Ok(SanitizedSuggestion { text })
}

/// Remove an echoed prompt (or its word-aligned tail) from the completion
fn strip_echo<'a>(original: &str, raw: &'a str) -> &'a str {
    if original.is_empty() {
        return raw;
    }

    if let Some(rest) = raw.strip_prefix(original) {
        return rest;
    }

    for suffix in word_suffixes(original) {
        if let Some(rest) = raw.strip_prefix(suffix) {
            return rest;
        }
    }

    raw
}

/// Proper suffixes of `text` that begin at a word start, longest first
fn word_suffixes(text: &str) -> impl Iterator<Item = &str> {
    let mut prev_whitespace = false;
    text.char_indices().filter_map(move |(i, c)| {
        let word_start = prev_whitespace && !c.is_whitespace();
        prev_whitespace = c.is_whitespace();
        word_start.then(|| &text[i..])
    })
}

fn normalize_whitespace(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .map(|c| match c {
            '\r' | '\u{2028}' | '\u{2029}' => '\n',
            '\t' => ' ',
            c => c,
        })
        .collect()
}

fn check_repetition(original: &str, text: &str, window: usize) -> Result<(), Rejection> {
    let prompt_lower = original.to_lowercase();
    let text_lower = text.to_lowercase();

    if !prompt_lower.is_empty() && text_lower.contains(&prompt_lower) {
        return Err(Rejection::SelfRepetition);
    }

    let prompt_words: Vec<&str> = prompt_lower.split_whitespace().collect();
    let leading_words: Vec<&str> = text_lower.split_whitespace().take(window).collect();
    let trailing_words = &prompt_words[prompt_words.len().saturating_sub(window)..];

    for word in trailing_words {
        if word.chars().count() > 2 && leading_words.contains(word) {
            return Err(Rejection::AdjacentRepetition((*word).to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sanitizer_tests.rs"]
mod sanitizer_tests;

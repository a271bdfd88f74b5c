// Configuration type definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::completion::client::DEFAULT_API_URL;
use crate::suggestion::debouncer::DEFAULT_QUIET_INTERVAL_MS;
use crate::suggestion::sanitizer::{
    DEFAULT_MIN_LENGTH, DEFAULT_REPETITION_WINDOW, SanitizerOptions,
};
use crate::suggestion::trigger_table::TriggerTable;

/// Default minimum prompt length (trimmed characters) for remote completion
pub const DEFAULT_MIN_PROMPT_LENGTH: usize = 3;

/// Default completion request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remote completion section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Use the remote completion service (static table otherwise)
    pub enabled: bool,
    pub api_url: String,
    /// Typing pause before a suggestion is requested
    pub quiet_interval_ms: u64,
    /// Shorter paragraphs only consult the static table
    pub min_prompt_length: usize,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig {
            enabled: true,
            api_url: DEFAULT_API_URL.to_string(),
            quiet_interval_ms: DEFAULT_QUIET_INTERVAL_MS,
            min_prompt_length: DEFAULT_MIN_PROMPT_LENGTH,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Sanitizer tunables section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub min_length: usize,
    pub repetition_window: usize,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        SanitizerConfig {
            min_length: DEFAULT_MIN_LENGTH,
            repetition_window: DEFAULT_REPETITION_WINDOW,
        }
    }
}

impl SanitizerConfig {
    pub fn options(&self) -> SanitizerOptions {
        SanitizerOptions {
            min_length: self.min_length,
            repetition_window: self.repetition_window,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
    /// Static trigger phrase -> completion table
    #[serde(default)]
    pub suggestions: BTreeMap<String, String>,
}

impl Config {
    pub fn trigger_table(&self) -> TriggerTable {
        TriggerTable::new(self.suggestions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.completion.enabled);
        assert_eq!(config.completion.quiet_interval_ms, 2000);
        assert_eq!(config.completion.min_prompt_length, 3);
        assert_eq!(config.sanitizer.repetition_window, 3);
        assert!(config.trigger_table().is_empty());
    }

    #[test]
    fn test_full_config_parses() {
        let toml_content = r#"
[completion]
enabled = false
api_url = "http://example.test/complete"
quiet_interval_ms = 750
min_prompt_length = 5
timeout_secs = 4

[sanitizer]
min_length = 4
repetition_window = 2

[suggestions]
"Dear" = " Sir or Madam,"
"Best" = " regards,"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();

        assert!(!config.completion.enabled);
        assert_eq!(config.completion.api_url, "http://example.test/complete");
        assert_eq!(config.completion.quiet_interval_ms, 750);
        assert_eq!(config.completion.min_prompt_length, 5);
        assert_eq!(config.completion.timeout_secs, 4);
        assert_eq!(
            config.sanitizer.options(),
            SanitizerOptions {
                min_length: 4,
                repetition_window: 2
            }
        );
        assert_eq!(config.trigger_table().lookup("Dear"), " Sir or Madam,");
        assert_eq!(config.trigger_table().lookup("Best"), " regards,");
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = Config::default();
        config
            .suggestions
            .insert("Dear".to_string(), " Sir or Madam,".to_string());

        let rendered = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    // Missing optional fields always fall back to defaults
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_missing_fields_use_defaults(
            include_section in prop::bool::ANY,
            include_interval in prop::bool::ANY,
            interval in 1u64..10_000,
        ) {
            let toml_content = match (include_section, include_interval) {
                (false, _) => String::new(),
                (true, false) => "[completion]\n".to_string(),
                (true, true) => format!("[completion]\nquiet_interval_ms = {}\n", interval),
            };

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse config: {:?}", toml_content);
            let config = config.unwrap();

            let expected = if include_section && include_interval {
                interval
            } else {
                DEFAULT_QUIET_INTERVAL_MS
            };
            prop_assert_eq!(config.completion.quiet_interval_ms, expected);
            prop_assert_eq!(config.completion.min_prompt_length, DEFAULT_MIN_PROMPT_LENGTH);
            prop_assert!(config.completion.enabled);
        }
    }
}

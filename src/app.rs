//! Editor application state
//!
//! Glues the textarea host to the suggestion engine and keeps the status
//! line text. Terminal setup and drawing live in `main.rs` and `render.rs`.

use std::path::PathBuf;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::document::ChangeOrigin;
use crate::editor::TextAreaHost;
use crate::render::Viewport;
use crate::suggestion::{KeyOutcome, SuggestionEngine, SuggestionEvent};

/// Longest suggestion preview shown in the status line
pub const PREVIEW_CHARS: usize = 40;

pub struct App {
    pub host: TextAreaHost,
    pub engine: SuggestionEngine,
    pub viewport: Viewport,
    pub file: Option<PathBuf>,
    /// Last thing worth telling the user
    pub status: String,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, host: TextAreaHost) -> Self {
        Self {
            host,
            engine: SuggestionEngine::new(config),
            viewport: Viewport::default(),
            file: None,
            status: String::new(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match self.engine.on_key_down(&key, &mut self.host) {
            KeyOutcome::Handled => {
                self.engine
                    .on_change(ChangeOrigin::Programmatic, &self.host);
            }
            KeyOutcome::Unhandled => {
                if let Some(origin) = self.host.input(key) {
                    self.engine.on_change(origin, &self.host);
                }
            }
        }

        self.drain_events();
    }

    /// Advance timers and apply worker responses; call once per frame
    pub fn tick(&mut self) {
        self.engine.tick(&self.host);
        self.engine.poll_responses(&self.host);
        self.drain_events();
    }

    /// Stop background work before exit
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    /// Keybinding hint for the current state
    pub fn hint(&self) -> &'static str {
        if self.engine.state().is_visible() {
            "Tab accept  Esc dismiss"
        } else {
            "Ctrl+Q quit"
        }
    }

    fn drain_events(&mut self) {
        for event in self.engine.take_events() {
            self.status = match event {
                SuggestionEvent::Shown(_) => {
                    format!("Suggestion: {}", self.engine.state().preview(PREVIEW_CHARS).trim())
                }
                SuggestionEvent::Hidden => String::new(),
                SuggestionEvent::FetchError(error) => format!("Completion unavailable: {}", error),
            };
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;

//! Suggestion engine
//!
//! Per-editor context that wires the pieces together:
//!
//! keystroke -> [`route`] -> document edit -> [`SuggestionEngine::on_change`]
//! -> debouncer -> [`SuggestionEngine::tick`] -> completion worker (or static
//! table) -> [`SuggestionEngine::poll_responses`] -> sanitizer -> state
//! machine -> decoration.
//!
//! Everything runs on the editor thread. The only asynchronous step is the
//! completion request; its response is applied only when its `request_id`
//! is the latest one issued.

use std::sync::mpsc::Receiver;
use std::time::Instant;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

use super::debouncer::Debouncer;
use super::decoration::{Decoration, decoration};
use super::keys::{KeyOutcome, KeyRoute, route};
use super::sanitizer::{SanitizerOptions, sanitize_with};
use super::state::SuggestionState;
use super::trigger_table::TriggerTable;
use crate::completion::{CompletionRequest, CompletionResponse};
use crate::config::Config;
use crate::document::{ChangeOrigin, DocumentHost};

/// Outstanding completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub request_id: u64,
    pub prompt: String,
}

impl PendingFetch {
    /// Whether the caret is still in the paragraph this request was made for
    fn matches(&self, host: &impl DocumentHost) -> bool {
        host.is_caret_in_text_block() && host.current_block_text() == self.prompt
    }
}

/// Notifications for the host (status bar, tests)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEvent {
    Shown(String),
    Hidden,
    FetchError(String),
}

pub struct SuggestionEngine {
    state: SuggestionState,
    debouncer: Debouncer,
    table: TriggerTable,
    sanitizer: SanitizerOptions,
    remote_enabled: bool,
    min_prompt_length: usize,
    /// Last issued request ID; responses for any other ID are stale
    request_id: u64,
    pending: Option<PendingFetch>,
    request_tx: Option<UnboundedSender<CompletionRequest>>,
    response_rx: Option<Receiver<CompletionResponse>>,
    events: Vec<SuggestionEvent>,
}

impl SuggestionEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            state: SuggestionState::new(),
            debouncer: Debouncer::new(config.completion.quiet_interval_ms),
            table: config.trigger_table(),
            sanitizer: config.sanitizer.options(),
            remote_enabled: config.completion.enabled,
            min_prompt_length: config.completion.min_prompt_length,
            request_id: 0,
            pending: None,
            request_tx: None,
            response_rx: None,
            events: Vec::new(),
        }
    }

    /// Connect the engine to a completion worker
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<CompletionRequest>,
        response_rx: Receiver<CompletionResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingFetch> {
        self.pending.as_ref()
    }

    pub fn current_request_id(&self) -> u64 {
        self.request_id
    }

    pub fn is_timer_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Drain events emitted since the last call
    pub fn take_events(&mut self) -> Vec<SuggestionEvent> {
        std::mem::take(&mut self.events)
    }

    // =====================================================================
    // Host notifications
    // =====================================================================

    /// Route a key press before the editor handles it
    ///
    /// Returns `Unhandled` when the editor should still run its default
    /// action for the key.
    pub fn on_key_down(&mut self, key: &KeyEvent, host: &mut impl DocumentHost) -> KeyOutcome {
        let route = route(key, &self.state);
        match route {
            KeyRoute::Accept => {
                self.accept_suggestion(host);
            }
            KeyRoute::Dismiss | KeyRoute::DismissAndPassThrough => {
                self.hide_suggestion();
            }
            KeyRoute::PassThrough => {}
        }
        route.outcome()
    }

    pub fn on_change(&mut self, origin: ChangeOrigin, host: &impl DocumentHost) {
        self.on_change_at(origin, host, Instant::now());
    }

    pub fn on_change_at(&mut self, origin: ChangeOrigin, host: &impl DocumentHost, now: Instant) {
        match origin {
            ChangeOrigin::Input => {
                self.supersede_pending();
                self.state.reanchor(host.caret());
                self.debouncer.schedule_at(now);
            }
            ChangeOrigin::Selection => {
                self.supersede_pending();
                self.hide_suggestion();
            }
            ChangeOrigin::Programmatic => {}
        }
    }

    /// Fire the debounced request if typing has paused long enough
    pub fn tick(&mut self, host: &impl DocumentHost) {
        self.tick_at(Instant::now(), host);
    }

    pub fn tick_at(&mut self, now: Instant, host: &impl DocumentHost) {
        if self.debouncer.take_due_at(now) {
            self.request_suggestion(host);
        }
    }

    /// Apply any responses the completion worker has sent
    pub fn poll_responses(&mut self, host: &impl DocumentHost) {
        let responses: Vec<CompletionResponse> = match &self.response_rx {
            Some(rx) => rx.try_iter().collect(),
            None => return,
        };

        for response in responses {
            self.handle_response(response, host);
        }
    }

    // =====================================================================
    // Fetching
    // =====================================================================

    /// Look for a suggestion for the current block right away
    ///
    /// Issues a remote request when enabled and the prompt is long enough,
    /// otherwise consults the static table.
    pub fn request_suggestion(&mut self, host: &impl DocumentHost) {
        if !host.is_caret_in_text_block() {
            return;
        }

        let prompt = host.current_block_text();

        if self.remote_enabled
            && prompt.trim().chars().count() >= self.min_prompt_length
            && let Some(tx) = &self.request_tx
        {
            let request_id = self.request_id.wrapping_add(1);
            if tx
                .send(CompletionRequest::Fetch {
                    prompt: prompt.clone(),
                    request_id,
                })
                .is_ok()
            {
                self.request_id = request_id;
                self.pending = Some(PendingFetch { request_id, prompt });
                log::debug!("Issued completion request {}", request_id);
                return;
            }
            log::warn!("Completion worker unavailable, using static suggestions");
        }

        let suggestion = self.table.lookup(&prompt).to_string();
        self.apply_suggestion(suggestion, host);
    }

    /// Apply one worker response, discarding it if stale
    pub fn handle_response(&mut self, response: CompletionResponse, host: &impl DocumentHost) {
        match response {
            CompletionResponse::Completed { request_id, text } => {
                let Some(pending) = self.take_pending(request_id) else {
                    log::debug!("Discarding stale response for request {}", request_id);
                    return;
                };
                if !pending.matches(host) {
                    log::debug!("Request {} was for another paragraph, dropping", request_id);
                    return;
                }

                let suggestion = match sanitize_with(&self.sanitizer, &pending.prompt, &text) {
                    Ok(sanitized) => sanitized.text,
                    Err(rejection) => {
                        log::debug!("Suggestion for request {} rejected: {}", request_id, rejection);
                        String::new()
                    }
                };
                self.apply_suggestion(suggestion, host);
            }
            CompletionResponse::Failed { request_id, error } => {
                let Some(pending) = self.take_pending(request_id) else {
                    log::debug!("Discarding stale error for request {}", request_id);
                    return;
                };

                log::warn!("Completion request {} failed: {}", request_id, error);
                self.events.push(SuggestionEvent::FetchError(error.to_string()));

                if pending.matches(host) {
                    let fallback = self.table.lookup(&pending.prompt).to_string();
                    self.apply_suggestion(fallback, host);
                }
            }
            CompletionResponse::Cancelled { request_id } => {
                if self.take_pending(request_id).is_some() {
                    log::debug!("Request {} cancelled by worker", request_id);
                }
            }
        }
    }

    fn take_pending(&mut self, request_id: u64) -> Option<PendingFetch> {
        match &self.pending {
            Some(pending) if pending.request_id == request_id => self.pending.take(),
            _ => None,
        }
    }

    /// Drop the outstanding request; the paragraph it was asked for is gone
    fn supersede_pending(&mut self) {
        if let Some(pending) = self.pending.take()
            && let Some(tx) = &self.request_tx
        {
            let _ = tx.send(CompletionRequest::Cancel {
                request_id: pending.request_id,
            });
        }
    }

    /// Show `text`, or hide the current suggestion when `text` is blank
    fn apply_suggestion(&mut self, text: String, host: &impl DocumentHost) -> bool {
        if text.trim().is_empty() {
            self.hide_suggestion();
            return false;
        }

        let at_block_end = host.is_caret_in_text_block() && host.is_caret_at_block_end();
        match self.state.show(text.clone(), host.caret(), at_block_end) {
            Ok(()) => {
                self.events.push(SuggestionEvent::Shown(text));
                true
            }
            Err(refused) => {
                log::debug!("Suggestion not shown: {}", refused);
                false
            }
        }
    }

    // =====================================================================
    // Commands
    // =====================================================================

    /// Show `text` at the caret without sanitizing it
    pub fn show_suggestion(&mut self, text: &str, host: &impl DocumentHost) -> bool {
        self.apply_suggestion(text.to_string(), host)
    }

    pub fn hide_suggestion(&mut self) -> bool {
        let hidden = self.state.dismiss();
        if hidden {
            self.events.push(SuggestionEvent::Hidden);
        }
        hidden
    }

    /// Insert the visible suggestion at the caret and clear it
    pub fn accept_suggestion(&mut self, host: &mut impl DocumentHost) -> bool {
        let accepted = self.state.accept(host);
        if accepted {
            self.events.push(SuggestionEvent::Hidden);
        }
        accepted
    }

    /// Ghost text to paint for the current caret, if any
    pub fn decoration(&self, host: &impl DocumentHost) -> Option<Decoration> {
        decoration(&self.state, host)
    }

    /// Stop the timer and abandon any outstanding request
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.supersede_pending();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;

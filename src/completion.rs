//! Completion service access
//!
//! `client` talks HTTP to the completion endpoint; `worker` runs it on a
//! background thread so the editor loop never blocks on the network.

use thiserror::Error;

pub mod client;
pub mod worker;

pub use client::CompletionClient;
pub use worker::{CompletionRequest, CompletionResponse, spawn_worker};

/// Errors that can occur while fetching a completion
///
/// None of these reach the user as a failure: callers fall back to the
/// static suggestion table.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Remote completion is disabled or has no endpoint
    #[error("Completion service not configured: {0}")]
    NotConfigured(String),

    /// Transport failure (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Service answered with a non-success status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Response body was not `{ "autocompleted_text": ... }`
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request was superseded or cancelled before it finished
    #[error("Request cancelled")]
    Cancelled,
}

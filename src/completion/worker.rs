//! Completion worker thread
//!
//! Runs completion requests on a background thread with its own
//! current-thread tokio runtime. Requests arrive over an unbounded tokio
//! channel; responses go back over a std channel the editor loop polls
//! without blocking.
//!
//! Only one request is in flight at a time: a new `Fetch` cancels the
//! previous one.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{CompletionClient, ServiceError};
use crate::config::CompletionConfig;

/// Request messages sent to the worker
#[derive(Debug)]
pub enum CompletionRequest {
    /// Fetch a completion for the given paragraph text
    Fetch {
        prompt: String,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
    },
    /// Cancel the request with the given ID
    Cancel { request_id: u64 },
}

/// Response messages sent back by the worker
#[derive(Debug)]
pub enum CompletionResponse {
    /// Raw completion text, not yet sanitized
    Completed { request_id: u64, text: String },
    /// The service could not produce a completion
    Failed {
        request_id: u64,
        error: ServiceError,
    },
    /// The request was cancelled or superseded
    Cancelled { request_id: u64 },
}

struct InFlight {
    request_id: u64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Spawn the completion worker thread
///
/// The provider error (if any) is held until the first request so the
/// caller sees it as an ordinary `Failed` response and falls back.
pub fn spawn_worker(
    config: &CompletionConfig,
) -> (UnboundedSender<CompletionRequest>, Receiver<CompletionResponse>) {
    let client = CompletionClient::from_config(config);
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();

    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to start completion runtime: {}", e);
                return;
            }
        };

        runtime.block_on(worker_loop(client, request_rx, response_tx));
    });

    (request_tx, response_rx)
}

/// Main worker loop - processes requests until the channel is closed
async fn worker_loop(
    client: Result<CompletionClient, ServiceError>,
    mut request_rx: UnboundedReceiver<CompletionRequest>,
    response_tx: Sender<CompletionResponse>,
) {
    let client = match client {
        Ok(client) => Ok(Arc::new(client)),
        Err(e) => {
            log::debug!("Completion service not available: {}", e);
            Err(e.to_string())
        }
    };

    let mut in_flight: Option<InFlight> = None;

    while let Some(request) = request_rx.recv().await {
        match request {
            CompletionRequest::Fetch { prompt, request_id } => {
                if let Some(previous) = in_flight.take() {
                    previous.cancel.cancel();
                    log::debug!(
                        "Request {} superseded by {}",
                        previous.request_id,
                        request_id
                    );
                }

                let client = match &client {
                    Ok(client) => Arc::clone(client),
                    Err(reason) => {
                        let _ = response_tx.send(CompletionResponse::Failed {
                            request_id,
                            error: ServiceError::NotConfigured(reason.clone()),
                        });
                        continue;
                    }
                };

                let cancel = CancellationToken::new();
                let handle = tokio::spawn(run_fetch(
                    client,
                    prompt,
                    request_id,
                    cancel.clone(),
                    response_tx.clone(),
                ));
                in_flight = Some(InFlight {
                    request_id,
                    cancel,
                    handle,
                });
            }
            CompletionRequest::Cancel { request_id } => match &in_flight {
                Some(active) if active.request_id == request_id => {
                    active.cancel.cancel();
                    log::debug!("Cancelled request {} while in flight", request_id);
                }
                _ => {
                    let _ = response_tx.send(CompletionResponse::Cancelled { request_id });
                    log::debug!("Cancelled request {} (no active request)", request_id);
                }
            },
        }
    }

    if let Some(active) = in_flight {
        let _ = active.handle.await;
    }

    log::debug!("Completion worker shutting down");
}

async fn run_fetch(
    client: Arc<CompletionClient>,
    prompt: String,
    request_id: u64,
    cancel: CancellationToken,
    response_tx: Sender<CompletionResponse>,
) {
    let response = match client.fetch_with_cancel(&prompt, &cancel).await {
        Ok(text) => CompletionResponse::Completed { request_id, text },
        Err(ServiceError::Cancelled) => CompletionResponse::Cancelled { request_id },
        Err(error) => {
            log::debug!("Request {} failed: {}", request_id, error);
            CompletionResponse::Failed { request_id, error }
        }
    };

    // Receiver gone means the editor shut down
    let _ = response_tx.send(response);
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;

//! Bounded background dispatch queue.
//!
//! The original deployment model for this kind of agent is to isolate
//! each delivery on its own unit of concurrency so a slow collector
//! can never delay the host application's response. [`DispatchQueue`]
//! keeps that contract with a fixed ceiling: a bounded channel feeds a
//! fixed pool of delivery workers, and when the channel is full the
//! event is dropped instead of blocking the caller.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::Mutex;

use crate::dispatcher::Dispatcher;

/// One telemetry event awaiting delivery.
#[derive(Debug)]
pub enum TelemetryEvent {
    /// A captured unhandled exception.
    Error {
        exception: String,
        url: String,
        traceback: String,
    },
    /// A request/response timing sample.
    Response {
        url: String,
        elapsed: std::time::Duration,
    },
    /// An inbound request record.
    Request { url: String },
}

impl TelemetryEvent {
    /// Short event kind label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TelemetryEvent::Error { .. } => "error",
            TelemetryEvent::Response { .. } => "response",
            TelemetryEvent::Request { .. } => "request",
        }
    }
}

/// Bounded fire-and-forget delivery queue.
///
/// Created once at startup and shared for the process lifetime; it
/// holds no unmanaged resources, so there is no teardown. Worker tasks
/// exit when the queue (and with it the channel) is dropped.
pub struct DispatchQueue {
    tx: mpsc::Sender<TelemetryEvent>,
}

impl DispatchQueue {
    /// Spawn the delivery workers and return the queue handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(dispatcher: Dispatcher, capacity: usize, worker_count: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let dispatcher = Arc::new(dispatcher);

        for worker in 0..worker_count.max(1) {
            let rx = Arc::clone(&rx);
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                loop {
                    // Hold the lock only while waiting for an event, so
                    // the other workers can receive during delivery.
                    let event = { rx.lock().await.recv().await };
                    match event {
                        Some(event) => deliver(&dispatcher, event).await,
                        None => break,
                    }
                }
                tracing::debug!(worker, "Dispatch worker stopped");
            });
        }

        Self { tx }
    }

    /// Hand an event to the background workers without blocking.
    ///
    /// When the queue is full the event is dropped with a warning --
    /// losing telemetry under pressure is preferable to delaying the
    /// host application's response.
    pub fn enqueue(&self, event: TelemetryEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(kind = event.kind(), "Telemetry queue full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(kind = event.kind(), "Telemetry queue closed, dropping event");
            }
        }
    }
}

/// Deliver one event, logging (and otherwise swallowing) any failure.
/// Delivery failures never reach the instrumented application.
async fn deliver(dispatcher: &Dispatcher, event: TelemetryEvent) {
    let kind = event.kind();
    let result = match &event {
        TelemetryEvent::Error {
            exception,
            url,
            traceback,
        } => dispatcher.send_error(exception, url, traceback).await,
        TelemetryEvent::Response { url, elapsed } => {
            dispatcher.send_response(url, *elapsed).await
        }
        TelemetryEvent::Request { url } => dispatcher.send_request(url).await,
    };

    if let Err(e) = result {
        tracing::warn!(kind, error = %e, "Telemetry delivery failed");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

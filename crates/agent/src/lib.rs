//! `stardust-agent` -- client-side telemetry instrumentation.
//!
//! Embedded in an instrumented application, this crate captures
//! unhandled failures and request timings and ships them to a central
//! stardust collector over HTTP, without ever blocking or failing the
//! request being served.
//!
//! # Usage
//!
//! ```ignore
//! let config = AgentConfig::from_env()?;
//! let telemetry = TelemetryHandle::init(config);
//!
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(telemetry.layer());
//! ```

use std::sync::Arc;
use std::time::Duration;

pub mod config;
pub mod dispatcher;
pub mod middleware;
pub mod queue;

pub use config::AgentConfig;
pub use dispatcher::{DispatchError, Dispatcher};
pub use middleware::CaptureLayer;
pub use queue::TelemetryEvent;

use queue::DispatchQueue;

/// Process-wide telemetry state.
///
/// Built once at startup by [`TelemetryHandle::init`] and cloned
/// freely afterwards (clones share the same queue). It is read-only
/// after construction and holds no unmanaged resources, so there is
/// no teardown: the delivery workers exit with the runtime.
#[derive(Clone)]
pub struct TelemetryHandle {
    queue: Arc<DispatchQueue>,
}

impl TelemetryHandle {
    /// Build the dispatcher and start the bounded delivery queue.
    ///
    /// Must be called from within a tokio runtime.
    pub fn init(config: AgentConfig) -> Self {
        let queue_capacity = config.queue_capacity;
        let dispatch_workers = config.dispatch_workers;
        let dispatcher = Dispatcher::new(config);
        let queue = DispatchQueue::start(dispatcher, queue_capacity, dispatch_workers);
        Self {
            queue: Arc::new(queue),
        }
    }

    /// Build the capture middleware layer for the host application.
    pub fn layer(&self) -> CaptureLayer {
        CaptureLayer::new(self.clone())
    }

    /// Report a captured exception. Non-blocking.
    pub fn record_error(&self, exception: &str, url: &str, traceback: &str) {
        self.queue.enqueue(TelemetryEvent::Error {
            exception: exception.to_string(),
            url: url.to_string(),
            traceback: traceback.to_string(),
        });
    }

    /// Report a request-timing sample. Non-blocking.
    pub fn record_response(&self, url: &str, elapsed: Duration) {
        self.queue.enqueue(TelemetryEvent::Response {
            url: url.to_string(),
            elapsed,
        });
    }

    /// Report an inbound request. Non-blocking.
    pub fn record_request(&self, url: &str) {
        self.queue.enqueue(TelemetryEvent::Request {
            url: url.to_string(),
        });
    }
}

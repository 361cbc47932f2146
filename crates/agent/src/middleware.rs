//! Request capture middleware.
//!
//! [`CaptureLayer`] instruments every request/response cycle of the
//! host application: it measures elapsed time and reports it as a
//! timing sample, and it intercepts unhandled failures (service errors
//! and panics) as error events. Failures are reported and then
//! propagated untouched, so the host's own error handling still sees
//! them. Instrumentation itself can never replace the wrapped
//! application's response: event hand-off is a non-blocking enqueue.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use futures::FutureExt;
use http::{Request, Response};
use tower::{Layer, Service};

use crate::TelemetryHandle;

/// Layer that wraps services in [`Capture`].
#[derive(Clone)]
pub struct CaptureLayer {
    handle: TelemetryHandle,
}

impl CaptureLayer {
    pub fn new(handle: TelemetryHandle) -> Self {
        Self { handle }
    }
}

impl<S> Layer<S> for CaptureLayer {
    type Service = Capture<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Capture {
            inner,
            handle: self.handle.clone(),
        }
    }
}

/// Middleware service that reports telemetry for each request.
#[derive(Clone)]
pub struct Capture<S> {
    inner: S,
    handle: TelemetryHandle,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for Capture<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Error: std::fmt::Display,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let started = Instant::now();
        let url = request_url(&req);
        let handle = self.handle.clone();
        let future = self.inner.call(req);

        Box::pin(async move {
            // catch_unwind so a panicking handler is reported before the
            // panic continues on to the host's own recovery layer.
            match std::panic::AssertUnwindSafe(future).catch_unwind().await {
                Ok(Ok(response)) => {
                    handle.record_response(&url, started.elapsed());
                    Ok(response)
                }
                Ok(Err(err)) => {
                    let message = err.to_string();
                    handle.record_error(&message, &url, &capture_trace(&message));
                    Err(err)
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    handle.record_error(&message, &url, &capture_trace(&message));
                    std::panic::resume_unwind(panic)
                }
            }
        })
    }
}

/// Reconstruct the request URL the way the collector expects it:
/// `http://<host><path>`, host (with port) from the Host header.
fn request_url<B>(req: &Request<B>) -> String {
    let host = req
        .headers()
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{}{}", host, req.uri().path())
}

/// Best-effort stack capture at the report site. Falls back to the
/// failure message so the traceback field is never empty.
fn capture_trace(fallback: &str) -> String {
    let trace = std::backtrace::Backtrace::force_capture().to_string();
    if trace.trim().is_empty() || trace.contains("unsupported backtrace") {
        fallback.to_string()
    } else {
        trace
    }
}

/// Extract a printable message from a panic payload.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_uses_host_header_and_path() {
        let req = Request::builder()
            .uri("/some/path?query=1")
            .header("host", "testapp.local:8080")
            .body(())
            .unwrap();
        assert_eq!(request_url(&req), "http://testapp.local:8080/some/path");
    }

    #[test]
    fn request_url_falls_back_without_host_header() {
        let req = Request::builder().uri("/").body(()).unwrap();
        assert_eq!(request_url(&req), "http://localhost/");
    }

    #[test]
    fn panic_message_handles_str_and_string_payloads() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("boom owned"));
        assert_eq!(panic_message(boxed.as_ref()), "boom owned");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(boxed.as_ref()), "panic with non-string payload");
    }

    #[test]
    fn capture_trace_never_returns_empty() {
        let trace = capture_trace("fallback message");
        assert!(!trace.trim().is_empty());
    }
}

//! Telemetry payload validation: constants and pure functions.
//!
//! Used by the API ingestion handlers to check submitted form fields
//! before anything touches storage. Lives in `core` to maintain the
//! zero internal dependency constraint.

use std::borrow::Cow;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum stored length of an exception message. Longer input is
/// truncated, not rejected -- crash data should be kept, not bounced.
pub const MAX_EXCEPTION_LEN: usize = 255;

/// Maximum stored size of a traceback, in bytes.
pub const MAX_TRACEBACK_LEN: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Extract a required form field.
///
/// A field that is absent from the submission or present but empty is
/// treated the same way: validation failure naming the field.
pub fn require_field<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, CoreError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!(
            "Field \"{name}\" is required and must not be empty"
        ))),
    }
}

/// Parse the `time` field of a response sample.
///
/// The value arrives as a decimal string (e.g. `"0.1123"`, seconds).
/// Rejects non-numeric, non-finite, and negative values.
pub fn parse_time_secs(raw: &str) -> Result<f64, CoreError> {
    let time: f64 = raw
        .parse()
        .map_err(|_| CoreError::Validation(format!("Field \"time\" is not a number: \"{raw}\"")))?;
    if !time.is_finite() || time < 0.0 {
        return Err(CoreError::Validation(format!(
            "Field \"time\" must be a non-negative finite number, got {time}"
        )));
    }
    Ok(time)
}

// ---------------------------------------------------------------------------
// Size caps
// ---------------------------------------------------------------------------

/// Cap an exception message at [`MAX_EXCEPTION_LEN`] characters.
pub fn truncate_exception(msg: &str) -> Cow<'_, str> {
    truncate_chars(msg, MAX_EXCEPTION_LEN)
}

/// Cap a traceback at [`MAX_TRACEBACK_LEN`] bytes (on a char boundary).
pub fn truncate_traceback(trace: &str) -> Cow<'_, str> {
    if trace.len() <= MAX_TRACEBACK_LEN {
        return Cow::Borrowed(trace);
    }
    let mut end = MAX_TRACEBACK_LEN;
    while !trace.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(trace[..end].to_string())
}

fn truncate_chars(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(s[..idx].to_string()),
        None => Cow::Borrowed(s),
    }
}

// ---------------------------------------------------------------------------
// List clamping
// ---------------------------------------------------------------------------

/// Clamp a requested page size into `1..=max`, falling back to `default`.
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, max)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(requested: Option<i64>) -> i64 {
    requested.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

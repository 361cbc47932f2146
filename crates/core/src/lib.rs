//! `stardust-core` -- shared types, errors, and pure telemetry helpers.
//!
//! This crate has zero internal dependencies so both the server crates
//! (`stardust-db`, `stardust-api`) and the client agent
//! (`stardust-agent`) can depend on it.

pub mod error;
pub mod telemetry;
pub mod types;

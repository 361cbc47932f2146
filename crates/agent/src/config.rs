//! Agent configuration.
//!
//! Credentials and delivery tuning for the telemetry pipeline. Loaded
//! once at startup, read-only thereafter.

/// Default bound on the number of events waiting for delivery.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Default number of background delivery workers.
pub const DEFAULT_DISPATCH_WORKERS: usize = 4;

/// Error raised when required configuration is absent or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is required")]
    Missing(&'static str),

    #[error("Environment variable {0} is not a valid value")]
    Invalid(&'static str),
}

/// Configuration for the telemetry agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the collector, e.g. `http://stardust.example.com`.
    pub api_url: String,
    /// Operator username sent as HTTP Basic credentials.
    pub username: String,
    /// Operator password sent as HTTP Basic credentials.
    pub password: String,
    /// Project token identifying the reporting application.
    pub token: String,
    /// Bound on the number of events waiting for delivery; events
    /// beyond it are dropped rather than blocking the host request.
    pub queue_capacity: usize,
    /// Number of background delivery workers.
    pub dispatch_workers: usize,
}

impl AgentConfig {
    /// Build a configuration with default queue tuning.
    pub fn new(
        api_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            username: username.into(),
            password: password.into(),
            token: token.into(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            dispatch_workers: DEFAULT_DISPATCH_WORKERS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable                   | Required | Default | Description                       |
    /// |----------------------------|----------|---------|-----------------------------------|
    /// | `STARDUST_API_URL`         | yes      | --      | Collector base URL                |
    /// | `STARDUST_USERNAME`        | yes      | --      | Operator username (Basic auth)    |
    /// | `STARDUST_PASSWORD`        | yes      | --      | Operator password (Basic auth)    |
    /// | `STARDUST_PROJECT_TOKEN`   | yes      | --      | Project token                     |
    /// | `STARDUST_QUEUE_CAPACITY`  | no       | `256`   | Pending-event bound               |
    /// | `STARDUST_DISPATCH_WORKERS`| no       | `4`     | Delivery worker count             |
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = require_env("STARDUST_API_URL")?;
        let username = require_env("STARDUST_USERNAME")?;
        let password = require_env("STARDUST_PASSWORD")?;
        let token = require_env("STARDUST_PROJECT_TOKEN")?;

        let queue_capacity =
            optional_usize("STARDUST_QUEUE_CAPACITY", DEFAULT_QUEUE_CAPACITY)?;
        let dispatch_workers =
            optional_usize("STARDUST_DISPATCH_WORKERS", DEFAULT_DISPATCH_WORKERS)?;

        Ok(Self {
            api_url,
            username,
            password,
            token,
            queue_capacity,
            dispatch_workers,
        })
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn optional_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Operator account for the panel endpoints (HTTP Basic).
    pub operator_username: String,
    /// Operator password. The default is only meant for local
    /// development; set `OPERATOR_PASSWORD` everywhere else.
    pub operator_password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default     |
    /// |------------------------|-------------|
    /// | `HOST`                 | `0.0.0.0`   |
    /// | `PORT`                 | `8000`      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`        |
    /// | `OPERATOR_USERNAME`    | `admin`     |
    /// | `OPERATOR_PASSWORD`    | `stardust`  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let operator_username =
            std::env::var("OPERATOR_USERNAME").unwrap_or_else(|_| "admin".into());
        let operator_password =
            std::env::var("OPERATOR_PASSWORD").unwrap_or_else(|_| "stardust".into());

        Self {
            host,
            port,
            request_timeout_secs,
            operator_username,
            operator_password,
        }
    }
}

//! Server configuration from the environment.

use crate::auth::jwt::JwtConfig;

/// Runtime configuration for the API server.
///
/// Defaults suit local development; production overrides everything via
/// environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address. `HOST`, default `0.0.0.0`.
    pub host: String,
    /// Bind port. `PORT`, default `3000`.
    pub port: u16,
    /// Allowed CORS origins. `CORS_ORIGINS`, comma-separated, default
    /// `http://localhost:5173`.
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds. `REQUEST_TIMEOUT_SECS`, default `30`.
    pub request_timeout_secs: u64,
    /// JWT validation settings (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics on malformed values so a misconfigured server refuses to
    /// start instead of running with surprising settings.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", "3000"),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", "30"),
            jwt: JwtConfig::from_env(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_or(key, default)
        .parse()
        .unwrap_or_else(|e| panic!("{key} must be a valid value: {e}"))
}

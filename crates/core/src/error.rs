//! Domain error taxonomy.
//!
//! Three failure classes cover the read-only API surface: rejected
//! parameters, unauthenticated callers, and callers outside their tenant
//! scope. Persistence failures are not represented here; they stay
//! `sqlx::Error` until the HTTP layer wraps them.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A request parameter failed validation (e.g. a half-open date range).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The caller could not be authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but may not see the requested data.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

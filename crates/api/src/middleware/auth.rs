//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use pestops_core::error::CoreError;
use pestops_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Caller identity decoded from the request's JWT.
///
/// Handlers take this as an extractor parameter; a request without a valid
/// `Authorization: Bearer <token>` header is rejected with 401 before the
/// handler body runs. Tenant scoping happens afterwards, in
/// `pestops_core::scope::resolve`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name.
    pub role: String,
    /// The user's company id, absent on cross-tenant admin tokens.
    pub company_id: Option<DbId>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = bearer_token(header)
            .map_err(|msg| AppError::Core(CoreError::Unauthorized(msg.into())))?;

        let claims = state.config.jwt.decode_access_token(token).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            company_id: claims.company_id,
        })
    }
}

/// Pull the token out of an `Authorization` header value.
fn bearer_token(header: Option<&str>) -> Result<&str, &'static str> {
    header
        .ok_or("Missing Authorization header")?
        .strip_prefix("Bearer ")
        .ok_or("Invalid Authorization format. Expected: Bearer <token>")
}

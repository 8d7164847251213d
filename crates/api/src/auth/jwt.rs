//! JWT access-token validation.
//!
//! Access tokens are HS256-signed JWTs carrying a [`Claims`] payload with
//! the caller's id, role, and tenant. Issuance (login, refresh, OTP) is a
//! separate identity service's job; this crate verifies tokens on
//! incoming requests and only mints them in tests.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pestops_core::types::DbId;

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's internal database id.
    pub sub: DbId,
    /// The user's role name (e.g. `"admin"`, `"exterminator"`).
    pub role: String,
    /// The user's company id. Absent only on tokens minted for
    /// cross-tenant administrators.
    pub company_id: Option<DbId>,
    /// Expiration (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token id (UUID v4) for revocation and audit.
    pub jti: String,
}

/// Signing and expiry settings for access tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity service.
    pub secret: String,
    /// Access token lifetime in minutes.
    pub access_token_expiry_mins: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Read JWT settings from the environment: `JWT_SECRET` (required) and
    /// `JWT_ACCESS_EXPIRY_MINS` (default 15).
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is unset or empty; a server that cannot
    /// verify tokens must not start.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .map(|v| v.parse().expect("JWT_ACCESS_EXPIRY_MINS must be an integer"))
            .unwrap_or(DEFAULT_ACCESS_EXPIRY_MINS);

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    /// Mint an HS256 access token for the given identity.
    pub fn mint_access_token(
        &self,
        user_id: DbId,
        role: &str,
        company_id: Option<DbId>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            role: role.to_string(),
            company_id,
            exp: now + self.access_token_expiry_mins * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        // Header::default() is HS256.
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Verify a token's signature and expiry, returning its [`Claims`].
    pub fn decode_access_token(
        &self,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        // Validation::default() checks the signature and exp (with leeway).
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let config = test_config();
        let token = config
            .mint_access_token(42, "exterminator", Some(7))
            .expect("mint should succeed");

        let claims = config
            .decode_access_token(&token)
            .expect("decode should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "exterminator");
        assert_eq!(claims.company_id, Some(7));
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn admin_token_may_omit_company_id() {
        let config = test_config();
        let token = config
            .mint_access_token(1, "admin", None)
            .expect("mint should succeed");

        let claims = config
            .decode_access_token(&token)
            .expect("decode should succeed");
        assert_eq!(claims.company_id, None);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();

        // Hand-build a token expired well past the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: "exterminator".to_string(),
            company_id: Some(1),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encode should succeed");

        assert!(config.decode_access_token(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let token = config
            .mint_access_token(42, "admin", None)
            .expect("mint should succeed");

        let other = JwtConfig {
            secret: "a-different-secret-entirely".to_string(),
            access_token_expiry_mins: 15,
        };

        assert!(other.decode_access_token(&token).is_err());
    }
}

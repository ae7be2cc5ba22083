//! Session token authentication.
//!
//! Tokens are issued by the identity provider; this module only verifies
//! them and turns their claims into an [`Identity`].

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use concise_models::Identity;

use crate::config::AuthConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Decoded session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: String,
    /// Primary email (if the provider includes it)
    #[serde(default)]
    pub email: Option<String>,
    /// All email addresses on file, primary first
    #[serde(default)]
    pub email_addresses: Vec<String>,
    /// Expiration
    pub exp: i64,
    /// Issuer
    #[serde(default)]
    pub iss: Option<String>,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        match claims.email {
            Some(email) if !email.trim().is_empty() => Identity::new(claims.sub, Some(email)),
            _ => Identity::from_email_addresses(claims.sub, claims.email_addresses),
        }
    }
}

/// Verifies session tokens against a fixed key.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Verifier for HS256 tokens signed with a shared secret.
    pub fn from_secret(secret: &[u8], issuer: Option<&str>) -> Self {
        Self::with_key(DecodingKey::from_secret(secret), Algorithm::HS256, issuer)
    }

    /// Verifier for RS256 tokens signed by the provider's key pair.
    pub fn from_rsa_pem(pem: &[u8], issuer: Option<&str>) -> ApiResult<Self> {
        let key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| ApiError::internal(format!("Invalid auth public key: {}", e)))?;
        Ok(Self::with_key(key, Algorithm::RS256, issuer))
    }

    /// Build from configuration. Returns `None` when no key is configured.
    pub fn from_config(config: &AuthConfig) -> ApiResult<Option<Self>> {
        let issuer = config.issuer.as_deref();
        if let Some(pem) = &config.jwt_public_key_pem {
            return Self::from_rsa_pem(pem.as_bytes(), issuer).map(Some);
        }
        Ok(config
            .jwt_secret
            .as_ref()
            .map(|secret| Self::from_secret(secret.as_bytes(), issuer)))
    }

    fn with_key(key: DecodingKey, algorithm: Algorithm, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        Self { key, validation }
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> ApiResult<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(|e| ApiError::unauthorized(format!("Token validation failed: {}", e)))?;
        Ok(data.claims)
    }
}

/// The signed-in user, if any.
///
/// A request without an `Authorization` header is anonymous. A header that
/// is present but invalid is rejected.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    pub fn is_signed_in(&self) -> bool {
        self.0.as_ref().is_some_and(Identity::is_authenticated)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(MaybeIdentity(None));
        };

        let token = auth_header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header format"))?;

        let verifier = state
            .tokens
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("Session verification is not configured"))?;

        let claims = verifier.verify(token)?;
        debug!(user_id = %claims.sub, "Verified session token");

        Ok(MaybeIdentity(Some(Identity::from(claims))))
    }
}

//! JWT session-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "ISSUE_SESSION_TOKENS", test))]
use serde::Serialize;
use uuid::Uuid;

/// Account identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub account_id: Uuid,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub session_exp: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload for web-session tokens.
///
/// `sub` carries the account ID as a UUID string; `exp` is seconds since
/// epoch. [`Deserialize`] is always available — every consumer validates
/// tokens. [`Serialize`] requires the **`ISSUE_SESSION_TOKENS`** cargo
/// feature because only the session issuer (and the testing crate) signs.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "ISSUE_SESSION_TOKENS", test), derive(Serialize))]
pub struct SessionClaims {
    /// Account ID (UUID string).
    pub sub: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a session JWT, returning parsed identity.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between services.
pub fn validate_session_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    let account_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;

    Ok(TokenInfo {
        account_id,
        session_exp: data.claims.exp,
    })
}

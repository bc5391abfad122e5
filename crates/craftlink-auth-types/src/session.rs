//! Web-session extractor for authenticated endpoints.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::token::validate_session_token;

/// Cookie name the web frontend stores the session JWT under.
pub const SESSION_COOKIE: &str = "token";

/// HMAC secret for validating session tokens; provided through the service
/// state via `FromRef`.
#[derive(Debug, Clone)]
pub struct SessionSecret(pub String);

/// Authenticated account identity for web-session endpoints.
///
/// The session JWT is read from `Authorization: Bearer <token>` first, then
/// from the `token` cookie — the same order the legacy middleware used.
/// Returns 401 when no token is present or validation fails.
#[derive(Debug, Clone)]
pub struct SessionAccount {
    pub account_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
}

impl<S> FromRequestParts<S> for SessionAccount
where
    SessionSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(parts).or_else(|| cookie_token(parts));
        let secret = SessionSecret::from_ref(state);

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            let info = validate_session_token(&token, &secret.0)
                .map_err(|_| StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                account_id: info.account_id,
            })
        }
    }
}

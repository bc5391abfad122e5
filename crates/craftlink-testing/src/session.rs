//! Signed test sessions.
//!
//! Web-session endpoints validate a JWT from the `Authorization` header or
//! the `token` cookie. `TestSession` signs a real token with a known secret
//! so no separate auth collaborator is needed in tests.

use http::{HeaderMap, HeaderValue};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use craftlink_auth_types::token::SessionClaims;

/// Secret the test fixtures sign with; pass the same value to the service
/// state under test.
pub const TEST_SESSION_SECRET: &str = "craftlink-test-session-secret";

/// A signed web session for a single account.
pub struct TestSession {
    pub account_id: Uuid,
}

impl TestSession {
    pub fn new(account_id: Uuid) -> Self {
        Self { account_id }
    }

    /// Sign a session token for this account, valid for one hour.
    pub fn token(&self) -> String {
        self.token_with_secret(TEST_SESSION_SECRET)
    }

    /// Sign with an explicit secret (for wrong-secret rejection tests).
    pub fn token_with_secret(&self, secret: &str) -> String {
        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock before UNIX epoch")
            .as_secs()
            + 3600;
        let claims = SessionClaims {
            sub: self.account_id.to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("failed to sign test session token")
    }

    /// Return headers as if the web frontend attached the session.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}

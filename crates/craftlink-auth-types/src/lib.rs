//! Session-auth types shared across Craftlink services.
//!
//! Provides JWT session-token validation and the `SessionAccount` extractor
//! used by web-session endpoints.

pub mod session;
pub mod token;

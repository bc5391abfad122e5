//! Test utilities for Craftlink services.
//!
//! Provides signed session tokens for exercising web-session endpoints.
//! Import in `#[cfg(test)]` / dev-dependency contexts only — never in
//! production code.

pub mod session;

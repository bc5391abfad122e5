//! Shared service plumbing for the Craftlink platform.
//!
//! Health endpoints, request-id middleware, tracing setup, and wire-format
//! serde helpers. Domain logic never lives here.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;

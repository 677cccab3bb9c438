//! HTTP request handlers.

/// User collection endpoints.
pub mod user;

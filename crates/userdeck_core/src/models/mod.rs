//! Data models exchanged with the remote users resource.

/// User records, drafts, and partial updates.
pub mod user;

//! Core domain library for UserDeck (config, models, validation, search, theme).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across UserDeck crates.
pub mod constants;
/// Process-global environment helpers.
pub mod env;
/// Core error types (configuration and preference storage).
pub mod error;
/// User records, drafts, and patches exchanged with the remote resource.
pub mod models;
/// Free-text filtering of the user collection.
pub mod search;
/// Persisted light/dark display preference.
pub mod theme;
/// Constraint-table validation for user forms.
pub mod validation;

pub use config::Config;
pub use constants::{DEFAULT_API_URL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use error::CoreError;
pub use models::user::{Address, Company, Geo, User, UserDraft, UserPatch};
pub use search::{filter, parse_search_fields, SearchField, DEFAULT_SEARCH_FIELDS};
pub use theme::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Theme, ThemePreference,
};
pub use validation::{FieldErrors, FormField, FormProfile};

//! Shared constants used across UserDeck crates.

/// Default base URL of the remote users resource.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default port for the reference users service.
pub const DEFAULT_PORT: u16 = 38412;

/// Default per-request timeout for remote store calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Key under which the display theme is persisted.
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Preference file name inside the cache directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

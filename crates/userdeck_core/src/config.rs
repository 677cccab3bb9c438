//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, PREFERENCES_FILE_NAME,
};
use crate::search::{parse_search_fields, SearchField, DEFAULT_SEARCH_FIELDS};
use crate::validation::FormProfile;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Runtime configuration for UserDeck.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote users resource (no trailing `/users`).
    pub api_url: String,
    /// Timeout applied to every remote call.
    pub request_timeout: Duration,
    /// File holding persisted UI preferences.
    pub prefs_path: PathBuf,
    /// Which form fields are collected and required.
    pub form_profile: FormProfile,
    /// Fields the search box matches against.
    pub search_fields: Vec<SearchField>,
    /// Port of the reference users service.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            prefs_path: default_prefs_path(),
            form_profile: FormProfile::default(),
            search_fields: DEFAULT_SEARCH_FIELDS.to_vec(),
            port: DEFAULT_PORT,
        }
    }
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

fn default_prefs_path() -> PathBuf {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache")
        .join("userdeck")
        .join(PREFERENCES_FILE_NAME)
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn normalize_api_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let trimmed = trimmed.strip_suffix("/users").unwrap_or(trimmed);
    Some(trimmed.to_string())
}

fn parsed_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring invalid {}='{}'", name, raw);
            None
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("USERDECK_API_URL")
                .ok()
                .and_then(|raw| normalize_api_url(&raw))
                .unwrap_or(defaults.api_url),
            request_timeout: parsed_env::<u64>("USERDECK_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            prefs_path: env::var("USERDECK_PREFS_PATH")
                .ok()
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| PathBuf::from(expand_tilde(raw)))
                .unwrap_or(defaults.prefs_path),
            form_profile: env::var("USERDECK_FORM_PROFILE")
                .ok()
                .and_then(|raw| {
                    let parsed = FormProfile::parse(&raw);
                    if parsed.is_none() {
                        warn!("ignoring unknown USERDECK_FORM_PROFILE='{}'", raw);
                    }
                    parsed
                })
                .unwrap_or(defaults.form_profile),
            search_fields: env::var("USERDECK_SEARCH_FIELDS")
                .map(|raw| parse_search_fields(&raw))
                .unwrap_or(defaults.search_fields),
            port: parsed_env("PORT").unwrap_or(defaults.port),
        }
    }
}

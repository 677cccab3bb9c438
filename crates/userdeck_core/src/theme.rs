//! Persisted light/dark display preference.
//!
//! The theme is read once when [`ThemePreference::load`] runs and written on
//! every change. A change is committed in memory only after the store
//! accepted it, so the persisted and in-memory values never diverge.

use crate::constants::THEME_PREFERENCE_KEY;
use crate::error::CoreError;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Persisted representation (`"light"` or `"dark"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse the persisted representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value storage for UI preferences.
pub trait PreferenceStore: Send + fmt::Debug {
    /// Read a value.
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write a value.
    ///
    /// # Errors
    /// Returns an error when the value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Preferences kept in a small JSON object file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut values = self.read_all().unwrap_or_else(|err| {
            warn!("discarding unreadable preferences {}: {}", self.path.display(), err);
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

/// In-memory preferences; clones share the same values.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
    read_only: bool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Store that rejects every write.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let values = self
            .values
            .lock()
            .map_err(|_| CoreError::Preference("preference lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        if self.read_only {
            return Err(CoreError::Preference("preference store is read-only".to_string()));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| CoreError::Preference("preference lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The display theme together with the store it persists to.
#[derive(Debug)]
pub struct ThemePreference {
    theme: Theme,
    store: Box<dyn PreferenceStore>,
}

impl ThemePreference {
    /// Read the persisted theme.
    ///
    /// Missing, unreadable, or unrecognised values fall back to light.
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let theme = match store.get(THEME_PREFERENCE_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!("ignoring unknown theme preference '{}'", raw);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("failed to read theme preference: {}", err);
                Theme::default()
            }
        };
        debug!(theme = theme.as_str(), "theme preference loaded");
        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Switch between light and dark and persist the result.
    ///
    /// # Errors
    /// Returns the store error; the current theme is left unchanged.
    pub fn toggle(&mut self) -> Result<Theme, CoreError> {
        self.set(self.theme.toggled())?;
        Ok(self.theme)
    }

    /// Persist `theme` and make it current.
    ///
    /// # Errors
    /// Returns the store error; the current theme is left unchanged.
    pub fn set(&mut self, theme: Theme) -> Result<(), CoreError> {
        self.store.set(THEME_PREFERENCE_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(())
    }
}

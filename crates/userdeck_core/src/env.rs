//! Process-global environment helpers for tests that read `Config::from_env`.

use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serialize environment mutation across test threads.
///
/// A poisoned lock is recovered; the guarded data is `()`.
pub fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[allow(unused_unsafe)]
fn set_env_var(key: &str, value: &str) {
    // SAFETY: callers hold `env_lock` while tests mutate the environment.
    unsafe {
        std::env::set_var(key, value);
    }
}

#[allow(unused_unsafe)]
fn remove_env_var(key: &str) {
    // SAFETY: callers hold `env_lock` while tests mutate the environment.
    unsafe {
        std::env::remove_var(key);
    }
}

/// A batch of environment overrides undone, newest first, on drop.
#[derive(Debug, Default)]
pub struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key=value` for the lifetime of the scope.
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.saved.push((key.to_string(), std::env::var(key).ok()));
        set_env_var(key, value);
        self
    }

    /// Unset `key` for the lifetime of the scope.
    pub fn remove(mut self, key: &str) -> Self {
        self.saved.push((key.to_string(), std::env::var(key).ok()));
        remove_env_var(key);
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        while let Some((key, previous)) = self.saved.pop() {
            match previous {
                Some(value) => set_env_var(&key, &value),
                None => remove_env_var(&key),
            }
        }
    }
}

//! Session persistence: the bearer token and the cached user profile.
//!
//! ARCHITECTURE
//! ============
//! The session surface is two keyed string slots (token, profile JSON) behind
//! the [`SessionBackend`] trait, so tests run against an in-memory map while
//! the CLI persists to files. [`SessionStore`] is the only writer; everything
//! else reads through it.
//!
//! The session has exactly two states: anonymous (no token) and authenticated
//! (token present, profile possibly stale or absent). A profile is never
//! returned without a token. There is no refresh transition; token expiry is
//! discovered reactively when a request comes back 401.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::users::User;

/// Storage key for the bearer token (plain string).
pub const TOKEN_KEY: &str = "ausvisa_token";
/// Storage key for the last-known user profile (JSON-serialized).
pub const USER_KEY: &str = "ausvisa_user";

/// Keyed string persistence for session state.
///
/// Implementations are best effort: reads return `None` on any failure and
/// writes log instead of propagating, because the token of record lives
/// server-side and a storage hiccup must never take down a caller.
pub trait SessionBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, overwriting any previous value.
    fn write(&self, key: &str, value: &str);
    /// Remove `key`; a no-op when nothing is stored.
    fn remove(&self, key: &str);
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// File backend: one file per key under a directory, created on first write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SessionBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.join(key)).ok()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!(error = %e, dir = %self.dir.display(), "session dir create failed");
            return;
        }
        if let Err(e) = std::fs::write(self.dir.join(key), value) {
            tracing::warn!(error = %e, key, "session write failed");
        }
    }

    fn remove(&self, key: &str) {
        match std::fs::remove_file(self.dir.join(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, key, "session remove failed"),
        }
    }
}

/// Stored credentials read back from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAuth {
    /// Bearer token attached to authenticated requests.
    pub token: String,
    /// Cached profile; `None` until fetched, or when the cached JSON is
    /// unreadable.
    pub user: Option<User>,
}

/// Single source of truth for "am I authenticated, and as whom."
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl SessionStore {
    #[must_use]
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by an in-memory map (tests, ephemeral use).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Persist the token, and the profile when provided. Repeated calls
    /// overwrite cleanly; an absent profile leaves any cached one in place
    /// (it is replaced wholesale on the next authenticated fetch).
    pub fn store_auth(&self, token: &str, user: Option<&User>) {
        self.backend.write(TOKEN_KEY, token);
        if let Some(user) = user {
            match serde_json::to_string(user) {
                Ok(json) => self.backend.write(USER_KEY, &json),
                Err(e) => tracing::warn!(error = %e, "user profile serialize failed; token stored alone"),
            }
        }
    }

    /// Read back the stored session. `None` when no token is present. Never
    /// errors: a malformed cached profile yields `user: None` and a warning,
    /// not a failure.
    #[must_use]
    pub fn stored_auth(&self) -> Option<StoredAuth> {
        let token = self.backend.read(TOKEN_KEY)?;
        let user = self.backend.read(USER_KEY).and_then(|raw| {
            serde_json::from_str::<User>(&raw)
                .map_err(|e| tracing::warn!(error = %e, "cached user profile unreadable; ignoring"))
                .ok()
        });
        Some(StoredAuth { token, user })
    }

    /// The stored token alone, for header construction.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.backend.read(TOKEN_KEY)
    }

    /// Remove both keys unconditionally; safe when nothing is stored.
    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

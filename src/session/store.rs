//! Persistent key-value storage for the session credential and profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the durable source of truth across reloads. It applies no
//! expiry: a stored token stays "present" until logout removes it, and the
//! server answering 401 is the only validity check.
//!
//! TRADE-OFFS
//! ==========
//! Values are stored in plain text; isolation is whatever the browser's
//! per-origin storage provides.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;
use crate::net::types::{Credential, UserProfile};

/// Key holding the raw bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key holding the JSON-serialized [`UserProfile`].
pub const USER_KEY: &str = "user";

/// Synchronous string key-value storage.
///
/// Writes are atomic per key. Implementations never fail loudly: an
/// unavailable backend reads as empty and drops writes.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Read the stored credential, if any.
pub fn read_token(store: &dyn SessionStore) -> Option<Credential> {
    store.get(ACCESS_TOKEN_KEY).filter(|token| !token.is_empty()).map(Credential::new)
}

/// Read the cached profile.
///
/// # Errors
///
/// Returns [`StorageError::CorruptProfile`] when the stored value does not
/// parse. Callers treat that exactly like an absent profile.
pub fn read_profile(store: &dyn SessionStore) -> Result<Option<UserProfile>, StorageError> {
    match store.get(USER_KEY) {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// In-memory store used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate entries, e.g. to simulate a reload with a saved session.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.put(key, value);
        }
        store
    }
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage`-backed store.
#[cfg(feature = "csr")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(feature = "csr")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; session will not persist");
        }
        storage
    }
}

#[cfg(feature = "csr")]
impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn put(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage write failed: key={key}");
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.remove_item(key).is_err() {
            log::warn!("localStorage remove failed: key={key}");
        }
    }
}

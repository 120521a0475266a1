//! Session Store
//!
//! Key-value persistence for the serialized session blob.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::SessionResult;

/// Key the session blob is stored under
pub const SESSION_KEY: &str = "authentication";

/// Client-side key-value storage
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    async fn get(&self, key: &str) -> SessionResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> SessionResult<()>;

    /// Removing a missing key is not an error
    async fn remove(&self, key: &str) -> SessionResult<()>;
}

/// Process-local store, shared by every clone
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> SessionResult<()> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> SessionResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}
